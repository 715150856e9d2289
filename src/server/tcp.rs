//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Cada conexión aceptada se procesa en su propio thread:
//! una lectura, parse, routing, serialización, una escritura y cierre.
//! Lo único que comparten los threads es el router (de solo lectura,
//! salvo los locks por dominio).

use crate::config::Config;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use crate::store::DiskStore;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

static CONNECTION_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Servidor HTTP/1.1 de sitios estáticos
pub struct Server {
    config: Config,
    router: Arc<Router>,
}

impl Server {
    /// Crea el servidor con un [`DiskStore`] sobre `config.site_root`
    pub fn new(config: Config) -> Self {
        let store = Arc::new(DiskStore::new(&config.site_root));
        tracing::debug!(site_root = %store.root().display(), "site store ready");
        let router = Router::with_site_routes(store);
        Self::with_router(config, router)
    }

    /// Crea el servidor con un router ya armado
    pub fn with_router(config: Config, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Hace bind en `config.address()` y atiende conexiones para siempre
    pub fn run(&self) -> io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        tracing::info!(%address, "server listening");

        self.serve(listener)
    }

    /// Atiende conexiones de un listener ya creado
    ///
    /// Solo retorna si el listener deja de producir conexiones. Los errores
    /// de `accept` se registran y el loop sigue.
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(mut stream) => {
                    let router = Arc::clone(&self.router);
                    let buffer_size = self.config.buffer_size;
                    let conn_id = CONNECTION_COUNTER.fetch_add(1, Ordering::Relaxed);
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    tracing::debug!(conn_id, %peer, "connection accepted");

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(&mut stream, &router, buffer_size) {
                            tracing::warn!(conn_id, %peer, error = %e, "connection failed");
                        }
                        tracing::debug!(conn_id, "connection closed");
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to accept connection");
                }
            }
        }

        Ok(())
    }

    /// Procesa un request completo sobre un stream
    ///
    /// Hace una única lectura de hasta `buffer_size` bytes. Si el peer no
    /// mandó nada, retorna sin escribir. Un error de parsing se responde con
    /// 400 sin body. Un request más largo que el buffer se procesa con lo que
    /// entró (best-effort) y queda registrado como truncado.
    pub fn handle_connection<S: Read + Write>(
        stream: &mut S,
        router: &Router,
        buffer_size: usize,
    ) -> io::Result<()> {
        let start = Instant::now();

        let mut buffer = vec![0u8; buffer_size];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            return Ok(());
        }

        // No hay reensamblado: lo que no entró en el buffer se pierde
        if bytes_read == buffer_size {
            tracing::warn!(buffer_size, "request filled the read buffer and may be truncated");
        }

        let response = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                tracing::info!(method = %request.method(), path = request.path(), "request");
                router.route(&request)
            }
            Err(e) => {
                tracing::warn!(error = %e, bytes_read, "parse error");
                Response::new(StatusCode::BadRequest)
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        tracing::info!(
            status = %response.status(),
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            "response sent"
        );

        Ok(())
    }
}

/// Arranca un servidor en un thread de fondo sobre `listener`
///
/// Retorna la dirección local. Pensado para tests de integración.
pub fn spawn_background(listener: TcpListener, server: Server) -> io::Result<SocketAddr> {
    let addr = listener.local_addr()?;
    thread::spawn(move || {
        if let Err(e) = server.serve(listener) {
            tracing::error!(error = %e, "background server stopped");
        }
    });
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, SiteStore};
    use std::io::Cursor;
    use std::path::Path;
    use std::net::TcpStream;

    /// Stream en memoria: lee de `input` y acumula lo escrito en `output`
    struct MockStream {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl MockStream {
        fn new(input: &[u8]) -> Self {
            Self {
                input: Cursor::new(input.to_vec()),
                output: Vec::new(),
            }
        }

        fn output_text(&self) -> String {
            String::from_utf8_lossy(&self.output).into_owned()
        }
    }

    impl Read for MockStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for MockStream {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn router() -> Router {
        Router::with_site_routes(Arc::new(MemoryStore::new().with_file("demo/index.html", b"<h1>demo</h1>")))
    }

    #[test]
    fn test_handle_connection_echo() {
        let mut stream = MockStream::new(b"GET /echo/hola HTTP/1.1\r\nHost: x\r\n\r\n");
        Server::handle_connection(&mut stream, &router(), 1024).unwrap();

        assert_eq!(
            stream.output_text(),
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 4\r\n\r\nhola"
        );
    }

    #[test]
    fn test_handle_connection_site() {
        let mut stream = MockStream::new(b"GET /site/demo/ HTTP/1.1\r\n\r\n");
        Server::handle_connection(&mut stream, &router(), 1024).unwrap();

        let text = stream.output_text();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/html\r\n"));
        assert!(text.ends_with("<h1>demo</h1>"));
    }

    #[test]
    fn test_handle_connection_parse_error() {
        let mut stream = MockStream::new(b"\x00\x01\x02\x03garbage");
        Server::handle_connection(&mut stream, &router(), 1024).unwrap();

        assert_eq!(stream.output_text(), "HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[test]
    fn test_handle_connection_malformed_request_line() {
        let mut stream = MockStream::new(b"GET\r\n\r\n");
        Server::handle_connection(&mut stream, &router(), 1024).unwrap();

        assert_eq!(stream.output_text(), "HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    #[test]
    fn test_handle_connection_empty_read_writes_nothing() {
        let mut stream = MockStream::new(b"");
        Server::handle_connection(&mut stream, &router(), 1024).unwrap();

        assert!(stream.output.is_empty());
    }

    #[test]
    fn test_handle_connection_truncated_by_buffer() {
        // Solo se parsean los primeros bytes: el path queda cortado
        let mut stream = MockStream::new(b"GET /echo/abcdefgh HTTP/1.1\r\n\r\n");
        Server::handle_connection(&mut stream, &router(), 14).unwrap();

        // "GET /echo/abcd" no tiene versión → request line inválida
        assert_eq!(stream.output_text(), "HTTP/1.1 400 Bad Request\r\n\r\n");
    }

    /// Router sobre un store vacío, para inspeccionar lo que se escribió
    fn router_with_store() -> (Arc<MemoryStore>, Router) {
        let store = Arc::new(MemoryStore::new());
        let router = Router::with_site_routes(store.clone());
        (store, router)
    }

    #[test]
    fn test_handle_connection_truncated_ascii_body() {
        let (store, router) = router_with_store();
        let head = "POST /add-html/demo HTTP/1.1\r\n\r\n";
        let raw = format!("{}abcdef", head);

        let mut stream = MockStream::new(raw.as_bytes());
        Server::handle_connection(&mut stream, &router, head.len() + 2).unwrap();

        assert_eq!(stream.output_text(), "HTTP/1.1 200 OK\r\n\r\n");
        assert_eq!(store.read_all(Path::new("demo/index.html")).unwrap(), b"ab");
    }

    #[test]
    fn test_handle_connection_truncated_mid_char() {
        let (store, router) = router_with_store();
        let head = "POST /add-html/demo HTTP/1.1\r\n\r\n";
        let raw = format!("{}aéé", head);

        // El corte cae entre los dos bytes de la primera é
        let mut stream = MockStream::new(raw.as_bytes());
        Server::handle_connection(&mut stream, &router, head.len() + 2).unwrap();

        assert_eq!(stream.output_text(), "HTTP/1.1 200 OK\r\n\r\n");
        assert_eq!(store.read_all(Path::new("demo/index.html")).unwrap(), b"a");
    }

    #[test]
    fn test_handle_connection_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().unwrap();
        let router = Arc::new(router());

        let t = thread::spawn({
            let router = Arc::clone(&router);
            move || {
                let (mut stream, _) = listener.accept().unwrap();
                Server::handle_connection(&mut stream, &router, 1024).unwrap();
            }
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(b"PUT / HTTP/1.1\r\n\r\n").unwrap();
        client.shutdown(std::net::Shutdown::Write).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        assert_eq!(String::from_utf8_lossy(&buf), "HTTP/1.1 403 Forbidden\r\n\r\n");

        t.join().unwrap();
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().unwrap();
        let router = Arc::new(router());

        let t = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            Server::handle_connection(&mut stream, &router, 1024).unwrap();
        });

        drop(TcpStream::connect(addr).unwrap());

        t.join().unwrap();
    }
}
