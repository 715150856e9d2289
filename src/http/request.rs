//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser mínimo que convierte los bytes de una única lectura del socket
//! en un [`Request`].
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /add-html/demo HTTP/1.1\r\n
//! Host: localhost:4321\r\n
//! \r\n
//! <h1>hola</h1>
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Boundary**: `\r\n\r\n` que separa headers del body
//! 4. **Body**: Lo que queda después del boundary (opcional)
//!
//! No se decodifica el path ni se separa la query string: un `?` es parte
//! del path. Si el request no cabe en una lectura no se reensambla.

use super::Headers;
use thiserror::Error;

const LINE_TERMINATOR: &str = "\r\n";
const BOUNDARY: &str = "\r\n\r\n";
const HEADER_SEPARATOR: &str = ": ";

/// Método HTTP, sin normalizar mayúsculas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Publicar un asset de un sitio
    POST,

    /// Cualquier otro token (incluye `get` en minúsculas)
    Other(String),
}

impl Method {
    /// Convierte el token de la request line en un método. Nunca falla.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No llegó nada útil
    #[error("Empty request")]
    EmptyRequest,

    /// Los bytes no son UTF-8 válido
    #[error("Request is not valid UTF-8")]
    InvalidEncoding,

    /// La request line no tiene exactamente 3 tokens
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),
}

/// Request HTTP parseado. Inmutable una vez construido.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    version: String,
    headers: Headers,
    body: Option<String>,
}

impl Request {
    /// Parsea un request desde los bytes de una lectura
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use site_server::http::{Method, Request};
    ///
    /// let raw = b"GET /get-sum/ HTTP/1.1\r\nTwo-Numbers: 3,4\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), &Method::GET);
    /// assert_eq!(request.path(), "/get-sum/");
    /// assert_eq!(request.header("two-numbers"), Some("3,4"));
    /// assert_eq!(request.body(), None);
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let text = Self::decode(buffer)?;

        if text.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Sin boundary el texto completo se trata como cabecera
        let (head, rest) = match text.find(BOUNDARY) {
            Some(pos) => (&text[..pos], Some(&text[pos + BOUNDARY.len()..])),
            None => (text, None),
        };

        let mut lines = head.split(LINE_TERMINATOR);
        let request_line = lines.next().unwrap_or_default();
        let (method, path, version) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines);
        let body = rest
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string);

        Ok(Request {
            method,
            path,
            version,
            headers,
            body,
        })
    }

    /// Decodifica UTF-8. Un carácter multibyte incompleto al final (lectura
    /// cortada por el tamaño del buffer) se descarta; cualquier otra secuencia
    /// inválida es error.
    fn decode(buffer: &[u8]) -> Result<&str, ParseError> {
        match std::str::from_utf8(buffer) {
            Ok(text) => Ok(text),
            Err(e) if e.error_len().is_none() => std::str::from_utf8(&buffer[..e.valid_up_to()])
                .map_err(|_| ParseError::InvalidEncoding),
            Err(_) => Err(ParseError::InvalidEncoding),
        }
    }

    /// Formato: `GET /path HTTP/1.1`, separado por espacios simples
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(ParseError::MalformedRequestLine(line.to_string()));
        }

        Ok((
            Method::from_token(parts[0]),
            parts[1].to_string(),
            parts[2].to_string(),
        ))
    }

    /// Las líneas sin `": "` se descartan en silencio
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Headers {
        let mut headers = Headers::new();

        for line in lines.filter(|l| !l.is_empty()) {
            if let Some((name, value)) = line.split_once(HEADER_SEPARATOR) {
                headers.insert(name, value);
            }
        }

        headers
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header específico (la búsqueda ignora mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Body sin espacios alrededor, si quedaron bytes tras el boundary
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
