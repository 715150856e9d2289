//! # Site Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado directamente sobre sockets TCP.
//! Sirve sitios estáticos (`.html` y `.css`) desde un directorio raíz y
//! permite publicarlos por POST.
//!
//! ## Arquitectura
//!
//! ```text
//! bytes → Request::parse → Router (+ SiteStore) → Response::to_bytes → bytes
//! ```
//!
//! - `http`: Parsing de requests, serialización de responses, status codes
//! - `router`: Tabla de rutas método + path y mapeo de errores a status
//! - `handlers`: Comportamiento de cada ruta
//! - `store`: File-store inyectado (disco o memoria) y locks por dominio
//! - `server`: Listener TCP y manejo de conexiones
//! - `config`: Argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use site_server::config::Config;
//! use site_server::server::Server;
//!
//! let server = Server::new(Config::default());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
pub mod store;
