//! # Módulo HTTP
//!
//! Núcleo del protocolo, sin librerías de alto nivel:
//!
//! - Parsing de requests (una sola lectura, sin reensamblado)
//! - Headers con claves normalizadas a minúsculas
//! - Construcción y serialización de responses
//! - Tabla fija de status codes
//!
//! No hay keep-alive, chunked encoding, query strings ni URL decoding:
//! cada conexión lleva exactamente un request y una response.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/hola HTTP/1.1\r\n
//! Host: localhost:4321\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 4\r\n
//! \r\n
//! hola
//! ```

pub mod headers;
pub mod request;
pub mod response;
pub mod status;

pub use headers::Headers;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
