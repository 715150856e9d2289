//! # Construcción y Serialización de Respuestas
//!
//! Una [`Response`] tiene un status, un body opcional y un content type.
//! [`Response::to_bytes`] produce los bytes exactos que van al socket.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>hola</h1>
//! ```
//!
//! Sin body no se emite ningún header de entidad:
//!
//! ```text
//! HTTP/1.1 404 Not Found\r\n
//! \r\n
//! ```

use super::StatusCode;

/// Content type cuando el handler no define uno
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const CRLF: &str = "\r\n";

/// Respuesta HTTP construida por el router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    body: Option<Vec<u8>>,
    content_type: String,
}

impl Response {
    /// Crea una respuesta sin body
    ///
    /// # Ejemplo
    /// ```
    /// use site_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok);
    /// assert_eq!(response.to_bytes(), b"HTTP/1.1 200 OK\r\n\r\n");
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Un string vacío sigue contando como body presente (`Content-Length: 0`).
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    /// Serializa la respuesta a los bytes que se escriben en el socket
    ///
    /// `Content-Length` es la cantidad de bytes del body, no de caracteres.
    ///
    /// # Ejemplo
    /// ```
    /// use site_server::http::{Response, StatusCode};
    ///
    /// let bytes = Response::new(StatusCode::Ok).with_body("ñ").to_bytes();
    /// let text = String::from_utf8(bytes).unwrap();
    /// assert!(text.contains("Content-Length: 2\r\n"));
    /// ```
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {}{}", self.status, CRLF);

        if let Some(body) = &self.body {
            head.push_str(&format!("Content-Type: {}{}", self.content_type, CRLF));
            head.push_str(&format!("Content-Length: {}{}", body.len(), CRLF));
        }
        head.push_str(CRLF);

        let mut result = head.into_bytes();
        if let Some(body) = &self.body {
            result.extend_from_slice(body);
        }

        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Content type efectivo; solo se emite si hay body
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}
