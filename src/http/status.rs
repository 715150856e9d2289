//! # Códigos de Estado HTTP
//!
//! Tabla fija de status lines que el servidor puede emitir. El router
//! solo produce un subconjunto (200, 400, 403, 404, 500), el resto existe
//! para que la tabla quede completa.
//!
//! - **2xx**: Éxito (200 OK)
//! - **4xx**: Error del cliente (400, 401, 403, 404)
//! - **5xx**: Error del servidor (500, 501, 502, 503, 504)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 400 Bad Request - Request malformado o parámetros inválidos
    BadRequest = 400,

    /// 401 Unauthorized
    Unauthorized = 401,

    /// 403 Forbidden - Método no soportado
    Forbidden = 403,

    /// 404 Not Found - Ruta o archivo no encontrado
    NotFound = 404,

    /// 500 Internal Server Error - Falla del file-store
    InternalServerError = 500,

    /// 501 Not Implemented
    NotImplemented = 501,

    /// 502 Bad Gateway
    BadGateway = 502,

    /// 503 Service Unavailable
    ServiceUnavailable = 503,

    /// 504 Gateway Timeout
    GatewayTimeout = 504,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use site_server::http::StatusCode;
    /// assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use site_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::NotImplemented => "Not Implemented",
            StatusCode::BadGateway => "Bad Gateway",
            StatusCode::ServiceUnavailable => "Service Unavailable",
            StatusCode::GatewayTimeout => "Gateway Timeout",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }

    /// Verifica si el código indica error del cliente (4xx)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.as_u16())
    }

    /// Verifica si el código indica error del servidor (5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.as_u16())
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::Forbidden.as_u16(), 403);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
        assert_eq!(StatusCode::GatewayTimeout.as_u16(), 504);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::Unauthorized.reason_phrase(), "Unauthorized");
        assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
        assert_eq!(StatusCode::BadGateway.reason_phrase(), "Bad Gateway");
    }

    #[test]
    fn test_classification() {
        assert!(StatusCode::Ok.is_success());
        assert!(!StatusCode::Forbidden.is_success());
        assert!(StatusCode::Forbidden.is_client_error());
        assert!(!StatusCode::InternalServerError.is_client_error());
        assert!(StatusCode::ServiceUnavailable.is_server_error());
        assert!(!StatusCode::NotFound.is_server_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::Forbidden.to_string(), "403 Forbidden");
        assert_eq!(StatusCode::InternalServerError.to_string(), "500 Internal Server Error");
    }
}
