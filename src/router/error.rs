//! Errores de routing y su traducción a status codes.
//!
//! | Error                    | Status |
//! |--------------------------|--------|
//! | `MissingOrInvalidHeader` | 400    |
//! | `PathTraversalRejected`  | 400    |
//! | `UnsupportedAsset`       | 400    |
//! | `NotFound`               | 404    |
//! | `UnsupportedMethod`      | 403    |
//! | `Io`                     | 500    |

use crate::http::{Response, StatusCode};
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    /// Header ausente o con un valor que no se puede interpretar
    #[error("Missing or invalid header {header}: {reason}")]
    MissingOrInvalidHeader { header: &'static str, reason: String },

    /// Dominio que no cumple `^[a-zA-Z]+$`
    #[error("Rejected domain segment: {0:?}")]
    PathTraversalRejected(String),

    /// Extensión que no se sirve (solo `.html` y `.css`)
    #[error("Asset type not servable: {0:?}")]
    UnsupportedAsset(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("File-store failure: {0}")]
    Io(#[source] std::io::Error),
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::MissingOrInvalidHeader { .. }
            | RouteError::PathTraversalRejected(_)
            | RouteError::UnsupportedAsset(_) => StatusCode::BadRequest,
            RouteError::NotFound(_) => StatusCode::NotFound,
            RouteError::UnsupportedMethod(_) => StatusCode::Forbidden,
            RouteError::Io(_) => StatusCode::InternalServerError,
        }
    }

    /// Las respuestas de error no llevan body
    pub fn to_response(&self) -> Response {
        Response::new(self.status())
    }
}

impl From<StoreError> for RouteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(path) => RouteError::NotFound(path.display().to_string()),
            StoreError::Io(e) => RouteError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_mapping() {
        let invalid = RouteError::MissingOrInvalidHeader {
            header: "two-numbers",
            reason: "missing".to_string(),
        };
        assert_eq!(invalid.status(), StatusCode::BadRequest);
        assert_eq!(RouteError::PathTraversalRejected("..".into()).status(), StatusCode::BadRequest);
        assert_eq!(RouteError::UnsupportedAsset("a.js".into()).status(), StatusCode::BadRequest);
        assert_eq!(RouteError::NotFound("/x".into()).status(), StatusCode::NotFound);
        assert_eq!(RouteError::UnsupportedMethod("PUT".into()).status(), StatusCode::Forbidden);

        let io = RouteError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.status(), StatusCode::InternalServerError);
    }

    #[test]
    fn test_from_store_error() {
        let not_found: RouteError = StoreError::NotFound(PathBuf::from("demo/index.html")).into();
        assert!(matches!(not_found, RouteError::NotFound(ref p) if p == "demo/index.html"));

        let io: RouteError = StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")).into();
        assert!(matches!(io, RouteError::Io(_)));
    }

    #[test]
    fn test_error_response_has_no_body() {
        let response = RouteError::NotFound("/x".into()).to_response();
        assert_eq!(response.to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    }
}
