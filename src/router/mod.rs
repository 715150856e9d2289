//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea (método, path) a un handler. Las rutas se evalúan en el orden en
//! que se registraron y gana la primera que coincide.
//!
//! ```text
//! Request → Router → Handler (+ SiteStore) → Response
//! ```
//!
//! Si ninguna ruta coincide: `GET` y `POST` responden 404, cualquier otro
//! método responde 403.

mod error;

pub use error::RouteError;

use crate::handlers;
use crate::http::{Method, Request, Response};
use crate::store::{DomainLocks, SiteStore};
use std::sync::Arc;

/// Tipo de función handler
///
/// Recibe el request, el resto del path después del patrón y el contexto
/// compartido del router.
pub type Handler = fn(&Request, &str, &RouteContext) -> Result<Response, RouteError>;

/// Patrón de path de una ruta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// El path debe ser idéntico
    Exact(&'static str),

    /// El path debe empezar con el prefijo
    Prefix(&'static str),
}

impl PathPattern {
    /// Retorna el sufijo del path si el patrón coincide
    ///
    /// # Ejemplo
    /// ```
    /// use site_server::router::PathPattern;
    ///
    /// assert_eq!(PathPattern::Prefix("/echo/").matches("/echo/abc"), Some("abc"));
    /// assert_eq!(PathPattern::Exact("/").matches("/"), Some(""));
    /// assert_eq!(PathPattern::Exact("/").matches("/x"), None);
    /// ```
    pub fn matches<'a>(&self, path: &'a str) -> Option<&'a str> {
        match self {
            PathPattern::Exact(p) => (path == *p).then_some(""),
            PathPattern::Prefix(p) => path.strip_prefix(*p),
        }
    }
}

/// Estado compartido que reciben los handlers
///
/// El store es de solo lectura para el router; las escrituras pasan por el
/// lock del dominio.
pub struct RouteContext {
    store: Arc<dyn SiteStore>,
    locks: DomainLocks,
}

impl RouteContext {
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self {
            store,
            locks: DomainLocks::new(),
        }
    }

    pub fn store(&self) -> &dyn SiteStore {
        self.store.as_ref()
    }

    pub fn locks(&self) -> &DomainLocks {
        &self.locks
    }
}

struct Route {
    method: Method,
    pattern: PathPattern,
    handler: Handler,
}

/// Router que mapea método + path a handlers
pub struct Router {
    routes: Vec<Route>,
    context: RouteContext,
}

impl Router {
    /// Crea un router vacío sobre un store
    pub fn new(store: Arc<dyn SiteStore>) -> Self {
        Self {
            routes: Vec::new(),
            context: RouteContext::new(store),
        }
    }

    /// Crea el router con la tabla completa de rutas del servidor
    ///
    /// | Método | Patrón              | Handler                |
    /// |--------|---------------------|------------------------|
    /// | GET    | `/` exacto          | 200 vacío              |
    /// | GET    | `/get-sum/` exacto  | suma de `two-numbers`  |
    /// | GET    | `/echo/` prefijo    | eco del sufijo         |
    /// | GET    | `/site/` prefijo    | asset de un sitio      |
    /// | POST   | `/add-html/` prefijo| publica `index.html`   |
    /// | POST   | `/add-css/` prefijo | publica `style.css`    |
    pub fn with_site_routes(store: Arc<dyn SiteStore>) -> Self {
        let mut router = Self::new(store);

        router.register(Method::GET, PathPattern::Exact("/"), handlers::root_handler);
        router.register(Method::GET, PathPattern::Exact("/get-sum/"), handlers::get_sum_handler);
        router.register(Method::GET, PathPattern::Prefix("/echo/"), handlers::echo_handler);
        router.register(Method::GET, PathPattern::Prefix("/site/"), handlers::site_handler);
        router.register(Method::POST, PathPattern::Prefix("/add-html/"), handlers::add_html_handler);
        router.register(Method::POST, PathPattern::Prefix("/add-css/"), handlers::add_css_handler);

        router
    }

    /// Registra una ruta al final de la tabla
    pub fn register(&mut self, method: Method, pattern: PathPattern, handler: Handler) {
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
    }

    /// Despacha el request y convierte cualquier error en una respuesta
    ///
    /// # Ejemplo
    /// ```
    /// use std::sync::Arc;
    /// use site_server::http::{Request, StatusCode};
    /// use site_server::router::Router;
    /// use site_server::store::MemoryStore;
    ///
    /// let router = Router::with_site_routes(Arc::new(MemoryStore::new()));
    /// let request = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request);
    ///
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// assert_eq!(response.body(), Some(&b"abc"[..]));
    /// ```
    pub fn route(&self, request: &Request) -> Response {
        match self.dispatch(request) {
            Ok(response) => response,
            Err(e) => {
                let status = e.status();
                if status.is_server_error() {
                    tracing::error!(method = %request.method(), path = request.path(), error = %e, "handler failed");
                } else {
                    tracing::warn!(method = %request.method(), path = request.path(), error = %e, "request rejected");
                }
                e.to_response()
            }
        }
    }

    /// Busca la primera ruta que coincide y ejecuta su handler
    pub fn dispatch(&self, request: &Request) -> Result<Response, RouteError> {
        let path = request.path();

        for route in &self.routes {
            if &route.method != request.method() {
                continue;
            }
            if let Some(suffix) = route.pattern.matches(path) {
                return (route.handler)(request, suffix, &self.context);
            }
        }

        match request.method() {
            Method::GET | Method::POST => Err(RouteError::NotFound(path.to_string())),
            Method::Other(m) => Err(RouteError::UnsupportedMethod(m.clone())),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
