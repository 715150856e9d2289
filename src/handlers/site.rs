//! # Handlers de Sitios
//! src/handlers/site.rs
//!
//! - `GET /site/{dominio}` y `GET /site/{dominio}/`: sirve `index.html`
//! - `GET /site/{dominio}/{asset}`: sirve un `.html` o `.css` del dominio
//! - `POST /add-html/{dominio}`: publica el body como `index.html`
//! - `POST /add-css/{dominio}`: publica el body como `style.css`
//!
//! El dominio termina siendo un segmento de directorio dentro del store,
//! por eso tiene que cumplir `^[a-zA-Z]+$` tanto al leer como al escribir.

use crate::http::{Request, Response, StatusCode};
use crate::router::{RouteContext, RouteError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Asset que se sirve cuando el path no nombra uno
pub const INDEX_ASSET: &str = "index.html";

/// Asset que escribe `/add-css/`
pub const STYLE_ASSET: &str = "style.css";

static DOMAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").expect("domain pattern must compile"));

/// Verifica que el dominio sea solo letras ASCII
///
/// # Ejemplo
/// ```
/// use site_server::handlers::is_valid_domain;
///
/// assert!(is_valid_domain("demo"));
/// assert!(!is_valid_domain(""));
/// assert!(!is_valid_domain(".."));
/// assert!(!is_valid_domain("a/b"));
/// assert!(!is_valid_domain("site1"));
/// ```
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_PATTERN.is_match(domain)
}

fn validate_domain(domain: &str) -> Result<(), RouteError> {
    if is_valid_domain(domain) {
        Ok(())
    } else {
        Err(RouteError::PathTraversalRejected(domain.to_string()))
    }
}

/// Content type según la extensión; `None` si no se puede servir
fn content_type_for(asset: &str) -> Option<&'static str> {
    let (_, ext) = asset.rsplit_once('.')?;

    match ext.to_ascii_lowercase().as_str() {
        "html" => Some("text/html"),
        "css" => Some("text/css"),
        _ => None,
    }
}

/// Handler para `GET /site/{dominio}[/{asset}]`
pub fn site_handler(_req: &Request, suffix: &str, ctx: &RouteContext) -> Result<Response, RouteError> {
    let segments: Vec<&str> = suffix.split('/').collect();

    let (domain, asset) = match segments.as_slice() {
        [domain] | [domain, ""] => (*domain, INDEX_ASSET),
        [domain, asset] => (*domain, *asset),
        _ => return Err(RouteError::NotFound(format!("/site/{}", suffix))),
    };

    validate_domain(domain)?;
    let content_type =
        content_type_for(asset).ok_or_else(|| RouteError::UnsupportedAsset(asset.to_string()))?;

    let path = PathBuf::from(domain).join(asset);
    if !ctx.store().exists(&path) {
        return Err(RouteError::NotFound(path.display().to_string()));
    }

    tracing::debug!(domain, asset, "serving site asset");
    let body = ctx.store().read_all(&path)?;

    Ok(Response::new(StatusCode::Ok)
        .with_body_bytes(body)
        .with_content_type(content_type))
}

/// Handler para `POST /add-html/{dominio}`
///
/// Sin body se escribe una página mínima con el nombre del dominio.
pub fn add_html_handler(req: &Request, suffix: &str, ctx: &RouteContext) -> Result<Response, RouteError> {
    let fallback = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{0}</title></head>\n<body><h1>{0}</h1></body>\n</html>\n",
        suffix
    );
    publish_asset(req, suffix, ctx, INDEX_ASSET, &fallback)
}

/// Handler para `POST /add-css/{dominio}`
pub fn add_css_handler(req: &Request, suffix: &str, ctx: &RouteContext) -> Result<Response, RouteError> {
    publish_asset(req, suffix, ctx, STYLE_ASSET, "/* empty stylesheet */\n")
}

fn publish_asset(
    req: &Request,
    domain: &str,
    ctx: &RouteContext,
    asset: &str,
    fallback: &str,
) -> Result<Response, RouteError> {
    validate_domain(domain)?;

    let contents = req.body().unwrap_or(fallback);
    let path = Path::new(domain).join(asset);

    ctx.locks().with_lock(domain, || {
        ctx.store().ensure_dir(Path::new(domain))?;
        ctx.store().write_all(&path, contents.as_bytes())
    })?;

    tracing::info!(domain, asset, bytes = contents.len(), "asset published");
    Ok(Response::new(StatusCode::Ok))
}
