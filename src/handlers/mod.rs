//! # Handlers del Servidor
//!
//! - **basic**: rutas sin estado (`/`, `/get-sum/`, `/echo/`)
//! - **site**: rutas que usan el file-store (`/site/`, `/add-html/`, `/add-css/`)
//!
//! Cada handler recibe el request, el sufijo del path después del patrón
//! de la ruta y el [`RouteContext`](crate::router::RouteContext).

pub mod basic;
pub mod site;

pub use basic::*;
pub use site::*;
