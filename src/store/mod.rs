//! # File-store de Sitios
//! src/store/mod.rs
//!
//! El router no toca el sistema de archivos directamente: usa un
//! [`SiteStore`] inyectado. Las rutas que recibe son relativas a la raíz
//! del store (ej: `demo/index.html`).
//!
//! ## Layout en disco
//!
//! ```text
//! wwwroot/
//! ├── demo/
//! │   ├── index.html
//! │   └── style.css
//! └── otro/
//!     └── index.html
//! ```
//!
//! - `disk`: implementación real sobre un directorio raíz
//! - `memory`: implementación en memoria para tests
//! - `locks`: exclusión mutua por dominio para las escrituras

pub mod disk;
pub mod locks;
pub mod memory;

pub use disk::DiskStore;
pub use locks::DomainLocks;
pub use memory::MemoryStore;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errores del file-store
#[derive(Debug, Error)]
pub enum StoreError {
    /// El archivo pedido no existe
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Cualquier otra falla de I/O
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Colaborador de almacenamiento que usan `/site/`, `/add-html/` y `/add-css/`
pub trait SiteStore: Send + Sync {
    /// `true` si existe un archivo regular en `path`
    fn exists(&self, path: &Path) -> bool;

    /// Lee el contenido completo del archivo
    fn read_all(&self, path: &Path) -> Result<Vec<u8>, StoreError>;

    /// Crea o sobrescribe el archivo con `contents`
    fn write_all(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError>;

    /// Crea el directorio (y sus padres) si no existe
    fn ensure_dir(&self, path: &Path) -> Result<(), StoreError>;
}
