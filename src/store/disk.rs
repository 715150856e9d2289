//! # Store en Disco
//! src/store/disk.rs
//!
//! Implementación de [`SiteStore`] sobre un directorio raíz (por defecto
//! `./wwwroot`). La raíz solo se lee después de construir el store, así que
//! se comparte entre threads sin sincronización.

use super::{SiteStore, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-store respaldado por el sistema de archivos
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Crea un store sobre `root`. El directorio se crea en la primera escritura.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl SiteStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_all(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        match fs::read(self.resolve(path)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(path.to_path_buf())),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write_all(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        fs::write(self.resolve(path), contents)?;
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }
}
