//! Store en memoria, útil para probar el router sin tocar disco.

use super::{SiteStore, StoreError};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MemoryData {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
}

/// Implementación de [`SiteStore`] sobre un `HashMap`
///
/// Igual que en disco, escribir un archivo exige que su directorio exista.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Precarga un archivo (crea su directorio padre)
    pub fn with_file(self, path: &str, contents: &[u8]) -> Self {
        {
            let mut data = self.data();
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                data.dirs.insert(parent.to_path_buf());
            }
            data.files.insert(path, contents.to_vec());
        }
        self
    }

    /// Cantidad de archivos almacenados
    pub fn file_count(&self) -> usize {
        self.data().files.len()
    }

    pub fn dir_count(&self) -> usize {
        self.data().dirs.len()
    }

    fn data(&self) -> MutexGuard<'_, MemoryData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SiteStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.data().files.contains_key(path)
    }

    fn read_all(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        self.data()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn write_all(&self, path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        let mut data = self.data();
        let parent = path.parent().unwrap_or_else(|| Path::new(""));

        if !parent.as_os_str().is_empty() && !data.dirs.contains(parent) {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("directory {} does not exist", parent.display()),
            )));
        }

        data.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> Result<(), StoreError> {
        self.data().dirs.insert(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemoryStore::new();
        store.ensure_dir(Path::new("demo")).unwrap();
        store.write_all(Path::new("demo/index.html"), b"hi").unwrap();

        assert!(store.exists(Path::new("demo/index.html")));
        assert_eq!(store.read_all(Path::new("demo/index.html")).unwrap(), b"hi");
    }

    #[test]
    fn test_write_requires_dir() {
        let store = MemoryStore::new();
        let result = store.write_all(Path::new("demo/index.html"), b"hi");

        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.file_count(), 0);
    }

    #[test]
    fn test_with_file() {
        let store = MemoryStore::new().with_file("demo/style.css", b"p {}");

        assert_eq!(store.dir_count(), 1);
        assert!(matches!(
            store.read_all(Path::new("demo/index.html")),
            Err(StoreError::NotFound(_))
        ));
    }
}
