//! # Locks por Dominio
//! src/store/locks.rs
//!
//! Dos requests concurrentes sobre el mismo dominio no deben intercalar
//! `ensure_dir` + `write_all`. Cada dominio tiene su propio `Mutex`, así que
//! escrituras a dominios distintos no se bloquean entre sí.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registro de locks, uno por dominio
#[derive(Debug, Default)]
pub struct DomainLocks {
    // Las entradas nunca se eliminan: crece un lock por dominio válido
    // visto, igual que el store crece un directorio por dominio.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DomainLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtiene (o crea) el lock de un dominio
    pub fn lock_for(&self, domain: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(domain.to_string()).or_default())
    }

    /// Ejecuta `f` con el lock del dominio tomado
    pub fn with_lock<T>(&self, domain: &str, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(domain);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Cantidad de dominios con lock registrado
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
