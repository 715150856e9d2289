//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Lee y parsea un request por conexión
//! 4. Genera, envía la response y cierra

pub mod tcp;

pub use tcp::{spawn_background, Server};
