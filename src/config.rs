//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración con soporte para argumentos CLI y variables de entorno.
//! Los valores por defecto reproducen el comportamiento fijo del servidor:
//! puerto 4321 en todas las interfaces, sitios bajo `./wwwroot` y lecturas
//! de hasta 1024 bytes.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./site_server --port 8080 --host 127.0.0.1 --site-root /srv/sites
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! SITE_SERVER_PORT=8080 READ_BUFFER_SIZE=8192 ./site_server
//! ```

use clap::Parser;

/// Tamaño máximo permitido para el buffer de lectura
pub const MAX_BUFFER_SIZE: usize = 64 * 1024;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "site_server")]
#[command(about = "Servidor HTTP/1.1 mínimo que sirve y publica sitios estáticos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4321", env = "SITE_SERVER_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha (0.0.0.0 = todas las interfaces)
    #[arg(long, default_value = "0.0.0.0", env = "SITE_SERVER_HOST")]
    pub host: String,

    /// Directorio raíz de los sitios (un subdirectorio por dominio)
    #[arg(long = "site-root", default_value = "./wwwroot", env = "SITE_ROOT")]
    pub site_root: String,

    /// Bytes que se leen del socket por conexión (una sola lectura)
    #[arg(long = "buffer-size", default_value = "1024", env = "READ_BUFFER_SIZE")]
    pub buffer_size: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use site_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4321");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port must be > 0".to_string());
        }
        if self.buffer_size == 0 {
            return Err("Buffer size must be >= 1".to_string());
        }
        if self.buffer_size > MAX_BUFFER_SIZE {
            return Err(format!("Buffer size must be <= {}", MAX_BUFFER_SIZE));
        }
        if self.site_root.trim().is_empty() {
            return Err("Site root must not be empty".to_string());
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        tracing::info!(
            address = %self.address(),
            site_root = %self.site_root,
            buffer_size = self.buffer_size,
            "configuration loaded"
        );
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4321,
            host: "0.0.0.0".to_string(),
            site_root: "./wwwroot".to_string(),
            buffer_size: 1024,
        }
    }
}
