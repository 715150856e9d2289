//! # Headers HTTP
//! src/http/headers.rs
//!
//! Mapa de headers que normaliza nombre y valor a minúsculas al insertar.
//! El plegado es solo ASCII, así que no depende del locale.

use std::collections::HashMap;

/// Headers de un request, con claves y valores en minúsculas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: HashMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta un header. Si el nombre ya existía, el valor anterior se pierde.
    ///
    /// # Ejemplo
    /// ```
    /// use site_server::http::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("Two-Numbers", "3,4");
    /// headers.insert("TWO-NUMBERS", "5,6");
    /// assert_eq!(headers.get("two-numbers"), Some("5,6"));
    /// assert_eq!(headers.len(), 1);
    /// ```
    pub fn insert(&mut self, name: &str, value: &str) {
        self.inner
            .insert(name.to_ascii_lowercase(), value.to_ascii_lowercase());
    }

    /// Busca un header sin distinguir mayúsculas
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_lowercases_name_and_value() {
        let mut headers = Headers::new();
        headers.insert("Host", "LocalHost:4321");

        assert_eq!(headers.get("host"), Some("localhost:4321"));
        assert_eq!(headers.get("HOST"), Some("localhost:4321"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let mut headers = Headers::new();
        headers.insert("Accept", "text/html");
        headers.insert("accept", "*/*");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Accept"), Some("*/*"));
    }

    #[test]
    fn test_non_ascii_left_untouched() {
        let mut headers = Headers::new();
        headers.insert("X-Name", "ÁRBOL");

        // Solo se pliegan letras ASCII
        assert_eq!(headers.get("x-name"), Some("Árbol"));
    }

    #[test]
    fn test_empty() {
        let headers = Headers::new();
        assert!(headers.is_empty());
        assert_eq!(headers.get("host"), None);
    }
}
