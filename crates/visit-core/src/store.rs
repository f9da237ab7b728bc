//! Trait `KvStore` y backend en memoria.
//!
//! El store modela el almacenamiento clave/valor del navegador: strings por
//! clave, scoped por origen, con cuota finita. El backend durable de archivos
//! vive en `visit-persistence`; este módulo sólo define el contrato y la
//! implementación en memoria (con cuota opcional para simular
//! `quota_exceeded` en tests).

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("io: {0}")]
    Io(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// Contrato: `get` devuelve el blob tal cual se guardó o `None` si la clave
/// no existe; `set` reemplaza el valor completo o falla con `QuotaExceeded`;
/// `remove` es idempotente.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

pub struct InMemoryKvStore {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self { entries: HashMap::new(), quota_bytes: None }
    }
}

impl InMemoryKvStore {
    /// Store con cuota total en bytes (suma de claves + valores), al estilo
    /// de la cuota por origen del navegador.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self { entries: HashMap::new(), quota_bytes: Some(quota_bytes) }
    }

    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota_bytes {
            let old = self.entries.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let projected = self.used_bytes() - old + key.len() + value.len();
            if projected > quota {
                return Err(StoreError::QuotaExceeded(format!("{projected} > {quota} bytes")));
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
