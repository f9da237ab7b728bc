//! Contador de visitas best-effort.
//!
//! El hit a un servicio externo de conteo es fire-and-forget: ante cualquier
//! falla el conteo local sigue funcionando. El trait es la costura donde iría
//! un cliente remoto; el wrapper `BestEffortCounter` absorbe toda falla y
//! nunca toca el estado del `EventLog`.

use log::debug;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("counter unavailable: {0}")]
    Unavailable(String),
}

pub trait HitCounter {
    /// Incrementa el contador bajo `key` y devuelve el valor resultante.
    fn hit(&mut self, key: &str) -> Result<u64, CounterError>;
    /// Lee el contador sin incrementar.
    fn get(&self, key: &str) -> Result<u64, CounterError>;
}

/// Contador local en memoria (el "local tracking" que siempre funciona).
#[derive(Debug, Default)]
pub struct LocalCounter {
    counts: HashMap<String, u64>,
}

impl HitCounter for LocalCounter {
    fn hit(&mut self, key: &str) -> Result<u64, CounterError> {
        let entry = self.counts.entry(key.to_string()).or_insert(0);
        *entry += 1;
        Ok(*entry)
    }

    fn get(&self, key: &str) -> Result<u64, CounterError> {
        Ok(self.counts.get(key).copied().unwrap_or(0))
    }
}

/// Wrapper que degrada toda falla a un no-op silencioso (sólo `debug!`).
pub struct BestEffortCounter<C: HitCounter> {
    inner: C,
}

impl<C: HitCounter> BestEffortCounter<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// `None` cuando el backend falló; el conteo local sigue sin afectarse.
    pub fn hit(&mut self, key: &str) -> Option<u64> {
        match self.inner.hit(key) {
            Ok(v) => Some(v),
            Err(e) => {
                debug!("counter hit '{key}' failed (ignored): {e}");
                None
            }
        }
    }

    /// Lectura con 0 como fallback ante falla.
    pub fn get(&self, key: &str) -> u64 {
        match self.inner.get(key) {
            Ok(v) => v,
            Err(e) => {
                debug!("counter read '{key}' failed (ignored): {e}");
                0
            }
        }
    }
}
