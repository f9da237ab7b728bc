//! `EventLog`: secuencia append-only acotada con espejo durable.
//!
//! Invariantes:
//! - `records.len() <= capacity` después de cada mutación.
//! - El desborde descarta primero los registros más viejos (FIFO), sin
//!   reordenar ni corromper el resto.
//! - La copia en memoria es la fuente de verdad de la carga actual: un fallo
//!   de persistencia degrada a "sólo memoria" y se reporta por `log::warn!`,
//!   nunca interrumpe al caller.

use chrono::Utc;
use log::warn;
use visit_domain::{Record, RecordDraft};

use crate::store::{KvStore, StoreError};

/// Configuración de una instancia lógica de log: clave de almacenamiento y
/// capacidad máxima. Cada punto de uso arma la suya (ver `constants`).
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub storage_key: String,
    pub capacity: usize,
}

impl LogConfig {
    pub fn new(storage_key: impl Into<String>, capacity: usize) -> Self {
        Self { storage_key: storage_key.into(), capacity }
    }
}

pub struct EventLog<S: KvStore> {
    config: LogConfig,
    records: Vec<Record>,
    store: S,
}

impl<S: KvStore> EventLog<S> {
    /// Rehidrata el log desde el store. Valor ausente o ilegible arranca en
    /// vacío: es una condición recuperable, nunca fatal.
    pub fn open(store: S, config: LogConfig) -> Self {
        let records = match store.get(&config.storage_key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Record>>(&raw) {
                Ok(recs) => recs,
                Err(e) => {
                    warn!("stored value under '{}' is not a valid record list, starting empty: {e}",
                          config.storage_key);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("store read failed for '{}', starting empty: {e}", config.storage_key);
                Vec::new()
            }
        };
        let mut log = Self { config, records, store };
        // Si la capacidad configurada bajó entre cargas, el invariante se
        // restablece acá mismo.
        if log.records.len() > log.config.capacity {
            log.evict_overflow();
            log.persist();
        }
        log
    }

    /// Sella el borrador y lo agrega a la cola. Si se excede la capacidad se
    /// descarta desde la cabeza (keep-last-N) y luego se persiste la
    /// secuencia completa. El fallo de persistencia no revierte el append.
    pub fn append(&mut self, draft: RecordDraft) {
        let record = draft.stamp(Utc::now());
        self.records.push(record);
        self.evict_overflow();
        self.persist();
    }

    fn evict_overflow(&mut self) {
        if self.records.len() > self.config.capacity {
            let excess = self.records.len() - self.config.capacity;
            self.records.drain(..excess);
        }
    }

    fn persist(&mut self) {
        let serialized = match serde_json::to_string(&self.records) {
            Ok(s) => s,
            Err(e) => {
                warn!("could not serialize log '{}': {e}", self.config.storage_key);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.config.storage_key, &serialized) {
            match e {
                StoreError::QuotaExceeded(detail) => {
                    warn!("quota exceeded persisting '{}' ({detail}); log stays in-memory only",
                          self.config.storage_key);
                }
                other => {
                    warn!("persist failed for '{}': {other}; log stays in-memory only",
                          self.config.storage_key);
                }
            }
        }
    }

    /// Vacía la secuencia y elimina la entrada persistida. Irreversible.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Err(e) = self.store.remove(&self.config.storage_key) {
            warn!("could not remove persisted entry '{}': {e}", self.config.storage_key);
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Devuelve el store (para reabrir el mismo backend en tests).
    pub fn into_store(self) -> S {
        self.store
    }
}
