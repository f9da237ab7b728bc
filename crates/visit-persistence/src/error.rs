//! Errores de persistencia.
//! Mapea errores de IO del filesystem a variantes semánticas y de ahí al
//! `StoreError` que espera el core.

use std::io;
use thiserror::Error;
use visit_core::StoreError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<io::Error> for PersistenceError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            // disco lleno se reporta como cuota: mismo contrato que el
            // quota_exceeded del storage del navegador
            io::ErrorKind::StorageFull => Self::QuotaExceeded(err.to_string()),
            _ => Self::Io(err.to_string()),
        }
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::QuotaExceeded(d) => StoreError::QuotaExceeded(d),
            PersistenceError::InvalidKey(d) => StoreError::Internal(format!("invalid key: {d}")),
            PersistenceError::Io(d) => StoreError::Io(d),
        }
    }
}
