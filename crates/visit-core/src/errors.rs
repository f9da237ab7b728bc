//! Errores del core (simples por ahora).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("unknown export format: {0}")] UnknownFormat(String),
    #[error("export io: {0}")] ExportIo(String),
    #[error("internal: {0}")] Internal(String),
}
