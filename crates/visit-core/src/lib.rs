//! visit-core: log de eventos acotado con espejo durable
pub mod constants;
pub mod errors;
pub mod event_log;
pub mod export;
pub mod stats;
pub mod store;

pub use errors::LogError;
pub use event_log::{EventLog, LogConfig};
pub use export::{ExportFormat, JsonExport};
pub use stats::LogStats;
pub use store::{InMemoryKvStore, KvStore, StoreError};
