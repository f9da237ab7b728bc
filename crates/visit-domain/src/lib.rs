// visit-domain library entry point
pub mod browser;
pub mod client;
pub mod record;
pub mod session;
pub use browser::browser_family;
pub use client::ClientEnv;
pub use record::{FieldValue, Record, RecordDraft, RecordKind};
pub use session::Session;
