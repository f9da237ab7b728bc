//! visit-adapters: fuentes de eventos que alimentan el `EventLog`.
//!
//! El log no genera registros por sí mismo; estos adaptadores son los
//! productores: la visita inicial con snapshot del cliente, las
//! interacciones (click/form/scroll/tiempo en página), el tick periódico de
//! actividad y el contador externo best-effort.

pub mod collect;
pub mod counter;
pub mod ticker;

pub use collect::{activity_record, page_exit_record, session_record, visit_record};
pub use collect::{click_record, form_submit_record, scroll_depth_record, time_on_page_record};
pub use collect::{ElementDescriptor, ScrollTracker};
pub use counter::{BestEffortCounter, CounterError, HitCounter, LocalCounter};
pub use ticker::ActivityTicker;
