//! Sesión de pestaña: id estable y reloj de tiempo en página.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Sesión viva de una "pestaña". El id se genera una sola vez al crearla y se
/// reutiliza en todos los registros de esa sesión; el instante de inicio
/// alimenta el campo `timeOnPage`.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Inicia una sesión nueva con un id fresco.
    pub fn start() -> Self {
        Self::start_at(Utc::now())
    }

    /// Variante con instante explícito (tests).
    pub fn start_at(started_at: DateTime<Utc>) -> Self {
        Self { id: new_session_id(started_at), started_at }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Segundos enteros transcurridos desde el inicio de la sesión.
    pub fn time_on_page(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_seconds().max(0)
    }
}

/// Genera un id con la forma `session_<millis>_<9 alfanuméricos>`.
fn new_session_id(now: DateTime<Utc>) -> String {
    let entropy = Uuid::new_v4().simple().to_string();
    format!("session_{}_{}", now.timestamp_millis(), &entropy[..9])
}
