//! Constantes del log.
//!
//! No hay una capacidad universal: cada instancia lógica elige la suya vía
//! `LogConfig`; acá viven los valores por defecto de cada punto de uso.

/// Capacidad del log principal de visitas y actividad.
pub const DEFAULT_CAPACITY: usize = 1000;
/// Capacidad del log de interacciones (clicks, scroll, formularios).
pub const INTERACTION_LOG_CAPACITY: usize = 500;
/// Capacidad del log de sesiones.
pub const SESSION_LOG_CAPACITY: usize = 50;

/// Claves de almacenamiento por instancia lógica.
pub const VISITOR_LOG_KEY: &str = "visitor_logs";
pub const INTERACTION_LOG_KEY: &str = "visitor_interactions";
pub const SESSION_LOG_KEY: &str = "visitor_sessions";

/// Intervalo del registro periódico de actividad.
pub const ACTIVITY_INTERVAL_SECS: u64 = 30;
/// Paso de los hitos de scroll (25%, 50%, 75%, 100%).
pub const SCROLL_MILESTONE_STEP: u8 = 25;

/// Prefijo de los archivos de export (`visitor-logs-<fecha>.<ext>`).
pub const EXPORT_FILE_PREFIX: &str = "visitor-logs";
