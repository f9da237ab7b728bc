//! Carga de configuración del store desde variables de entorno.
//! Usa convención `VISITLOG_DATA_DIR` y cuota opcional por entrada.

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub quota_bytes: Option<u64>,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let data_dir = env::var("VISITLOG_DATA_DIR").map(PathBuf::from)
                                                    .unwrap_or_else(|_| PathBuf::from(".visitlog"));
        let quota_bytes = env::var("VISITLOG_QUOTA_BYTES").ok().and_then(|v| v.parse().ok());
        Self { data_dir, quota_bytes }
    }

    pub fn with_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), quota_bytes: None }
    }

    pub fn quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = Some(quota_bytes);
        self
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
