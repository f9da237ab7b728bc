//! Implementación filesystem del trait `KvStore` del core.
//!
//! Objetivo: paridad 1:1 con el backend en memoria.
//! - Una clave lógica = un archivo `<clave>.json` bajo el directorio de
//!   datos (la clave se sanitiza a `[A-Za-z0-9._-]`).
//! - Escritura vía archivo temporal + rename: una lectura concurrente ve el
//!   valor anterior completo o el nuevo completo, nunca uno a medias.
//! - Cuota opcional por entrada; superarla devuelve `QuotaExceeded`, el
//!   valor anterior queda intacto.

use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use visit_core::{KvStore, StoreError};

use crate::config::StoreConfig;
use crate::error::PersistenceError;

pub struct FileKvStore {
    dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileKvStore {
    /// Crea el store asegurando que el directorio de datos exista.
    pub fn open(config: &StoreConfig) -> Result<Self, PersistenceError> {
        fs::create_dir_all(&config.data_dir)?;
        debug!("file store at {}", config.data_dir.display());
        Ok(Self { dir: config.data_dir.clone(), quota_bytes: config.quota_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let sanitized: String = key.chars()
                                   .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
                                   .collect();
        self.dir.join(format!("{sanitized}.json"))
    }

    fn write_atomic(&self, path: &Path, value: &str) -> Result<(), PersistenceError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota_bytes {
            if value.len() as u64 > quota {
                return Err(StoreError::QuotaExceeded(format!("{} > {quota} bytes for '{key}'",
                                                             value.len())));
            }
        }
        self.write_atomic(&self.entry_path(key), value).map_err(|e| {
                                                           warn!("write failed for '{key}': {e}");
                                                           StoreError::from(e)
                                                       })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::from(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> StoreConfig {
        let dir = std::env::temp_dir().join(format!("visitlog-test-{}", uuid::Uuid::new_v4()));
        StoreConfig::with_dir(dir)
    }

    #[test]
    fn set_get_remove_on_disk() {
        let config = temp_config();
        let mut store = FileKvStore::open(&config).unwrap();
        store.set("visitor_logs", "[1,2]").unwrap();
        assert_eq!(store.get("visitor_logs").unwrap().as_deref(), Some("[1,2]"));
        store.remove("visitor_logs").unwrap();
        assert_eq!(store.get("visitor_logs").unwrap(), None);
        store.remove("visitor_logs").unwrap(); // idempotente
        let _ = fs::remove_dir_all(config.data_dir);
    }

    #[test]
    fn keys_are_sanitized_to_safe_file_names() {
        let config = temp_config();
        let mut store = FileKvStore::open(&config).unwrap();
        store.set("weird/key name", "x").unwrap();
        assert_eq!(store.get("weird/key name").unwrap().as_deref(), Some("x"));
        assert!(config.data_dir.join("weird_key_name.json").exists());
        let _ = fs::remove_dir_all(config.data_dir);
    }

    #[test]
    fn per_entry_quota_is_enforced() {
        let config = temp_config().quota(4);
        let mut store = FileKvStore::open(&config).unwrap();
        let err = store.set("k", "12345").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded(_)));
        assert_eq!(store.get("k").unwrap(), None);
        let _ = fs::remove_dir_all(config.data_dir);
    }
}
