//! visit-persistence
//!
//! Backend durable del `KvStore` del core: un archivo JSON por clave lógica
//! bajo un directorio de datos, con cuota opcional por entrada. Cumple el
//! mismo contrato que un `localStorage` de navegador: get/set/remove de
//! blobs string, con `quota_exceeded` como única falla de escritura
//! esperable.
//!
//! Módulos:
//! - `fs`: implementación de `KvStore` sobre el filesystem.
//! - `config`: carga de configuración desde variables de entorno / .env.
//! - `error`: mapeo de errores de IO a variantes semánticas.

pub mod config;
pub mod error;
pub mod fs;

pub use config::{init_dotenv, StoreConfig};
pub use error::PersistenceError;
pub use fs::FileKvStore;
