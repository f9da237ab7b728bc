use std::path::PathBuf;

use visit_core::constants::DEFAULT_CAPACITY;
use visit_core::export::{self, ExportFormat};
use visit_core::{stats, EventLog, LogConfig};
use visit_persistence::{FileKvStore, StoreConfig};

fn main() {
    // Cargar .env si existe para obtener VISITLOG_DATA_DIR
    let _ = dotenvy::dotenv();
    // CLI mínima:
    //   visit export --key <KEY> --format <json|csv> [--out <PATH>] [--capacity <N>]
    //   visit stats  --key <KEY> [--capacity <N>]
    //   visit clear  --key <KEY>
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(2);
    }

    let mut key: Option<String> = None;
    let mut format: Option<String> = None;
    let mut out: Option<PathBuf> = None;
    let mut capacity: usize = DEFAULT_CAPACITY;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--key" => {
                i += 1;
                if i < args.len() { key = Some(args[i].clone()); }
            }
            "--format" => {
                i += 1;
                if i < args.len() { format = Some(args[i].clone()); }
            }
            "--out" => {
                i += 1;
                if i < args.len() { out = Some(PathBuf::from(&args[i])); }
            }
            "--capacity" => {
                i += 1;
                if i < args.len() { capacity = args[i].parse().unwrap_or(DEFAULT_CAPACITY); }
            }
            _ => {}
        }
        i += 1;
    }

    let key = match key {
        Some(k) => k,
        None => {
            usage();
            std::process::exit(2);
        }
    };

    let store = match FileKvStore::open(&StoreConfig::from_env()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[visit] store error: {e}");
            std::process::exit(5);
        }
    };
    let mut log = EventLog::open(store, LogConfig::new(key.as_str(), capacity));

    match args[1].as_str() {
        "export" => {
            let format = match ExportFormat::parse(format.as_deref().unwrap_or("json")) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("[visit export] {e}");
                    std::process::exit(2);
                }
            };
            let out = out.unwrap_or_else(|| {
                           PathBuf::from(export::file_name(format, chrono::Utc::now().date_naive()))
                       });
            // exportar es acción deliberada del usuario: acá el fallo SÍ se reporta
            match export::write_to(&out, log.records(), format) {
                Ok(()) => println!("exported {} records to {}", log.len(), out.display()),
                Err(e) => {
                    eprintln!("[visit export] {e}");
                    std::process::exit(5);
                }
            }
        }
        "stats" => {
            let stats = stats::compute(log.records());
            match serde_json::to_string_pretty(&stats) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => {
                    eprintln!("[visit stats] {e}");
                    std::process::exit(5);
                }
            }
        }
        "clear" => {
            let removed = log.len();
            log.clear();
            println!("cleared {removed} records under '{key}'");
        }
        other => {
            eprintln!("[visit] unknown command: {other}");
            usage();
            std::process::exit(2);
        }
    }
}

fn usage() {
    eprintln!("Uso: visit <export|stats|clear> --key <KEY> [--format json|csv] [--out <PATH>] [--capacity <N>]");
}
