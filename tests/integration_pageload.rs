//! Ciclo de vida completo contra el backend de archivos: dos "cargas de
//! página" consecutivas comparten el mismo log durable y las estadísticas
//! agregan ambas sesiones.

use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use visit_adapters::{click_record, page_exit_record, session_record, visit_record, ActivityTicker,
                     ElementDescriptor};
use visit_core::constants::{SESSION_LOG_CAPACITY, SESSION_LOG_KEY};
use visit_core::{stats, EventLog, LogConfig};
use visit_domain::{ClientEnv, RecordKind, Session};
use visit_persistence::{FileKvStore, StoreConfig};

fn client(user_agent: &str, referrer: Option<&str>) -> ClientEnv {
    ClientEnv { page: "https://example.com/".into(),
                path: "/".into(),
                referrer: referrer.map(str::to_string),
                user_agent: user_agent.into(),
                language: "en-US".into(),
                timezone: "UTC".into(),
                screen_resolution: "1920x1080".into(),
                viewport_size: "1280x720".into(),
                connection_type: None,
                cookie_enabled: true,
                online_status: true }
}

fn temp_config() -> StoreConfig {
    let dir = std::env::temp_dir().join(format!("visitflow-it-{}", uuid::Uuid::new_v4()));
    StoreConfig::with_dir(dir)
}

async fn simulate_page_load(config: &StoreConfig, env: ClientEnv) {
    let store = FileKvStore::open(config).unwrap();
    let session = Session::start();
    let log = Arc::new(Mutex::new(EventLog::open(store, LogConfig::new("visitor_logs", 100))));

    let session_store = FileKvStore::open(config).unwrap();
    let mut session_log = EventLog::open(session_store,
                                         LogConfig::new(SESSION_LOG_KEY, SESSION_LOG_CAPACITY));
    session_log.append(session_record(&env, &session));

    log.lock().unwrap().append(visit_record(&env, &session));
    let ticker = ActivityTicker::spawn(log.clone(), env.clone(), session.clone(),
                                       Duration::from_millis(15));
    tokio::time::sleep(Duration::from_millis(40)).await;
    ticker.shutdown().await;

    let mut guard = log.lock().unwrap();
    let el = ElementDescriptor { tag: "A".into(), id: Some("cta".into()), ..Default::default() };
    guard.append(click_record(&env.path, &el, 5.0, 6.0, &session));
    guard.append(page_exit_record(&env, &session));
}

#[tokio::test]
async fn two_page_loads_accumulate_in_the_same_durable_log() {
    let config = temp_config();
    simulate_page_load(&config, client("Chrome/120 Safari/537", None)).await;
    simulate_page_load(&config, client("Gecko Firefox/121", Some("https://news.ycombinator.com/"))).await;

    // tercera apertura, sólo lectura
    let store = FileKvStore::open(&config).unwrap();
    let log = EventLog::open(store, LogConfig::new("visitor_logs", 100));
    let stats = stats::compute(log.records());

    assert_eq!(stats.total_visits, 2);
    assert_eq!(stats.unique_sessions, 2);
    assert_eq!(stats.browsers.get("Chrome"), Some(&1));
    assert_eq!(stats.browsers.get("Firefox"), Some(&1));
    assert_eq!(stats.by_kind.get(&RecordKind::PageExit), Some(&2));
    assert_eq!(stats.by_kind.get(&RecordKind::Click), Some(&2));
    // hubo al menos un tick de actividad por carga
    assert!(stats.by_kind.get(&RecordKind::Activity).copied().unwrap_or(0) >= 2);
    // la visita sin referrer cae en Direct; la otra conserva el suyo
    assert!(stats.referrers.get("Direct").copied().unwrap_or(0) >= 1);
    assert_eq!(stats.referrers.get("https://news.ycombinator.com/"), Some(&1));

    // el log de sesiones acumuló una apertura por carga, con ids distintos
    let session_store = FileKvStore::open(&config).unwrap();
    let session_log = EventLog::open(session_store,
                                     LogConfig::new(SESSION_LOG_KEY, SESSION_LOG_CAPACITY));
    assert_eq!(session_log.len(), 2);
    assert!(session_log.records().iter().all(|r| r.kind == RecordKind::SessionStart));
    assert!(session_log.records()
                       .iter()
                       .all(|r| r.field_str("landingPage") == Some("https://example.com/")));
    assert_ne!(session_log.records()[0].session_id, session_log.records()[1].session_id);

    let _ = fs::remove_dir_all(config.data_dir);
}
