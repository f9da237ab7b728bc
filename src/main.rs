//! Demo de una "carga de página" completa: visita, sesión, interacciones,
//! ticker de actividad, teardown y export.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use visit_adapters::{click_record, page_exit_record, scroll_depth_record, session_record,
                     time_on_page_record, visit_record, ActivityTicker, BestEffortCounter,
                     ElementDescriptor, LocalCounter, ScrollTracker};
use visit_core::constants::{DEFAULT_CAPACITY, INTERACTION_LOG_CAPACITY, INTERACTION_LOG_KEY,
                            SESSION_LOG_CAPACITY, SESSION_LOG_KEY, VISITOR_LOG_KEY};
use visit_core::export::{self, ExportFormat};
use visit_core::{stats, EventLog, InMemoryKvStore, LogConfig};
use visit_domain::{ClientEnv, Session};

#[tokio::main]
async fn main() {
    let env = ClientEnv { page: "https://example.com/portfolio".into(),
                          path: "/portfolio".into(),
                          referrer: Some("https://duckduckgo.com/".into()),
                          user_agent: "Mozilla/5.0 AppleWebKit/537.36 Chrome/120.0 Safari/537.36".into(),
                          language: "es-DO".into(),
                          timezone: "America/Santo_Domingo".into(),
                          screen_resolution: "1920x1080".into(),
                          viewport_size: "1280x720".into(),
                          connection_type: Some("4g".into()),
                          cookie_enabled: true,
                          online_status: true };
    let session = Session::start();

    // Un solo tipo de log parametrizado por (clave, capacidad) sirve a las
    // tres instancias lógicas: visitas, interacciones y sesiones.
    let visit_log = Arc::new(Mutex::new(EventLog::open(InMemoryKvStore::default(),
                                                       LogConfig::new(VISITOR_LOG_KEY, DEFAULT_CAPACITY))));
    let mut interaction_log = EventLog::open(InMemoryKvStore::default(),
                                             LogConfig::new(INTERACTION_LOG_KEY, INTERACTION_LOG_CAPACITY));
    let mut session_log = EventLog::open(InMemoryKvStore::default(),
                                         LogConfig::new(SESSION_LOG_KEY, SESSION_LOG_CAPACITY));

    // contador externo best-effort: sus fallas jamás afectan a los logs
    let mut counter = BestEffortCounter::new(LocalCounter::default());
    counter.hit("visitor_count");
    counter.hit("page_views");

    // visita inicial + apertura de sesión + algunas interacciones
    visit_log.lock().expect("log mutex").append(visit_record(&env, &session));
    session_log.append(session_record(&env, &session));

    let cta = ElementDescriptor { tag: "A".into(),
                                  id: Some("contact".into()),
                                  class_name: Some("btn btn-primary".into()),
                                  ..Default::default() };
    interaction_log.append(click_record(&env.path, &cta, 412.0, 233.0, &session));

    let mut scroll = ScrollTracker::new();
    for depth in [10, 25, 60, 75, 100] {
        if let Some(milestone) = scroll.observe(depth) {
            interaction_log.append(scroll_depth_record(&env.path, milestone, &session));
        }
    }

    // ticker periódico (intervalo corto para la demo; los hosts reales usan
    // ActivityTicker::DEFAULT_INTERVAL) y teardown limpio
    let ticker = ActivityTicker::spawn(visit_log.clone(), env.clone(), session.clone(),
                                       Duration::from_millis(200));
    tokio::time::sleep(Duration::from_millis(700)).await;
    ticker.shutdown().await;

    {
        let mut guard = visit_log.lock().expect("log mutex");
        let seconds = session.time_on_page(chrono::Utc::now());
        guard.append(time_on_page_record(&env.path, seconds, &session));
        guard.append(page_exit_record(&env, &session));
    }

    let guard = visit_log.lock().expect("log mutex");
    println!("== visitas: {} (capacity {}) | interacciones: {} | sesiones: {} ==",
             guard.len(), guard.capacity(), interaction_log.len(), session_log.len());
    let mut records = guard.records().to_vec();
    records.extend_from_slice(interaction_log.records());
    let stats = stats::compute(&records);
    println!("{}", serde_json::to_string_pretty(&stats).expect("stats json"));

    println!("== export {} ==", export::file_name(ExportFormat::Json, chrono::Utc::now().date_naive()));
    println!("{}", export::render(guard.records(), ExportFormat::Json).expect("render export"));
    println!("visitor_count={} page_views={}", counter.get("visitor_count"), counter.get("page_views"));
}
