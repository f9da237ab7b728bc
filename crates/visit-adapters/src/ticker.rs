//! Tick periódico de actividad.
//!
//! En un navegador esto sería un `setInterval` implícito cancelado por el
//! unload de la página. Acá es una suscripción explícita: un task tokio que
//! appendea un registro `activity` por intervalo y un handle con
//! `shutdown()` para teardown limpio desde tests o hosts no-browser.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::warn;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use visit_core::constants::ACTIVITY_INTERVAL_SECS;
use visit_core::{EventLog, KvStore};
use visit_domain::{ClientEnv, Session};

use crate::collect::activity_record;

pub struct ActivityTicker {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ActivityTicker {
    /// Intervalo de producción entre ticks de actividad.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(ACTIVITY_INTERVAL_SECS);

    /// `spawn` con el intervalo por defecto.
    pub fn spawn_default<S>(log: Arc<Mutex<EventLog<S>>>, env: ClientEnv, session: Session) -> Self
        where S: KvStore + Send + 'static
    {
        Self::spawn(log, env, session, Self::DEFAULT_INTERVAL)
    }

    /// Lanza el task periódico. El primer registro se emite recién al cumplir
    /// el primer intervalo, no de inmediato (semántica de `setInterval`).
    pub fn spawn<S>(log: Arc<Mutex<EventLog<S>>>,
                    env: ClientEnv,
                    session: Session,
                    interval: Duration)
                    -> Self
        where S: KvStore + Send + 'static
    {
        let (stop, mut stopped) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticks = tokio::time::interval_at(start, interval);
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        match log.lock() {
                            Ok(mut guard) => guard.append(activity_record(&env, &session)),
                            Err(poisoned) => {
                                warn!("event log mutex poisoned, stopping activity ticker");
                                drop(poisoned);
                                break;
                            }
                        }
                    }
                    _ = stopped.changed() => break,
                }
            }
        });
        Self { stop, handle }
    }

    /// Cancela el intervalo y espera a que el task termine.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}
