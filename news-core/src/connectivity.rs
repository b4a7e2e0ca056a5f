use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::NewsApi;
use crate::error::MonitorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// No probe has completed yet.
    Unknown,
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_offline(self) -> bool {
        self == Connectivity::Offline
    }
}

/// Floor for the probe interval; `tokio::time::interval` rejects zero.
const MIN_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy)]
pub struct MonitorConfig {
    pub interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

pub struct MonitorHandle {
    cancel_tx: broadcast::Sender<()>,
    join: JoinHandle<()>,
    status: watch::Receiver<Connectivity>,
}

impl MonitorHandle {
    pub fn status(&self) -> Connectivity {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Connectivity> {
        self.status.clone()
    }

    pub async fn stop(self) -> Result<(), MonitorError> {
        let _ = self.cancel_tx.send(());
        self.join.await.map_err(MonitorError::from)
    }
}

/// One health probe against the backend.
pub async fn probe_once(api: &dyn NewsApi) -> Connectivity {
    match api.check_health().await {
        Ok(health) => {
            debug!(status = %health.status, "health check ok");
            Connectivity::Online
        }
        Err(err) => {
            debug!(error = %err, "health check failed");
            Connectivity::Offline
        }
    }
}

/// Probes the backend on every tick and publishes transitions.
pub fn spawn_connectivity_monitor(api: Arc<dyn NewsApi>, config: MonitorConfig) -> MonitorHandle {
    let (cancel_tx, mut cancel_rx) = broadcast::channel(1);
    let (status_tx, status) = watch::channel(Connectivity::Unknown);
    let join = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel_rx.recv() => {
                    info!("connectivity monitor shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    let next = probe_once(api.as_ref()).await;
                    let changed = status_tx.send_if_modified(|current| {
                        let changed = *current != next;
                        *current = next;
                        changed
                    });
                    if changed {
                        match next {
                            Connectivity::Offline => warn!("backend unreachable, now offline"),
                            _ => info!(?next, "connectivity changed"),
                        }
                    }
                }
            }
        }
    });

    MonitorHandle {
        cancel_tx,
        join,
        status,
    }
}
