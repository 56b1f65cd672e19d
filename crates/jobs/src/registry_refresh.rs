use std::sync::Arc;
use std::time::Duration;
use switchyard_application::ports::RegistryRefreshPort;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Reloads the registry snapshot on a fixed interval so lookups rarely find
/// it stale.
pub struct RegistryRefreshJob {
    registry: Arc<dyn RegistryRefreshPort>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl RegistryRefreshJob {
    pub fn new(registry: Arc<dyn RegistryRefreshPort>) -> Self {
        Self {
            registry,
            interval: DEFAULT_REFRESH_INTERVAL,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_ms = self.interval.as_millis() as u64, "Starting registry refresh job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("RegistryRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.registry.refresh().await {
                            Ok(outcome) if outcome.reloaded => {
                                debug!(records = outcome.records, "Registry refreshed");
                            }
                            Ok(_) => {
                                debug!("Registry refresh skipped, reload already in flight");
                            }
                            Err(e) => {
                                warn!(error = %e, "Registry refresh failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
