//! Periodic expiry of stale cache entries

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::service::LegalResponseCacheService;

/// Run `cleanup_expired_entries` every `period` until the handle is aborted
pub fn spawn_expiry_task(
    service: Arc<LegalResponseCacheService>,
    period: Duration,
) -> JoinHandle<()> {
    info!("Starting legal cache expiry task every {:?}", period);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick fires immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = service.cleanup_expired_entries();
            debug!("Expiry sweep removed {} legal cache entries", removed);
        }
    })
}
