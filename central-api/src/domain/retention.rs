//! Background worker that purges activity log entries past retention.

use std::{sync::Arc, time::Duration};

use tracing::{error, info};

use super::ports::inbound::ActivityLogService;

/// Runs the activity log purge every `interval`, forever.
///
/// The first purge happens right away so a restarted server catches up.
/// Failures are logged and retried on the next tick.
pub async fn run_activity_log_retention(service: Arc<dyn ActivityLogService>, interval: Duration) {
    info!(
        interval_secs = interval.as_secs(),
        "Activity log retention task started"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match service.purge_expired().await {
            Ok(purged) => {
                tracing::debug!(purged, "Activity log retention cycle completed");
            }
            Err(e) => {
                error!("Activity log retention cycle failed: {}", e);
            }
        }
    }
}
