use async_trait::async_trait;

use crate::domain::{
    models::{ActivityLogEntry, StationId},
    ActivityLogError,
};

#[async_trait]
pub trait ActivityLogService: Send + Sync + 'static {
    /// Entries of the rolling window (24 hours by default), newest first.
    async fn recent(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<ActivityLogEntry>, ActivityLogError>;

    /// Delete entries older than the retention period.
    async fn purge_expired(&self) -> Result<u64, ActivityLogError>;
}
