//! Activity log port (outbound).
//!
//! The log is append-only: there is no update, and deletion only happens in
//! bulk by age.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{ActivityLogEntry, ActivityLogId, NewActivityLogEntry, StationId},
    ActivityLogError,
};

#[async_trait]
pub trait ActivityLogRepository: Send + Sync + 'static {
    async fn append(
        &self,
        entry: &NewActivityLogEntry,
        now: &OffsetDateTime,
    ) -> Result<ActivityLogId, ActivityLogError>;

    /// Entries for a station created at or after `since`, newest first.
    async fn list_since(
        &self,
        station_id: &StationId,
        since: &OffsetDateTime,
    ) -> Result<Vec<ActivityLogEntry>, ActivityLogError>;

    /// Delete entries created before `cutoff`. Returns the number removed.
    async fn purge_before(&self, cutoff: &OffsetDateTime) -> Result<u64, ActivityLogError>;
}
