use std::sync::Arc;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use crate::domain::{
    models::{ActivityLogEntry, StationId},
    ports::{inbound::ActivityLogService, outbound::ActivityLogRepository},
    ActivityLogError,
};

pub struct ActivityLogServiceImpl<R> {
    repository: Arc<R>,
    window: Duration,
    retention: Duration,
}

impl<R: ActivityLogRepository> ActivityLogServiceImpl<R> {
    pub fn new(repository: Arc<R>, window_hours: u32, retention_days: u32) -> Self {
        Self {
            repository,
            window: Duration::hours(i64::from(window_hours)),
            retention: Duration::days(i64::from(retention_days)),
        }
    }
}

#[async_trait]
impl<R: ActivityLogRepository> ActivityLogService for ActivityLogServiceImpl<R> {
    async fn recent(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<ActivityLogEntry>, ActivityLogError> {
        let since = OffsetDateTime::now_utc() - self.window;
        self.repository.list_since(station_id, &since).await
    }

    async fn purge_expired(&self) -> Result<u64, ActivityLogError> {
        let cutoff = OffsetDateTime::now_utc() - self.retention;
        let purged = self.repository.purge_before(&cutoff).await?;
        if purged > 0 {
            tracing::info!(purged, %cutoff, "Purged expired activity log entries");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::outbound::memory::InMemoryStore,
        domain::models::{ActivityLogId, ControllerId},
    };

    fn entry(id: i64, station: i32, age: Duration) -> ActivityLogEntry {
        ActivityLogEntry {
            id: ActivityLogId::new(id),
            controller_id: ControllerId::new(7),
            controller_name: Some("Silva".into()),
            station_id: Some(StationId::new(station)),
            action: "Status changed".into(),
            detail: None,
            created_at: OffsetDateTime::now_utc() - age,
        }
    }

    #[tokio::test]
    async fn recent_returns_window_for_station_newest_first() {
        let store = InMemoryStore::new()
            .with_activity(entry(1, 1, Duration::hours(30)))
            .with_activity(entry(2, 1, Duration::hours(5)))
            .with_activity(entry(3, 1, Duration::minutes(10)))
            .with_activity(entry(4, 2, Duration::minutes(5)));
        let service = ActivityLogServiceImpl::new(Arc::new(store), 24, 90);

        let recent = service.recent(&StationId::new(1)).await.unwrap();

        let ids: Vec<i64> = recent.iter().map(|e| e.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[tokio::test]
    async fn purge_drops_entries_past_retention() {
        let store = InMemoryStore::new()
            .with_activity(entry(1, 1, Duration::days(91)))
            .with_activity(entry(2, 1, Duration::days(2)));
        let service = ActivityLogServiceImpl::new(Arc::new(store.clone()), 24, 90);

        assert_eq!(service.purge_expired().await.unwrap(), 1);
        assert_eq!(store.activity_entries().len(), 1);
        assert_eq!(service.purge_expired().await.unwrap(), 0);
    }
}
