use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::domain::{
    models::{ActivityLogEntry, ActivityLogId, NewActivityLogEntry, StationId},
    ports::outbound::ActivityLogRepository,
    ActivityLogError,
};

#[derive(Debug, FromRow)]
struct ActivityLogRow {
    id: i64,
    controller_id: i32,
    controller_name: Option<String>,
    station_id: Option<i32>,
    action: String,
    detail: Option<String>,
    created_at: OffsetDateTime,
}

pub struct PostgresActivityLogRepository {
    pool: PgPool,
}

impl PostgresActivityLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityLogRepository for PostgresActivityLogRepository {
    async fn append(
        &self,
        entry: &NewActivityLogEntry,
        now: &OffsetDateTime,
    ) -> Result<ActivityLogId, ActivityLogError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO activity_logs (controller_id, station_id, action, detail, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(entry.controller_id.as_i32())
        .bind(entry.station_id.map(|id| id.as_i32()))
        .bind(entry.action.to_string())
        .bind(&entry.detail)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(ActivityLogId::new(id))
    }

    async fn list_since(
        &self,
        station_id: &StationId,
        since: &OffsetDateTime,
    ) -> Result<Vec<ActivityLogEntry>, ActivityLogError> {
        let rows = sqlx::query_as::<_, ActivityLogRow>(
            r#"
            SELECT l.id, l.controller_id, c.name AS controller_name, l.station_id,
                   l.action, l.detail, l.created_at
            FROM activity_logs l
            LEFT JOIN controllers c ON c.id = l.controller_id
            WHERE l.station_id = $1 AND l.created_at >= $2
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .bind(station_id.as_i32())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ActivityLogEntry {
                id: row.id.into(),
                controller_id: row.controller_id.into(),
                controller_name: row.controller_name,
                station_id: row.station_id.map(Into::into),
                action: row.action,
                detail: row.detail,
                created_at: row.created_at,
            })
            .collect())
    }

    async fn purge_before(&self, cutoff: &OffsetDateTime) -> Result<u64, ActivityLogError> {
        let result = sqlx::query("DELETE FROM activity_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
