//! PostgreSQL implementation of the NoteRepository port.
//!
//! Daily and station notes share one table; station notes have a NULL
//! `note_date`.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

use crate::domain::{
    models::{ControllerId, DailyNote, NoteId, NoteScope, StationId},
    ports::outbound::NoteRepository,
    NoteError,
};

#[derive(Debug, FromRow)]
struct NoteRow {
    id: i32,
    station_id: i32,
    note_date: Option<Date>,
    content: String,
    updated_by: Option<i32>,
    updated_at: OffsetDateTime,
}

impl From<NoteRow> for DailyNote {
    fn from(row: NoteRow) -> Self {
        let station_id = StationId::new(row.station_id);
        let scope = match row.note_date {
            Some(date) => NoteScope::Daily { station_id, date },
            None => NoteScope::Station { station_id },
        };

        DailyNote {
            id: NoteId::new(row.id),
            scope,
            content: row.content,
            updated_by: row.updated_by.map(ControllerId::new),
            updated_at: row.updated_at,
        }
    }
}

pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn current(&self, scope: &NoteScope) -> Result<Option<DailyNote>, NoteError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, station_id, note_date, content, updated_by, updated_at
            FROM daily_notes
            WHERE station_id = $1 AND note_date IS NOT DISTINCT FROM $2
            ORDER BY updated_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(scope.station_id().as_i32())
        .bind(scope.date())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DailyNote::from))
    }

    async fn insert(
        &self,
        scope: &NoteScope,
        content: &str,
        author: Option<ControllerId>,
        now: &OffsetDateTime,
    ) -> Result<DailyNote, NoteError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            INSERT INTO daily_notes
                (station_id, note_date, content, updated_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, station_id, note_date, content, updated_by, updated_at
            "#,
        )
        .bind(scope.station_id().as_i32())
        .bind(scope.date())
        .bind(content)
        .bind(author.map(|id| id.as_i32()))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: &NoteId,
        scope: &NoteScope,
        content: &str,
        author: Option<ControllerId>,
        now: &OffsetDateTime,
    ) -> Result<Option<DailyNote>, NoteError> {
        let row = sqlx::query_as::<_, NoteRow>(
            r#"
            UPDATE daily_notes
            SET content = $4, updated_by = $5, updated_at = $6
            WHERE id = $1 AND station_id = $2 AND note_date IS NOT DISTINCT FROM $3
            RETURNING id, station_id, note_date, content, updated_by, updated_at
            "#,
        )
        .bind(id.as_i32())
        .bind(scope.station_id().as_i32())
        .bind(scope.date())
        .bind(content)
        .bind(author.map(|id| id.as_i32()))
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(DailyNote::from))
    }
}
