//! Note repository port (outbound).

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{ControllerId, DailyNote, NoteId, NoteScope},
    NoteError,
};

#[async_trait]
pub trait NoteRepository: Send + Sync + 'static {
    /// The authoritative note for a scope: the most recently updated row.
    async fn current(&self, scope: &NoteScope) -> Result<Option<DailyNote>, NoteError>;

    async fn insert(
        &self,
        scope: &NoteScope,
        content: &str,
        author: Option<ControllerId>,
        now: &OffsetDateTime,
    ) -> Result<DailyNote, NoteError>;

    /// Update a row by id, restricted to `scope`. Returns `None` when no such
    /// row exists in that scope.
    async fn update(
        &self,
        id: &NoteId,
        scope: &NoteScope,
        content: &str,
        author: Option<ControllerId>,
        now: &OffsetDateTime,
    ) -> Result<Option<DailyNote>, NoteError>;
}
