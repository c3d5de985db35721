use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{ActivityAction, DailyNote, NoteScope, OperatorContext, SaveNoteRequest},
    ports::{inbound::NoteService, outbound::NoteRepository},
    NoteError,
};

use super::AuditTrail;

pub struct NoteServiceImpl<R> {
    repository: Arc<R>,
    audit: AuditTrail,
}

impl<R: NoteRepository> NoteServiceImpl<R> {
    pub fn new(repository: Arc<R>, audit: AuditTrail) -> Self {
        Self { repository, audit }
    }
}

#[async_trait]
impl<R: NoteRepository> NoteService for NoteServiceImpl<R> {
    async fn current_note(&self, scope: &NoteScope) -> Result<Option<DailyNote>, NoteError> {
        self.repository.current(scope).await
    }

    async fn save_note(
        &self,
        ctx: &OperatorContext,
        request: SaveNoteRequest,
    ) -> Result<DailyNote, NoteError> {
        if request.content.trim().is_empty() {
            return Err(NoteError::EmptyContent);
        }

        let now = OffsetDateTime::now_utc();
        let note = match request.id {
            Some(id) => self
                .repository
                .update(&id, &request.scope, &request.content, ctx.controller_id, &now)
                .await?
                .ok_or(NoteError::NotFound(id))?,
            None => {
                self.repository
                    .insert(&request.scope, &request.content, ctx.controller_id, &now)
                    .await?
            }
        };

        tracing::debug!(note_id = %note.id, station_id = %note.scope.station_id(), "Note saved");
        self.audit.record(
            ctx,
            Some(note.scope.station_id()),
            ActivityAction::NotesUpdated,
            None,
        );

        Ok(note)
    }
}
