use async_trait::async_trait;

use crate::domain::{
    models::{DailyNote, NoteScope, OperatorContext, SaveNoteRequest},
    NoteError,
};

/// Inbound port for daily and station notes.
#[async_trait]
pub trait NoteService: Send + Sync + 'static {
    /// The authoritative note for a scope, if any row exists yet.
    async fn current_note(&self, scope: &NoteScope) -> Result<Option<DailyNote>, NoteError>;

    /// Insert-or-update keyed by the id the caller already knows.
    ///
    /// Blank content is rejected so a transient clear never overwrites a note.
    async fn save_note(
        &self,
        ctx: &OperatorContext,
        request: SaveNoteRequest,
    ) -> Result<DailyNote, NoteError>;
}
