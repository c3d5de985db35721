use time::{Date, OffsetDateTime};

use super::{ControllerId, NoteId, StationId};

/// Which logical note a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteScope {
    /// One note per station per calendar day.
    Daily { station_id: StationId, date: Date },
    /// A standing note for the station, not tied to a day.
    Station { station_id: StationId },
}

impl NoteScope {
    pub fn station_id(&self) -> StationId {
        match self {
            Self::Daily { station_id, .. } | Self::Station { station_id } => *station_id,
        }
    }

    pub fn date(&self) -> Option<Date> {
        match self {
            Self::Daily { date, .. } => Some(*date),
            Self::Station { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNote {
    pub id: NoteId,
    pub scope: NoteScope,
    pub content: String,
    pub updated_by: Option<ControllerId>,
    pub updated_at: OffsetDateTime,
}

/// A note save coming from the autosave loop.
///
/// `id` is the row identity the client already knows about; when absent a new
/// row is inserted and its id returned so later saves become updates.
#[derive(Debug, Clone)]
pub struct SaveNoteRequest {
    pub id: Option<NoteId>,
    pub scope: NoteScope,
    pub content: String,
}
