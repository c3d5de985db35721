use axum::{extract::State, routing::put, Json, Router};
use serde::Deserialize;
use time::{macros::format_description, Date};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{NoteResponse, Operator},
    app_state::AppState,
    domain::models::{NoteId, NoteScope, SaveNoteRequest, StationId},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", put(save_note))
}

pub(crate) fn parse_date(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::bad_request(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveNotePayload {
    /// Row the client already knows about; absent on the first save.
    id: Option<i32>,
    station_id: i32,
    /// `YYYY-MM-DD` for a daily note, absent for the station note.
    date: Option<String>,
    content: String,
}

#[instrument(name = "save_note", skip(app_state))]
pub async fn save_note(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Json(body): Json<SaveNotePayload>,
) -> Result<Json<NoteResponse>, ApiError> {
    let station_id = StationId::new(body.station_id);
    let scope = match body.date.as_deref() {
        Some(raw) => NoteScope::Daily {
            station_id,
            date: parse_date(raw)?,
        },
        None => NoteScope::Station { station_id },
    };

    let note = app_state
        .note_service
        .save_note(
            &ctx,
            SaveNoteRequest {
                id: body.id.map(NoteId::new),
                scope,
                content: body.content,
            },
        )
        .await?;

    Ok(Json(note.into()))
}
