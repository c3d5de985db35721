use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::instrument;

use super::{notes::parse_date, ApiError};
use crate::{
    adapters::inbound::http::{
        ActivityLogEntryResponse, BoardResponse, ControllerResponse, CrewMemberResponse,
        CurrentNoteResponse, NoteResponse, StationResponse, SubStationResponse,
    },
    app_state::AppState,
    domain::models::{NoteScope, StationId},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stations))
        .route("/:station_id/sub-stations", get(list_sub_stations))
        .route("/:station_id/controllers", get(list_controllers))
        .route("/:station_id/board", get(get_board))
        .route("/:station_id/crew", get(list_crew))
        .route("/:station_id/activity", get(list_activity))
        .route("/:station_id/notes/daily", get(get_daily_note))
        .route("/:station_id/notes/station", get(get_station_note))
}

#[instrument(name = "list_stations", skip(app_state))]
pub async fn list_stations(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<StationResponse>>, ApiError> {
    let stations = app_state.fleet_service.list_stations().await?;
    Ok(Json(stations.into_iter().map(Into::into).collect()))
}

#[instrument(name = "list_sub_stations", skip(app_state))]
pub async fn list_sub_stations(
    State(app_state): State<AppState>,
    Path(station_id): Path<i32>,
) -> Result<Json<Vec<SubStationResponse>>, ApiError> {
    let sub_stations = app_state
        .fleet_service
        .list_sub_stations(&StationId::new(station_id))
        .await?;
    Ok(Json(sub_stations.into_iter().map(Into::into).collect()))
}

#[instrument(name = "list_controllers", skip(app_state))]
pub async fn list_controllers(
    State(app_state): State<AppState>,
    Path(station_id): Path<i32>,
) -> Result<Json<Vec<ControllerResponse>>, ApiError> {
    let controllers = app_state
        .fleet_service
        .list_controllers(&StationId::new(station_id))
        .await?;
    Ok(Json(controllers.into_iter().map(Into::into).collect()))
}

#[instrument(name = "get_board", skip(app_state))]
pub async fn get_board(
    State(app_state): State<AppState>,
    Path(station_id): Path<i32>,
) -> Result<Json<BoardResponse>, ApiError> {
    let board = app_state
        .fleet_service
        .board(&StationId::new(station_id))
        .await?;
    Ok(Json(BoardResponse::new(board, app_state.locale)))
}

#[instrument(name = "list_crew", skip(app_state))]
pub async fn list_crew(
    State(app_state): State<AppState>,
    Path(station_id): Path<i32>,
) -> Result<Json<Vec<CrewMemberResponse>>, ApiError> {
    let members = app_state
        .crew_service
        .list_members(&StationId::new(station_id))
        .await?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

#[instrument(name = "list_activity", skip(app_state))]
pub async fn list_activity(
    State(app_state): State<AppState>,
    Path(station_id): Path<i32>,
) -> Result<Json<Vec<ActivityLogEntryResponse>>, ApiError> {
    let entries = app_state
        .activity_log_service
        .recent(&StationId::new(station_id))
        .await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct DailyNoteQuery {
    /// `YYYY-MM-DD`; today (UTC) when absent.
    date: Option<String>,
}

#[instrument(name = "get_daily_note", skip(app_state))]
pub async fn get_daily_note(
    State(app_state): State<AppState>,
    Path(station_id): Path<i32>,
    Query(query): Query<DailyNoteQuery>,
) -> Result<Json<CurrentNoteResponse>, ApiError> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };
    let scope = NoteScope::Daily {
        station_id: StationId::new(station_id),
        date,
    };

    let note = app_state.note_service.current_note(&scope).await?;
    Ok(Json(CurrentNoteResponse {
        note: note.map(NoteResponse::from),
    }))
}

#[instrument(name = "get_station_note", skip(app_state))]
pub async fn get_station_note(
    State(app_state): State<AppState>,
    Path(station_id): Path<i32>,
) -> Result<Json<CurrentNoteResponse>, ApiError> {
    let scope = NoteScope::Station {
        station_id: StationId::new(station_id),
    };

    let note = app_state.note_service.current_note(&scope).await?;
    Ok(Json(CurrentNoteResponse {
        note: note.map(NoteResponse::from),
    }))
}
