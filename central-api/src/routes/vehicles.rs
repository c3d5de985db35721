use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{
        CrewAssignmentResponse, ObservationResponse, Operator, VehicleDetailResponse,
        VehicleResponse,
    },
    app_state::AppState,
    domain::models::{CrewMemberId, NewVehicle, StationId, SubStationId, VehicleId, VehicleUpdate},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/:vehicle_id", get(get_vehicle).put(update_vehicle))
        .route("/:vehicle_id/status/advance", post(advance_status))
        .route("/:vehicle_id/status/lower", post(lower))
        .route("/:vehicle_id/status/reserve", post(reserve))
        .route("/:vehicle_id/status/restore", post(restore))
        .route(
            "/:vehicle_id/observations",
            get(list_observations).post(add_observation),
        )
        .route("/:vehicle_id/crew", get(list_crew).post(assign_crew))
        .route("/:vehicle_id/crew/:crew_member_id", delete(release_crew))
}

// ============================================================================
// Vehicles
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehiclePayload {
    prefix: String,
    category: String,
    plate: Option<String>,
    station_id: i32,
    sub_station_id: Option<i32>,
}

#[instrument(name = "create_vehicle", skip(app_state))]
pub async fn create_vehicle(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Json(body): Json<CreateVehiclePayload>,
) -> Result<(StatusCode, Json<VehicleResponse>), ApiError> {
    let vehicle = app_state
        .fleet_service
        .create_vehicle(
            &ctx,
            NewVehicle {
                prefix: body.prefix,
                category: body.category,
                plate: body.plate,
                station_id: StationId::new(body.station_id),
                sub_station_id: body.sub_station_id.map(SubStationId::new),
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VehicleResponse::new(vehicle, app_state.locale)),
    ))
}

#[instrument(name = "get_vehicle", skip(app_state))]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<VehicleDetailResponse>, ApiError> {
    let id = VehicleId::new(vehicle_id);
    let vehicle = app_state.fleet_service.get_vehicle(&id).await?;
    let crew = app_state.crew_service.vehicle_crew(&id).await?;
    let observations = app_state.fleet_service.list_observations(&id).await?;

    Ok(Json(VehicleDetailResponse {
        vehicle: VehicleResponse::new(vehicle, app_state.locale),
        crew: crew.into_iter().map(Into::into).collect(),
        observations: observations.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehiclePayload {
    prefix: Option<String>,
    category: Option<String>,
    /// Absent leaves the plate unchanged; `null` clears it.
    #[serde(default, with = "::serde_with::rust::double_option")]
    plate: Option<Option<String>>,
    station_id: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    sub_station_id: Option<Option<i32>>,
}

#[instrument(name = "update_vehicle", skip(app_state))]
pub async fn update_vehicle(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path(vehicle_id): Path<i32>,
    Json(body): Json<UpdateVehiclePayload>,
) -> Result<Json<VehicleResponse>, ApiError> {
    let update = VehicleUpdate {
        prefix: body.prefix,
        category: body.category,
        plate: body.plate,
        station_id: body.station_id.map(StationId::new),
        sub_station_id: body
            .sub_station_id
            .map(|id| id.map(SubStationId::new)),
    };

    let vehicle = app_state
        .fleet_service
        .update_vehicle(&ctx, &VehicleId::new(vehicle_id), update)
        .await?;

    Ok(Json(VehicleResponse::new(vehicle, app_state.locale)))
}

// ============================================================================
// Status actions
// ============================================================================

#[instrument(name = "advance_status", skip(app_state))]
pub async fn advance_status(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<VehicleResponse>, ApiError> {
    let vehicle = app_state
        .fleet_service
        .advance_status(&ctx, &VehicleId::new(vehicle_id))
        .await?;
    Ok(Json(VehicleResponse::new(vehicle, app_state.locale)))
}

#[instrument(name = "lower", skip(app_state))]
pub async fn lower(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<VehicleResponse>, ApiError> {
    let vehicle = app_state
        .fleet_service
        .lower(&ctx, &VehicleId::new(vehicle_id))
        .await?;
    Ok(Json(VehicleResponse::new(vehicle, app_state.locale)))
}

#[instrument(name = "reserve", skip(app_state))]
pub async fn reserve(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<VehicleResponse>, ApiError> {
    let vehicle = app_state
        .fleet_service
        .reserve(&ctx, &VehicleId::new(vehicle_id))
        .await?;
    Ok(Json(VehicleResponse::new(vehicle, app_state.locale)))
}

#[instrument(name = "restore", skip(app_state))]
pub async fn restore(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<VehicleResponse>, ApiError> {
    let vehicle = app_state
        .fleet_service
        .restore(&ctx, &VehicleId::new(vehicle_id))
        .await?;
    Ok(Json(VehicleResponse::new(vehicle, app_state.locale)))
}

// ============================================================================
// Observations
// ============================================================================

#[instrument(name = "list_observations", skip(app_state))]
pub async fn list_observations(
    State(app_state): State<AppState>,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<Vec<ObservationResponse>>, ApiError> {
    let observations = app_state
        .fleet_service
        .list_observations(&VehicleId::new(vehicle_id))
        .await?;
    Ok(Json(observations.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct AddObservationPayload {
    content: String,
}

#[instrument(name = "add_observation", skip(app_state))]
pub async fn add_observation(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path(vehicle_id): Path<i32>,
    Json(body): Json<AddObservationPayload>,
) -> Result<(StatusCode, Json<ObservationResponse>), ApiError> {
    let observation = app_state
        .fleet_service
        .add_observation(&ctx, &VehicleId::new(vehicle_id), body.content)
        .await?;
    Ok((StatusCode::CREATED, Json(observation.into())))
}

// ============================================================================
// Crew
// ============================================================================

#[instrument(name = "list_vehicle_crew", skip(app_state))]
pub async fn list_crew(
    State(app_state): State<AppState>,
    Path(vehicle_id): Path<i32>,
) -> Result<Json<Vec<CrewAssignmentResponse>>, ApiError> {
    let crew = app_state
        .crew_service
        .vehicle_crew(&VehicleId::new(vehicle_id))
        .await?;
    Ok(Json(crew.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignCrewPayload {
    crew_member_id: i32,
    role: String,
}

#[instrument(name = "assign_crew", skip(app_state))]
pub async fn assign_crew(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path(vehicle_id): Path<i32>,
    Json(body): Json<AssignCrewPayload>,
) -> Result<Json<CrewAssignmentResponse>, ApiError> {
    let assignment = app_state
        .crew_service
        .assign(
            &ctx,
            &VehicleId::new(vehicle_id),
            &CrewMemberId::new(body.crew_member_id),
            body.role,
        )
        .await?;
    Ok(Json(assignment.into()))
}

#[instrument(name = "release_crew", skip(app_state))]
pub async fn release_crew(
    State(app_state): State<AppState>,
    Operator(ctx): Operator,
    Path((vehicle_id, crew_member_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    app_state
        .crew_service
        .release(
            &ctx,
            &VehicleId::new(vehicle_id),
            &CrewMemberId::new(crew_member_id),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
