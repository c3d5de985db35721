//! HTTP response types for the fleet board endpoints.
//!
//! These types serialize to the JSON format expected by the dashboard.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::domain::models::{
    ActivityLogEntry, BoardCategory, BoardGroup, BoardVehicle, Controller, CrewAssignment,
    CrewMember, DailyNote, FleetBoard, Locale, Station, SubStation, Vehicle, VehicleObservation,
    VehicleStatus,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    pub id: i32,
    pub name: String,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id.as_i32(),
            name: station.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubStationResponse {
    pub id: i32,
    pub station_id: i32,
    pub name: String,
}

impl From<SubStation> for SubStationResponse {
    fn from(sub_station: SubStation) -> Self {
        Self {
            id: sub_station.id.as_i32(),
            station_id: sub_station.station_id.as_i32(),
            name: sub_station.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerResponse {
    pub id: i32,
    pub station_id: i32,
    pub name: String,
}

impl From<Controller> for ControllerResponse {
    fn from(controller: Controller) -> Self {
        Self {
            id: controller.id.as_i32(),
            station_id: controller.station_id.as_i32(),
            name: controller.name,
        }
    }
}

/// A vehicle as shown on the board.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i32,
    pub prefix: String,
    pub category: String,
    pub plate: Option<String>,
    /// Canonical status value, e.g. `en_route`.
    pub status: VehicleStatus,
    /// Status label in the dashboard's language.
    pub status_label: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub status_changed_at: OffsetDateTime,
    pub station_id: Option<i32>,
    pub sub_station_id: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl VehicleResponse {
    pub fn new(vehicle: Vehicle, locale: Locale) -> Self {
        Self {
            id: vehicle.id.as_i32(),
            prefix: vehicle.prefix,
            category: vehicle.category,
            plate: vehicle.plate,
            status: vehicle.status,
            status_label: vehicle.status.label(locale),
            status_changed_at: vehicle.status_changed_at,
            station_id: vehicle.station_id.map(|id| id.as_i32()),
            sub_station_id: vehicle.sub_station_id.map(|id| id.as_i32()),
            updated_at: vehicle.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationResponse {
    pub id: i32,
    pub vehicle_id: i32,
    pub controller_id: Option<i32>,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<VehicleObservation> for ObservationResponse {
    fn from(observation: VehicleObservation) -> Self {
        Self {
            id: observation.id.as_i32(),
            vehicle_id: observation.vehicle_id.as_i32(),
            controller_id: observation.controller_id.map(|id| id.as_i32()),
            content: observation.content,
            created_at: observation.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMemberResponse {
    pub id: i32,
    pub station_id: i32,
    pub name: String,
    pub rank: Option<String>,
}

impl From<CrewMember> for CrewMemberResponse {
    fn from(member: CrewMember) -> Self {
        Self {
            id: member.id.as_i32(),
            station_id: member.station_id.as_i32(),
            name: member.name,
            rank: member.rank,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewAssignmentResponse {
    pub crew_member_id: i32,
    pub crew_member_name: String,
    pub vehicle_id: i32,
    pub role: String,
    #[serde(with = "time::serde::rfc3339")]
    pub assigned_at: OffsetDateTime,
}

impl From<CrewAssignment> for CrewAssignmentResponse {
    fn from(assignment: CrewAssignment) -> Self {
        Self {
            crew_member_id: assignment.crew_member_id.as_i32(),
            crew_member_name: assignment.crew_member_name,
            vehicle_id: assignment.vehicle_id.as_i32(),
            role: assignment.role,
            assigned_at: assignment.assigned_at,
        }
    }
}

/// Vehicle detail: the vehicle plus its crew and observation history.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetailResponse {
    pub vehicle: VehicleResponse,
    pub crew: Vec<CrewAssignmentResponse>,
    pub observations: Vec<ObservationResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardVehicleResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub latest_observation: Option<ObservationResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardGroupResponse {
    /// `None` for vehicles housed at the station itself.
    pub sub_station: Option<SubStationResponse>,
    pub vehicles: Vec<BoardVehicleResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCategoryResponse {
    pub category: String,
    pub groups: Vec<BoardGroupResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub station: StationResponse,
    pub categories: Vec<BoardCategoryResponse>,
}

impl BoardResponse {
    pub fn new(board: FleetBoard, locale: Locale) -> Self {
        let board_vehicle = |v: BoardVehicle| BoardVehicleResponse {
            vehicle: VehicleResponse::new(v.vehicle, locale),
            latest_observation: v.latest_observation.map(ObservationResponse::from),
        };
        let group = |g: BoardGroup| BoardGroupResponse {
            sub_station: g.sub_station.map(SubStationResponse::from),
            vehicles: g.vehicles.into_iter().map(board_vehicle).collect(),
        };
        let category = |c: BoardCategory| BoardCategoryResponse {
            category: c.category,
            groups: c.groups.into_iter().map(group).collect(),
        };

        Self {
            station: board.station.into(),
            categories: board.categories.into_iter().map(category).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: i32,
    pub station_id: i32,
    /// `YYYY-MM-DD` for daily notes, absent for the station note.
    pub date: Option<String>,
    pub content: String,
    pub updated_by: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<DailyNote> for NoteResponse {
    fn from(note: DailyNote) -> Self {
        Self {
            id: note.id.as_i32(),
            station_id: note.scope.station_id().as_i32(),
            date: note.scope.date().map(|d: Date| d.to_string()),
            content: note.content,
            updated_by: note.updated_by.map(|id| id.as_i32()),
            updated_at: note.updated_at,
        }
    }
}

/// Current note of a scope; `note` is `None` until the first save.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentNoteResponse {
    pub note: Option<NoteResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntryResponse {
    pub id: i64,
    pub controller_id: i32,
    pub controller_name: Option<String>,
    pub action: String,
    pub detail: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<ActivityLogEntry> for ActivityLogEntryResponse {
    fn from(entry: ActivityLogEntry) -> Self {
        Self {
            id: entry.id.as_i64(),
            controller_id: entry.controller_id.as_i32(),
            controller_name: entry.controller_name,
            action: entry.action,
            detail: entry.detail,
            created_at: entry.created_at,
        }
    }
}
