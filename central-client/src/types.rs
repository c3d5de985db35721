use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Operational status of a vehicle, in its canonical wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    EnRoute,
    OnScene,
    EnRouteToHospital,
    ReturningToBase,
    Down,
    Reserve,
}

/// The station and controller currently selected in the dashboard.
///
/// Passed explicitly to every call that changes state; the server records an
/// activity log entry only when a controller is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub station_id: Option<i32>,
    pub controller_id: Option<i32>,
}

impl Selection {
    pub fn new(station_id: Option<i32>, controller_id: Option<i32>) -> Self {
        Self {
            station_id,
            controller_id,
        }
    }
}

/// Whether local state matches what the server last confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Synced,
    /// A write is scheduled or in flight.
    Pending,
    /// The last write failed; local state is ahead of the server.
    Failed,
}

/// Which note an autosave session edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteScope {
    Daily { station_id: i32, date: Date },
    Station { station_id: i32 },
}

impl NoteScope {
    pub fn station_id(&self) -> i32 {
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

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubStation {
    pub id: i32,
    pub station_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controller {
    pub id: i32,
    pub station_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub prefix: String,
    pub category: String,
    pub plate: Option<String>,
    pub status: VehicleStatus,
    pub status_label: String,
    #[serde(with = "time::serde::rfc3339")]
    pub status_changed_at: OffsetDateTime,
    pub station_id: Option<i32>,
    pub sub_station_id: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: i32,
    pub vehicle_id: i32,
    pub controller_id: Option<i32>,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    pub id: i32,
    pub station_id: i32,
    pub name: String,
    pub rank: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewAssignment {
    pub crew_member_id: i32,
    pub crew_member_name: String,
    pub vehicle_id: i32,
    pub role: String,
    #[serde(with = "time::serde::rfc3339")]
    pub assigned_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetail {
    pub vehicle: Vehicle,
    pub crew: Vec<CrewAssignment>,
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardVehicle {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub latest_observation: Option<Observation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardGroup {
    pub sub_station: Option<SubStation>,
    pub vehicles: Vec<BoardVehicle>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCategory {
    pub category: String,
    pub groups: Vec<BoardGroup>,
}

/// A station's vehicles grouped by category, then sub-station.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub station: Station,
    pub categories: Vec<BoardCategory>,
}

impl Board {
    pub fn vehicles(&self) -> impl Iterator<Item = &BoardVehicle> {
        self.categories
            .iter()
            .flat_map(|c| c.groups.iter())
            .flat_map(|g| g.vehicles.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i32,
    pub station_id: i32,
    pub date: Option<String>,
    pub content: String,
    pub updated_by: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentNote {
    pub note: Option<Note>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: i64,
    pub controller_id: i32,
    pub controller_name: Option<String>,
    pub action: String,
    pub detail: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLabel {
    pub status: VehicleStatus,
    pub label_en: String,
    pub label_pt: String,
    pub cycle_position: Option<usize>,
    pub lowered: bool,
}
