use serde::Serialize;
use strum::Display;
use time::OffsetDateTime;

use super::{ActivityLogId, ControllerId, StationId};

/// Action labels written to the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum ActivityAction {
    #[strum(serialize = "Status changed")]
    StatusChanged,
    #[strum(serialize = "Vehicle lowered")]
    VehicleLowered,
    #[strum(serialize = "Vehicle reserved")]
    VehicleReserved,
    #[strum(serialize = "Vehicle restored")]
    VehicleRestored,
    #[strum(serialize = "Vehicle added")]
    VehicleAdded,
    #[strum(serialize = "Vehicle updated")]
    VehicleUpdated,
    #[strum(serialize = "Observation added")]
    ObservationAdded,
    #[strum(serialize = "Crew assigned")]
    CrewAssigned,
    #[strum(serialize = "Crew released")]
    CrewReleased,
    #[strum(serialize = "Notes updated")]
    NotesUpdated,
}

/// An immutable audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLogEntry {
    pub id: ActivityLogId,
    pub controller_id: ControllerId,
    pub controller_name: Option<String>,
    pub station_id: Option<StationId>,
    pub action: String,
    pub detail: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivityLogEntry {
    pub controller_id: ControllerId,
    pub station_id: Option<StationId>,
    pub action: ActivityAction,
    pub detail: Option<String>,
}

impl NewActivityLogEntry {
    pub fn new(controller_id: ControllerId, action: ActivityAction) -> Self {
        Self {
            controller_id,
            station_id: None,
            action,
            detail: None,
        }
    }

    pub fn with_station(mut self, station_id: Option<StationId>) -> Self {
        self.station_id = station_id;
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
