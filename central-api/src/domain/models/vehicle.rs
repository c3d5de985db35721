use time::OffsetDateTime;

use super::{StationId, SubStationId, VehicleId, VehicleStatus};

/// A vehicle ("viatura") on the fleet board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Display prefix painted on the vehicle, e.g. "ABT-12".
    pub prefix: String,
    pub category: String,
    pub plate: Option<String>,
    pub status: VehicleStatus,
    pub status_changed_at: OffsetDateTime,
    pub station_id: Option<StationId>,
    pub sub_station_id: Option<SubStationId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Vehicle {
    pub fn new(
        id: impl Into<VehicleId>,
        prefix: impl Into<String>,
        category: impl Into<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            prefix: prefix.into(),
            category: category.into(),
            plate: None,
            status: VehicleStatus::Available,
            status_changed_at: created_at,
            station_id: None,
            sub_station_id: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_station(mut self, station_id: impl Into<StationId>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    pub fn with_sub_station(mut self, sub_station_id: impl Into<SubStationId>) -> Self {
        self.sub_station_id = Some(sub_station_id.into());
        self
    }

    pub fn with_status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = Some(plate.into());
        self
    }
}

/// Data from the add-vehicle form. New vehicles always start available.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub prefix: String,
    pub category: String,
    pub plate: Option<String>,
    pub station_id: StationId,
    pub sub_station_id: Option<SubStationId>,
}

/// Partial update from the edit-vehicle form.
///
/// `None` leaves a field unchanged. For the nullable fields `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub prefix: Option<String>,
    pub category: Option<String>,
    pub plate: Option<Option<String>>,
    pub station_id: Option<StationId>,
    pub sub_station_id: Option<Option<SubStationId>>,
}

impl VehicleUpdate {
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none()
            && self.category.is_none()
            && self.plate.is_none()
            && self.station_id.is_none()
            && self.sub_station_id.is_none()
    }
}

/// The editable fields of a vehicle, fully resolved and written as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDetails {
    pub prefix: String,
    pub category: String,
    pub plate: Option<String>,
    pub station_id: Option<StationId>,
    pub sub_station_id: Option<SubStationId>,
}

impl From<&Vehicle> for VehicleDetails {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            prefix: vehicle.prefix.clone(),
            category: vehicle.category.clone(),
            plate: vehicle.plate.clone(),
            station_id: vehicle.station_id,
            sub_station_id: vehicle.sub_station_id,
        }
    }
}

/// A status write: the target status and when it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: VehicleStatus,
    pub changed_at: OffsetDateTime,
}

impl StatusChange {
    pub fn new(status: VehicleStatus, changed_at: OffsetDateTime) -> Self {
        Self { status, changed_at }
    }
}
