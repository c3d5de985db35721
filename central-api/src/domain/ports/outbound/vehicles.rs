//! Vehicle repository port (outbound).

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{NewVehicle, StationId, StatusChange, Vehicle, VehicleDetails, VehicleId},
    FleetError,
};

/// Outbound port for vehicle persistence.
#[async_trait]
pub trait VehicleRepository: Send + Sync + 'static {
    /// All vehicles whose station is `station_id`.
    async fn list_by_station(&self, station_id: &StationId) -> Result<Vec<Vehicle>, FleetError>;

    async fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, FleetError>;

    /// The stored status value as-is, without parsing it.
    async fn raw_status(&self, id: &VehicleId) -> Result<Option<String>, FleetError>;

    /// Insert a vehicle in the first cycle state.
    async fn create(
        &self,
        vehicle: &NewVehicle,
        now: &OffsetDateTime,
    ) -> Result<Vehicle, FleetError>;

    /// Overwrite the editable fields. Returns `None` when the vehicle does not
    /// exist.
    async fn update(
        &self,
        id: &VehicleId,
        details: &VehicleDetails,
        now: &OffsetDateTime,
    ) -> Result<Option<Vehicle>, FleetError>;

    /// Write a new status and refresh `status_changed_at`/`updated_at`.
    ///
    /// `status_changed_at` never moves backwards. Returns the stored vehicle,
    /// or `None` when it does not exist.
    async fn set_status(
        &self,
        id: &VehicleId,
        change: &StatusChange,
    ) -> Result<Option<Vehicle>, FleetError>;
}
