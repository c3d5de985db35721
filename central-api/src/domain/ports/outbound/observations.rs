use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{NewObservation, VehicleId, VehicleObservation},
    FleetError,
};

/// Append-only store of vehicle observations.
#[async_trait]
pub trait ObservationRepository: Send + Sync + 'static {
    /// Observations for a vehicle, newest first.
    async fn list_for_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<VehicleObservation>, FleetError>;

    /// The newest observation of each vehicle that has any.
    async fn latest_for_vehicles(
        &self,
        vehicle_ids: &[VehicleId],
    ) -> Result<HashMap<VehicleId, VehicleObservation>, FleetError>;

    async fn create(
        &self,
        observation: &NewObservation,
        now: &OffsetDateTime,
    ) -> Result<VehicleObservation, FleetError>;
}
