use async_trait::async_trait;

use crate::domain::{
    models::{
        Controller, FleetBoard, NewVehicle, OperatorContext, Station, StationId, SubStation,
        Vehicle, VehicleId, VehicleObservation, VehicleUpdate,
    },
    FleetError,
};

/// Inbound port for the fleet board and the status cycle engine.
///
/// Every state-changing operation takes the caller's [`OperatorContext`]; when
/// a controller is selected the change is also recorded in the activity log,
/// on a best-effort basis.
#[async_trait]
pub trait FleetService: Send + Sync + 'static {
    // ========================================================================
    // Reference data
    // ========================================================================

    async fn list_stations(&self) -> Result<Vec<Station>, FleetError>;

    async fn list_sub_stations(&self, station_id: &StationId)
        -> Result<Vec<SubStation>, FleetError>;

    async fn list_controllers(&self, station_id: &StationId) -> Result<Vec<Controller>, FleetError>;

    // ========================================================================
    // Board and vehicles
    // ========================================================================

    /// Vehicles of a station grouped by category and sub-station.
    async fn board(&self, station_id: &StationId) -> Result<FleetBoard, FleetError>;

    async fn get_vehicle(&self, id: &VehicleId) -> Result<Vehicle, FleetError>;

    async fn create_vehicle(
        &self,
        ctx: &OperatorContext,
        vehicle: NewVehicle,
    ) -> Result<Vehicle, FleetError>;

    async fn update_vehicle(
        &self,
        ctx: &OperatorContext,
        id: &VehicleId,
        update: VehicleUpdate,
    ) -> Result<Vehicle, FleetError>;

    // ========================================================================
    // Status actions
    // ========================================================================

    /// Move the vehicle to the next status of the cycle.
    async fn advance_status(
        &self,
        ctx: &OperatorContext,
        id: &VehicleId,
    ) -> Result<Vehicle, FleetError>;

    /// Force the vehicle to `Down`.
    async fn lower(&self, ctx: &OperatorContext, id: &VehicleId) -> Result<Vehicle, FleetError>;

    /// Force the vehicle to `Reserve`.
    async fn reserve(&self, ctx: &OperatorContext, id: &VehicleId) -> Result<Vehicle, FleetError>;

    /// Put the vehicle back at the start of the cycle.
    async fn restore(&self, ctx: &OperatorContext, id: &VehicleId) -> Result<Vehicle, FleetError>;

    // ========================================================================
    // Observations
    // ========================================================================

    async fn list_observations(
        &self,
        id: &VehicleId,
    ) -> Result<Vec<VehicleObservation>, FleetError>;

    async fn add_observation(
        &self,
        ctx: &OperatorContext,
        id: &VehicleId,
        content: String,
    ) -> Result<VehicleObservation, FleetError>;
}
