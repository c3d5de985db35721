use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{CrewAssignment, CrewMember, CrewMemberId, StationId, VehicleId},
    FleetError,
};

#[async_trait]
pub trait CrewRepository: Send + Sync + 'static {
    async fn list_members(&self, station_id: &StationId) -> Result<Vec<CrewMember>, FleetError>;

    async fn get_member(&self, id: &CrewMemberId) -> Result<Option<CrewMember>, FleetError>;

    async fn list_assignments(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<CrewAssignment>, FleetError>;

    /// Put a crew member on a vehicle, moving them off any previous vehicle.
    async fn assign(
        &self,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
        role: &str,
        now: &OffsetDateTime,
    ) -> Result<CrewAssignment, FleetError>;

    /// Remove a crew member from a vehicle. Returns whether an assignment existed.
    async fn release(
        &self,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
    ) -> Result<bool, FleetError>;
}
