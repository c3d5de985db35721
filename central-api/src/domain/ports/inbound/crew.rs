use async_trait::async_trait;

use crate::domain::{
    models::{CrewAssignment, CrewMember, CrewMemberId, OperatorContext, StationId, VehicleId},
    FleetError,
};

/// Inbound port for crew rosters and vehicle crew assignments.
#[async_trait]
pub trait CrewService: Send + Sync + 'static {
    async fn list_members(&self, station_id: &StationId) -> Result<Vec<CrewMember>, FleetError>;

    async fn vehicle_crew(&self, vehicle_id: &VehicleId)
        -> Result<Vec<CrewAssignment>, FleetError>;

    async fn assign(
        &self,
        ctx: &OperatorContext,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
        role: String,
    ) -> Result<CrewAssignment, FleetError>;

    async fn release(
        &self,
        ctx: &OperatorContext,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
    ) -> Result<(), FleetError>;
}
