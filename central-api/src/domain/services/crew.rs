use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{
        ActivityAction, CrewAssignment, CrewMember, CrewMemberId, OperatorContext, StationId,
        Vehicle, VehicleId,
    },
    ports::{
        inbound::CrewService,
        outbound::{CrewRepository, VehicleRepository},
    },
    FleetError,
};

use super::AuditTrail;

pub struct CrewServiceImpl<C, V> {
    crew: Arc<C>,
    vehicles: Arc<V>,
    audit: AuditTrail,
}

impl<C, V> CrewServiceImpl<C, V>
where
    C: CrewRepository,
    V: VehicleRepository,
{
    pub fn new(crew: Arc<C>, vehicles: Arc<V>, audit: AuditTrail) -> Self {
        Self {
            crew,
            vehicles,
            audit,
        }
    }

    async fn require_vehicle(&self, id: &VehicleId) -> Result<Vehicle, FleetError> {
        self.vehicles
            .get(id)
            .await?
            .ok_or(FleetError::VehicleNotFound(*id))
    }
}

#[async_trait]
impl<C, V> CrewService for CrewServiceImpl<C, V>
where
    C: CrewRepository,
    V: VehicleRepository,
{
    async fn list_members(&self, station_id: &StationId) -> Result<Vec<CrewMember>, FleetError> {
        self.crew.list_members(station_id).await
    }

    async fn vehicle_crew(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<CrewAssignment>, FleetError> {
        self.require_vehicle(vehicle_id).await?;
        self.crew.list_assignments(vehicle_id).await
    }

    async fn assign(
        &self,
        ctx: &OperatorContext,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
        role: String,
    ) -> Result<CrewAssignment, FleetError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(FleetError::invalid("role must not be empty"));
        }

        let vehicle = self.require_vehicle(vehicle_id).await?;
        let member = self
            .crew
            .get_member(crew_member_id)
            .await?
            .ok_or(FleetError::CrewMemberNotFound(*crew_member_id))?;
        if vehicle.station_id != Some(member.station_id) {
            return Err(FleetError::invalid(format!(
                "{} does not belong to the station of {}",
                member.name, vehicle.prefix
            )));
        }

        let assignment = self
            .crew
            .assign(vehicle_id, crew_member_id, role, &OffsetDateTime::now_utc())
            .await?;

        self.audit.record(
            ctx,
            vehicle.station_id,
            ActivityAction::CrewAssigned,
            Some(format!("{} → {} ({})", member.name, vehicle.prefix, assignment.role)),
        );

        Ok(assignment)
    }

    async fn release(
        &self,
        ctx: &OperatorContext,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
    ) -> Result<(), FleetError> {
        let vehicle = self.require_vehicle(vehicle_id).await?;
        if !self.crew.release(vehicle_id, crew_member_id).await? {
            return Err(FleetError::CrewMemberNotFound(*crew_member_id));
        }

        let name = match self.crew.get_member(crew_member_id).await? {
            Some(member) => member.name,
            None => crew_member_id.to_string(),
        };
        self.audit.record(
            ctx,
            vehicle.station_id,
            ActivityAction::CrewReleased,
            Some(format!("{} — {}", vehicle.prefix, name)),
        );

        Ok(())
    }
}
