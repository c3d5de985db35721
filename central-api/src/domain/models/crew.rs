use time::OffsetDateTime;

use super::{CrewMemberId, StationId, VehicleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewMember {
    pub id: CrewMemberId,
    pub station_id: StationId,
    pub name: String,
    pub rank: Option<String>,
}

/// A crew member riding a vehicle. A member holds at most one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewAssignment {
    pub crew_member_id: CrewMemberId,
    pub crew_member_name: String,
    pub vehicle_id: VehicleId,
    pub role: String,
    pub assigned_at: OffsetDateTime,
}
