use time::OffsetDateTime;

use super::{ControllerId, ObservationId, VehicleId};

/// Free-text annotation on a vehicle. The newest one is shown as its badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleObservation {
    pub id: ObservationId,
    pub vehicle_id: VehicleId,
    pub controller_id: Option<ControllerId>,
    pub content: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewObservation {
    pub vehicle_id: VehicleId,
    pub controller_id: Option<ControllerId>,
    pub content: String,
}
