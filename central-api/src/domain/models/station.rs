use time::OffsetDateTime;

use super::{ControllerId, StationId, SubStationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubStation {
    pub id: SubStationId,
    pub station_id: StationId,
    pub name: String,
}

/// A dispatcher who can be selected as the acting controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controller {
    pub id: ControllerId,
    pub station_id: StationId,
    pub name: String,
    pub active: bool,
}

/// The operator selection that accompanies every state-changing request.
///
/// Passed explicitly from the caller; there is no ambient "current station".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatorContext {
    pub station_id: Option<StationId>,
    pub controller_id: Option<ControllerId>,
}

impl OperatorContext {
    pub fn new(station_id: Option<StationId>, controller_id: Option<ControllerId>) -> Self {
        Self {
            station_id,
            controller_id,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}
