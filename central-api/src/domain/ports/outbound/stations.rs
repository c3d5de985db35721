use async_trait::async_trait;

use crate::domain::{
    models::{Controller, Station, StationId, SubStation},
    FleetError,
};

/// Read-only access to stations, sub-stations and controllers.
#[async_trait]
pub trait StationRepository: Send + Sync + 'static {
    async fn list_stations(&self) -> Result<Vec<Station>, FleetError>;

    async fn get_station(&self, id: &StationId) -> Result<Option<Station>, FleetError>;

    async fn list_sub_stations(&self, station_id: &StationId)
        -> Result<Vec<SubStation>, FleetError>;

    async fn list_controllers(&self, station_id: &StationId) -> Result<Vec<Controller>, FleetError>;
}
