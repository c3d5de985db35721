use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::domain::{
    models::{
        ActivityAction, Controller, FleetBoard, NewObservation, NewVehicle, OperatorContext,
        Station, StationId, StatusChange, StatusCycle, SubStation, SubStationId, Vehicle,
        VehicleDetails, VehicleId, VehicleObservation, VehicleStatus, VehicleUpdate,
    },
    ports::{
        inbound::FleetService,
        outbound::{ObservationRepository, StationRepository, VehicleRepository},
    },
    FleetError,
};

use super::AuditTrail;

/// Where a status action takes the vehicle.
#[derive(Debug, Clone, Copy)]
enum StatusTarget {
    /// Next element of the cycle.
    Advance,
    Fixed(VehicleStatus),
}

/// Implementation of [`FleetService`], including the status cycle engine.
pub struct FleetServiceImpl<V, S, O> {
    vehicles: Arc<V>,
    stations: Arc<S>,
    observations: Arc<O>,
    audit: AuditTrail,
    cycle: StatusCycle,
}

impl<V, S, O> FleetServiceImpl<V, S, O>
where
    V: VehicleRepository,
    S: StationRepository,
    O: ObservationRepository,
{
    pub fn new(
        vehicles: Arc<V>,
        stations: Arc<S>,
        observations: Arc<O>,
        audit: AuditTrail,
    ) -> Self {
        Self {
            vehicles,
            stations,
            observations,
            audit,
            cycle: StatusCycle::default(),
        }
    }

    async fn require_vehicle(&self, id: &VehicleId) -> Result<Vehicle, FleetError> {
        self.vehicles
            .get(id)
            .await?
            .ok_or(FleetError::VehicleNotFound(*id))
    }

    async fn require_station(&self, id: &StationId) -> Result<Station, FleetError> {
        self.stations
            .get_station(id)
            .await?
            .ok_or(FleetError::StationNotFound(*id))
    }

    async fn check_sub_station(
        &self,
        station_id: &StationId,
        sub_station_id: &SubStationId,
    ) -> Result<(), FleetError> {
        let known = self
            .stations
            .list_sub_stations(station_id)
            .await?
            .iter()
            .any(|s| s.id == *sub_station_id);
        if known {
            Ok(())
        } else {
            Err(FleetError::invalid(format!(
                "sub-station {sub_station_id} does not belong to station {station_id}"
            )))
        }
    }

    async fn apply_status(
        &self,
        ctx: &OperatorContext,
        id: &VehicleId,
        target: StatusTarget,
        action: ActivityAction,
    ) -> Result<Vehicle, FleetError> {
        // Read unparsed so a legacy or corrupt value still advances.
        let previous = self
            .vehicles
            .raw_status(id)
            .await?
            .ok_or(FleetError::VehicleNotFound(*id))?;
        let status = match target {
            StatusTarget::Advance => self.cycle.next_from_raw(&previous),
            StatusTarget::Fixed(status) => status,
        };

        let change = StatusChange::new(status, OffsetDateTime::now_utc());
        let updated = self
            .vehicles
            .set_status(id, &change)
            .await?
            .ok_or(FleetError::VehicleNotFound(*id))?;

        tracing::info!(
            vehicle_id = %id,
            from = %previous,
            to = %updated.status,
            "Vehicle status changed"
        );

        self.audit.record(
            ctx,
            updated.station_id,
            action,
            Some(format!(
                "{} — {}",
                updated.prefix,
                updated.status.label(self.audit.locale())
            )),
        );

        Ok(updated)
    }
}

fn normalize_plate(plate: Option<String>) -> Option<String> {
    plate
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

fn require_text(field: &str, value: &str) -> Result<String, FleetError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FleetError::invalid(format!("{field} must not be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}

#[async_trait]
impl<V, S, O> FleetService for FleetServiceImpl<V, S, O>
where
    V: VehicleRepository,
    S: StationRepository,
    O: ObservationRepository,
{
    async fn list_stations(&self) -> Result<Vec<Station>, FleetError> {
        self.stations.list_stations().await
    }

    async fn list_sub_stations(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<SubStation>, FleetError> {
        self.stations.list_sub_stations(station_id).await
    }

    async fn list_controllers(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<Controller>, FleetError> {
        let controllers = self.stations.list_controllers(station_id).await?;
        Ok(controllers.into_iter().filter(|c| c.active).collect())
    }

    async fn board(&self, station_id: &StationId) -> Result<FleetBoard, FleetError> {
        let station = self.require_station(station_id).await?;
        let sub_stations = self.stations.list_sub_stations(station_id).await?;
        let vehicles = self.vehicles.list_by_station(station_id).await?;

        let ids: Vec<VehicleId> = vehicles.iter().map(|v| v.id).collect();
        let latest = self.observations.latest_for_vehicles(&ids).await?;

        Ok(FleetBoard::build(station, sub_stations, vehicles, latest))
    }

    async fn get_vehicle(&self, id: &VehicleId) -> Result<Vehicle, FleetError> {
        self.require_vehicle(id).await
    }

    async fn create_vehicle(
        &self,
        ctx: &OperatorContext,
        vehicle: NewVehicle,
    ) -> Result<Vehicle, FleetError> {
        let vehicle = NewVehicle {
            prefix: require_text("prefix", &vehicle.prefix)?,
            category: require_text("category", &vehicle.category)?,
            plate: normalize_plate(vehicle.plate),
            ..vehicle
        };

        self.require_station(&vehicle.station_id).await?;
        if let Some(sub_station_id) = &vehicle.sub_station_id {
            self.check_sub_station(&vehicle.station_id, sub_station_id)
                .await?;
        }

        let created = self
            .vehicles
            .create(&vehicle, &OffsetDateTime::now_utc())
            .await?;

        tracing::info!(vehicle_id = %created.id, prefix = %created.prefix, "Vehicle added");
        self.audit.record(
            ctx,
            created.station_id,
            ActivityAction::VehicleAdded,
            Some(created.prefix.clone()),
        );

        Ok(created)
    }

    async fn update_vehicle(
        &self,
        ctx: &OperatorContext,
        id: &VehicleId,
        update: VehicleUpdate,
    ) -> Result<Vehicle, FleetError> {
        if update.is_empty() {
            return Err(FleetError::invalid("no fields to update"));
        }

        let current = self.require_vehicle(id).await?;
        let mut details = VehicleDetails::from(&current);

        if let Some(prefix) = &update.prefix {
            details.prefix = require_text("prefix", prefix)?;
        }
        if let Some(category) = &update.category {
            details.category = require_text("category", category)?;
        }
        if let Some(plate) = update.plate {
            details.plate = normalize_plate(plate);
        }
        if let Some(station_id) = update.station_id {
            self.require_station(&station_id).await?;
            if details.station_id != Some(station_id) {
                // The old sub-station belongs to the previous station.
                details.station_id = Some(station_id);
                details.sub_station_id = None;
            }
        }
        if let Some(sub_station_id) = update.sub_station_id {
            if let Some(sub_station_id) = &sub_station_id {
                let Some(station_id) = &details.station_id else {
                    return Err(FleetError::invalid(
                        "a vehicle without a station cannot have a sub-station",
                    ));
                };
                self.check_sub_station(station_id, sub_station_id).await?;
            }
            details.sub_station_id = sub_station_id;
        }

        let updated = self
            .vehicles
            .update(id, &details, &OffsetDateTime::now_utc())
            .await?
            .ok_or(FleetError::VehicleNotFound(*id))?;

        self.audit.record(
            ctx,
            updated.station_id,
            ActivityAction::VehicleUpdated,
            Some(updated.prefix.clone()),
        );

        Ok(updated)
    }

    async fn advance_status(
        &self,
        ctx: &OperatorContext,
        id: &VehicleId,
    ) -> Result<Vehicle, FleetError> {
        self.apply_status(ctx, id, StatusTarget::Advance, ActivityAction::StatusChanged)
            .await
    }

    async fn lower(&self, ctx: &OperatorContext, id: &VehicleId) -> Result<Vehicle, FleetError> {
        self.apply_status(
            ctx,
            id,
            StatusTarget::Fixed(VehicleStatus::Down),
            ActivityAction::VehicleLowered,
        )
        .await
    }

    async fn reserve(&self, ctx: &OperatorContext, id: &VehicleId) -> Result<Vehicle, FleetError> {
        self.apply_status(
            ctx,
            id,
            StatusTarget::Fixed(VehicleStatus::Reserve),
            ActivityAction::VehicleReserved,
        )
        .await
    }

    async fn restore(&self, ctx: &OperatorContext, id: &VehicleId) -> Result<Vehicle, FleetError> {
        let first = self.cycle.first();
        self.apply_status(
            ctx,
            id,
            StatusTarget::Fixed(first),
            ActivityAction::VehicleRestored,
        )
        .await
    }

    async fn list_observations(
        &self,
        id: &VehicleId,
    ) -> Result<Vec<VehicleObservation>, FleetError> {
        self.require_vehicle(id).await?;
        self.observations.list_for_vehicle(id).await
    }

    async fn add_observation(
        &self,
        ctx: &OperatorContext,
        id: &VehicleId,
        content: String,
    ) -> Result<VehicleObservation, FleetError> {
        let content = require_text("observation", &content)?;
        let vehicle = self.require_vehicle(id).await?;

        let observation = NewObservation {
            vehicle_id: *id,
            controller_id: ctx.controller_id,
            content,
        };
        let created = self
            .observations
            .create(&observation, &OffsetDateTime::now_utc())
            .await?;

        self.audit.record(
            ctx,
            vehicle.station_id,
            ActivityAction::ObservationAdded,
            Some(format!("{} — {}", vehicle.prefix, created.content)),
        );

        Ok(created)
    }
}
