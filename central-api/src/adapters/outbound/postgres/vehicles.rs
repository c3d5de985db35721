//! PostgreSQL implementation of the VehicleRepository port.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::domain::{
    models::{
        NewVehicle, StationId, StatusChange, Vehicle, VehicleDetails, VehicleId, VehicleStatus,
    },
    ports::outbound::VehicleRepository,
    FleetError,
};

const VEHICLE_COLUMNS: &str = r#"
    id, prefix, category, plate, status, status_changed_at,
    station_id, sub_station_id, created_at, updated_at
"#;

#[derive(Debug, FromRow)]
struct VehicleRow {
    id: i32,
    prefix: String,
    category: String,
    plate: Option<String>,
    status: String,
    status_changed_at: OffsetDateTime,
    station_id: Option<i32>,
    sub_station_id: Option<i32>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = FleetError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<VehicleStatus>().map_err(|_| {
            FleetError::Malformed(format!(
                "vehicle {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(Vehicle {
            id: VehicleId::new(row.id),
            prefix: row.prefix,
            category: row.category,
            plate: row.plate,
            status,
            status_changed_at: row.status_changed_at,
            station_id: row.station_id.map(StationId::new),
            sub_station_id: row.sub_station_id.map(Into::into),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresVehicleRepository {
    pool: PgPool,
}

impl PostgresVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PostgresVehicleRepository {
    async fn list_by_station(&self, station_id: &StationId) -> Result<Vec<Vehicle>, FleetError> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS}
            FROM vehicles
            WHERE station_id = $1
            ORDER BY category, prefix
            "#
        ))
        .bind(station_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        // A row with a status outside the vocabulary must not take the whole
        // board down.
        Ok(rows
            .into_iter()
            .filter_map(|row| match Vehicle::try_from(row) {
                Ok(vehicle) => Some(vehicle),
                Err(e) => {
                    tracing::warn!("Skipping vehicle: {}", e);
                    None
                }
            })
            .collect())
    }

    async fn get(&self, id: &VehicleId) -> Result<Option<Vehicle>, FleetError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            SELECT {VEHICLE_COLUMNS}
            FROM vehicles
            WHERE id = $1
            "#
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn raw_status(&self, id: &VehicleId) -> Result<Option<String>, FleetError> {
        let status = sqlx::query_scalar::<_, String>("SELECT status FROM vehicles WHERE id = $1")
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?;

        Ok(status)
    }

    async fn create(
        &self,
        vehicle: &NewVehicle,
        now: &OffsetDateTime,
    ) -> Result<Vehicle, FleetError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles
                (prefix, category, plate, status, status_changed_at,
                 station_id, sub_station_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $5, $5)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(&vehicle.prefix)
        .bind(&vehicle.category)
        .bind(&vehicle.plate)
        .bind(VehicleStatus::Available.to_string())
        .bind(now)
        .bind(vehicle.station_id.as_i32())
        .bind(vehicle.sub_station_id.map(|id| id.as_i32()))
        .fetch_one(&self.pool)
        .await?;

        Vehicle::try_from(row)
    }

    async fn update(
        &self,
        id: &VehicleId,
        details: &VehicleDetails,
        now: &OffsetDateTime,
    ) -> Result<Option<Vehicle>, FleetError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET prefix = $2,
                category = $3,
                plate = $4,
                station_id = $5,
                sub_station_id = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(id.as_i32())
        .bind(&details.prefix)
        .bind(&details.category)
        .bind(&details.plate)
        .bind(details.station_id.map(|id| id.as_i32()))
        .bind(details.sub_station_id.map(|id| id.as_i32()))
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn set_status(
        &self,
        id: &VehicleId,
        change: &StatusChange,
    ) -> Result<Option<Vehicle>, FleetError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            UPDATE vehicles
            SET status = $2,
                status_changed_at = GREATEST(status_changed_at, $3),
                updated_at = $3
            WHERE id = $1
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(id.as_i32())
        .bind(change.status.to_string())
        .bind(change.changed_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Vehicle::try_from).transpose()
    }
}
