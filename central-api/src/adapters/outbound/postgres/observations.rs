use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::domain::{
    models::{NewObservation, VehicleId, VehicleObservation},
    ports::outbound::ObservationRepository,
    FleetError,
};

#[derive(Debug, FromRow)]
struct ObservationRow {
    id: i32,
    vehicle_id: i32,
    controller_id: Option<i32>,
    content: String,
    created_at: OffsetDateTime,
}

impl From<ObservationRow> for VehicleObservation {
    fn from(row: ObservationRow) -> Self {
        VehicleObservation {
            id: row.id.into(),
            vehicle_id: row.vehicle_id.into(),
            controller_id: row.controller_id.map(Into::into),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

pub struct PostgresObservationRepository {
    pool: PgPool,
}

impl PostgresObservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObservationRepository for PostgresObservationRepository {
    async fn list_for_vehicle(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<VehicleObservation>, FleetError> {
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT id, vehicle_id, controller_id, content, created_at
            FROM vehicle_observations
            WHERE vehicle_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(vehicle_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(VehicleObservation::from).collect())
    }

    async fn latest_for_vehicles(
        &self,
        vehicle_ids: &[VehicleId],
    ) -> Result<HashMap<VehicleId, VehicleObservation>, FleetError> {
        if vehicle_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i32> = vehicle_ids.iter().map(|id| id.as_i32()).collect();
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT DISTINCT ON (vehicle_id)
                id, vehicle_id, controller_id, content, created_at
            FROM vehicle_observations
            WHERE vehicle_id = ANY($1)
            ORDER BY vehicle_id, created_at DESC, id DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(VehicleObservation::from)
            .map(|o| (o.vehicle_id, o))
            .collect())
    }

    async fn create(
        &self,
        observation: &NewObservation,
        now: &OffsetDateTime,
    ) -> Result<VehicleObservation, FleetError> {
        let row = sqlx::query_as::<_, ObservationRow>(
            r#"
            INSERT INTO vehicle_observations (vehicle_id, controller_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, vehicle_id, controller_id, content, created_at
            "#,
        )
        .bind(observation.vehicle_id.as_i32())
        .bind(observation.controller_id.map(|id| id.as_i32()))
        .bind(&observation.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}
