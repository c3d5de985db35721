use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::domain::{
    models::{Controller, Station, StationId, SubStation},
    ports::outbound::StationRepository,
    FleetError,
};

#[derive(Debug, FromRow)]
struct StationRow {
    id: i32,
    name: String,
    created_at: OffsetDateTime,
}

impl From<StationRow> for Station {
    fn from(row: StationRow) -> Self {
        Station {
            id: row.id.into(),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct SubStationRow {
    id: i32,
    station_id: i32,
    name: String,
}

#[derive(Debug, FromRow)]
struct ControllerRow {
    id: i32,
    station_id: i32,
    name: String,
    active: bool,
}

pub struct PostgresStationRepository {
    pool: PgPool,
}

impl PostgresStationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StationRepository for PostgresStationRepository {
    async fn list_stations(&self) -> Result<Vec<Station>, FleetError> {
        let rows = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, name, created_at
            FROM stations
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Station::from).collect())
    }

    async fn get_station(&self, id: &StationId) -> Result<Option<Station>, FleetError> {
        let row = sqlx::query_as::<_, StationRow>(
            r#"
            SELECT id, name, created_at
            FROM stations
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Station::from))
    }

    async fn list_sub_stations(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<SubStation>, FleetError> {
        let rows = sqlx::query_as::<_, SubStationRow>(
            r#"
            SELECT id, station_id, name
            FROM sub_stations
            WHERE station_id = $1
            ORDER BY name
            "#,
        )
        .bind(station_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SubStation {
                id: row.id.into(),
                station_id: row.station_id.into(),
                name: row.name,
            })
            .collect())
    }

    async fn list_controllers(
        &self,
        station_id: &StationId,
    ) -> Result<Vec<Controller>, FleetError> {
        let rows = sqlx::query_as::<_, ControllerRow>(
            r#"
            SELECT id, station_id, name, active
            FROM controllers
            WHERE station_id = $1
            ORDER BY name
            "#,
        )
        .bind(station_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Controller {
                id: row.id.into(),
                station_id: row.station_id.into(),
                name: row.name,
                active: row.active,
            })
            .collect())
    }
}
