use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::domain::{
    models::{CrewAssignment, CrewMember, CrewMemberId, StationId, VehicleId},
    ports::outbound::CrewRepository,
    FleetError,
};

#[derive(Debug, FromRow)]
struct CrewMemberRow {
    id: i32,
    station_id: i32,
    name: String,
    rank: Option<String>,
}

impl From<CrewMemberRow> for CrewMember {
    fn from(row: CrewMemberRow) -> Self {
        CrewMember {
            id: row.id.into(),
            station_id: row.station_id.into(),
            name: row.name,
            rank: row.rank,
        }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    crew_member_id: i32,
    crew_member_name: String,
    vehicle_id: i32,
    role: String,
    assigned_at: OffsetDateTime,
}

impl From<AssignmentRow> for CrewAssignment {
    fn from(row: AssignmentRow) -> Self {
        CrewAssignment {
            crew_member_id: row.crew_member_id.into(),
            crew_member_name: row.crew_member_name,
            vehicle_id: row.vehicle_id.into(),
            role: row.role,
            assigned_at: row.assigned_at,
        }
    }
}

pub struct PostgresCrewRepository {
    pool: PgPool,
}

impl PostgresCrewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrewRepository for PostgresCrewRepository {
    async fn list_members(&self, station_id: &StationId) -> Result<Vec<CrewMember>, FleetError> {
        let rows = sqlx::query_as::<_, CrewMemberRow>(
            r#"
            SELECT id, station_id, name, rank
            FROM crew_members
            WHERE station_id = $1
            ORDER BY name
            "#,
        )
        .bind(station_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CrewMember::from).collect())
    }

    async fn get_member(&self, id: &CrewMemberId) -> Result<Option<CrewMember>, FleetError> {
        let row = sqlx::query_as::<_, CrewMemberRow>(
            r#"
            SELECT id, station_id, name, rank
            FROM crew_members
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CrewMember::from))
    }

    async fn list_assignments(
        &self,
        vehicle_id: &VehicleId,
    ) -> Result<Vec<CrewAssignment>, FleetError> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT a.crew_member_id, m.name AS crew_member_name, a.vehicle_id, a.role, a.assigned_at
            FROM crew_assignments a
            JOIN crew_members m ON m.id = a.crew_member_id
            WHERE a.vehicle_id = $1
            ORDER BY a.assigned_at
            "#,
        )
        .bind(vehicle_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CrewAssignment::from).collect())
    }

    async fn assign(
        &self,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
        role: &str,
        now: &OffsetDateTime,
    ) -> Result<CrewAssignment, FleetError> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            WITH upserted AS (
                INSERT INTO crew_assignments (crew_member_id, vehicle_id, role, assigned_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (crew_member_id) DO UPDATE
                SET vehicle_id = EXCLUDED.vehicle_id,
                    role = EXCLUDED.role,
                    assigned_at = EXCLUDED.assigned_at
                RETURNING crew_member_id, vehicle_id, role, assigned_at
            )
            SELECT u.crew_member_id, m.name AS crew_member_name, u.vehicle_id, u.role, u.assigned_at
            FROM upserted u
            JOIN crew_members m ON m.id = u.crew_member_id
            "#,
        )
        .bind(crew_member_id.as_i32())
        .bind(vehicle_id.as_i32())
        .bind(role)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CrewAssignment::from)
            .ok_or(FleetError::CrewMemberNotFound(*crew_member_id))
    }

    async fn release(
        &self,
        vehicle_id: &VehicleId,
        crew_member_id: &CrewMemberId,
    ) -> Result<bool, FleetError> {
        let result = sqlx::query(
            r#"
            DELETE FROM crew_assignments
            WHERE vehicle_id = $1 AND crew_member_id = $2
            "#,
        )
        .bind(vehicle_id.as_i32())
        .bind(crew_member_id.as_i32())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
