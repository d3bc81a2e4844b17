use crate::repository::BuildingRepository;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Building, BuildingChanges, NewBuilding};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::QueryBuilder;

const RETURNING: &str = " RETURNING id, campus_id, name, type, floor_count, construction_year, \
                         gross_area, created_at, updated_at";

/// The PostgreSQL-backed `BuildingRepository`.
#[derive(Debug, Clone)]
pub struct PgBuildingRepository {
    pool: PgPool,
}

impl PgBuildingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds the `UPDATE` for the supplied fields. `campus_id` is never written.
pub(crate) fn update_query<'a>(id: i64, changes: &'a BuildingChanges) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE buildings SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(name) = &changes.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(kind) = &changes.building_type {
            set.push("type = ").push_bind_unseparated(kind.as_deref());
        }
        if let Some(floors) = changes.floor_count {
            set.push("floor_count = ").push_bind_unseparated(floors);
        }
        if let Some(year) = changes.construction_year {
            set.push("construction_year = ").push_bind_unseparated(year);
        }
        if let Some(area) = changes.gross_area {
            set.push("gross_area = ").push_bind_unseparated(area);
        }
        set.push("updated_at = NOW()");
    }
    builder.push(" WHERE id = ").push_bind(id);
    builder.push(RETURNING);
    builder
}

#[async_trait]
impl BuildingRepository for PgBuildingRepository {
    async fn create(&self, building: &NewBuilding) -> Result<Building, DbError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Building>(
            r#"
            INSERT INTO buildings (campus_id, name, type, floor_count, construction_year, gross_area)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, campus_id, name, type, floor_count, construction_year, gross_area, created_at, updated_at
            "#,
        )
        .bind(building.campus_id)
        .bind(&building.name)
        .bind(building.building_type.as_deref())
        .bind(building.floor_count)
        .bind(building.construction_year)
        .bind(building.gross_area)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_all(&self, campus_id: Option<i64>) -> Result<Vec<Building>, DbError> {
        let buildings = sqlx::query_as::<_, Building>(
            "SELECT id, campus_id, name, type, floor_count, construction_year, gross_area, created_at, updated_at \
             FROM buildings WHERE ($1::BIGINT IS NULL OR campus_id = $1) ORDER BY id ASC",
        )
        .bind(campus_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(buildings)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Building>, DbError> {
        let building = sqlx::query_as::<_, Building>(
            "SELECT id, campus_id, name, type, floor_count, construction_year, gross_area, created_at, updated_at \
             FROM buildings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(building)
    }

    async fn update(
        &self,
        id: i64,
        changes: &BuildingChanges,
    ) -> Result<Option<Building>, DbError> {
        let mut tx = self.pool.begin().await?;

        let updated = update_query(id, changes)
            .build_query_as::<Building>()
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<Option<Building>, DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, Building>(
            "DELETE FROM buildings WHERE id = $1 \
             RETURNING id, campus_id, name, type, floor_count, construction_year, gross_area, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(deleted)
    }
}
