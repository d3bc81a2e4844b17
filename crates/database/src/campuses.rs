use crate::repository::CampusRepository;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Campus, CampusChanges, NewCampus};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::QueryBuilder;

const RETURNING: &str = " RETURNING id, name, city, address, established_year, total_area, \
                         student_capacity, created_at, updated_at";

/// The PostgreSQL-backed `CampusRepository`.
#[derive(Debug, Clone)]
pub struct PgCampusRepository {
    pool: PgPool,
}

impl PgCampusRepository {
    /// Creates a new repository over a shared connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` wildcards so the filter matches the text literally.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Builds the `UPDATE` for exactly the supplied fields.
///
/// Column names are fixed strings; every value goes through a bind parameter.
pub(crate) fn update_query<'a>(id: i64, changes: &'a CampusChanges) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("UPDATE campuses SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(name) = &changes.name {
            set.push("name = ").push_bind_unseparated(name);
        }
        if let Some(city) = &changes.city {
            set.push("city = ").push_bind_unseparated(city);
        }
        if let Some(address) = &changes.address {
            set.push("address = ").push_bind_unseparated(address.as_deref());
        }
        if let Some(year) = changes.established_year {
            set.push("established_year = ").push_bind_unseparated(year);
        }
        if let Some(area) = changes.total_area {
            set.push("total_area = ").push_bind_unseparated(area);
        }
        if let Some(capacity) = changes.student_capacity {
            set.push("student_capacity = ").push_bind_unseparated(capacity);
        }
        set.push("updated_at = NOW()");
    }
    builder.push(" WHERE id = ").push_bind(id);
    builder.push(RETURNING);
    builder
}

#[async_trait]
impl CampusRepository for PgCampusRepository {
    async fn create(&self, campus: &NewCampus) -> Result<Campus, DbError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Campus>(
            r#"
            INSERT INTO campuses (name, city, address, established_year, total_area, student_capacity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, city, address, established_year, total_area, student_capacity, created_at, updated_at
            "#,
        )
        .bind(&campus.name)
        .bind(&campus.city)
        .bind(campus.address.as_deref())
        .bind(campus.established_year)
        .bind(campus.total_area)
        .bind(campus.student_capacity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_all(&self, city: Option<&str>) -> Result<Vec<Campus>, DbError> {
        let campuses = match city {
            Some(city) => {
                sqlx::query_as::<_, Campus>(
                    "SELECT id, name, city, address, established_year, total_area, student_capacity, created_at, updated_at \
                     FROM campuses WHERE city ILIKE $1 ORDER BY id ASC",
                )
                .bind(contains_pattern(city))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Campus>(
                    "SELECT id, name, city, address, established_year, total_area, student_capacity, created_at, updated_at \
                     FROM campuses ORDER BY id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(campuses)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campus>, DbError> {
        let campus = sqlx::query_as::<_, Campus>(
            "SELECT id, name, city, address, established_year, total_area, student_capacity, created_at, updated_at \
             FROM campuses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(campus)
    }

    async fn update(&self, id: i64, changes: &CampusChanges) -> Result<Option<Campus>, DbError> {
        let mut tx = self.pool.begin().await?;

        let updated = update_query(id, changes)
            .build_query_as::<Campus>()
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<Option<Campus>, DbError> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query_as::<_, Campus>(
            "DELETE FROM campuses WHERE id = $1 \
             RETURNING id, name, city, address, established_year, total_area, student_capacity, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(deleted)
    }
}
