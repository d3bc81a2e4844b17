use crate::DbError;
use async_trait::async_trait;
use core_types::{Building, BuildingChanges, Campus, CampusChanges, NewBuilding, NewCampus};

/// Persistence for campuses.
///
/// Lookups that match nothing return `Ok(None)`; `Err` always means the store
/// itself failed. Mutations are atomic.
#[async_trait]
pub trait CampusRepository: Send + Sync {
    async fn create(&self, campus: &NewCampus) -> Result<Campus, DbError>;

    /// All campuses ordered by id. `city` is a case-insensitive substring filter.
    async fn find_all(&self, city: Option<&str>) -> Result<Vec<Campus>, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Campus>, DbError>;

    /// Applies only the supplied fields and advances `updated_at`.
    async fn update(&self, id: i64, changes: &CampusChanges) -> Result<Option<Campus>, DbError>;

    /// Deletes the campus and, by cascade, its buildings. Returns the deleted row.
    async fn delete(&self, id: i64) -> Result<Option<Campus>, DbError>;
}

/// Persistence for buildings. Holds no cross-entity rules; the campus
/// reference is checked by the caller and backed by the foreign key.
#[async_trait]
pub trait BuildingRepository: Send + Sync {
    async fn create(&self, building: &NewBuilding) -> Result<Building, DbError>;

    /// All buildings ordered by id, optionally only those of one campus.
    async fn find_all(&self, campus_id: Option<i64>) -> Result<Vec<Building>, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Building>, DbError>;

    async fn update(&self, id: i64, changes: &BuildingChanges)
        -> Result<Option<Building>, DbError>;

    async fn delete(&self, id: i64) -> Result<Option<Building>, DbError>;
}
