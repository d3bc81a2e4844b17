use crate::error::ServiceError;
use core_types::{Building, BuildingChanges, NewBuilding};
use database::{BuildingRepository, CampusRepository, DbError};
use std::sync::Arc;

/// Building operations. Holds the campus repository as well, to check the
/// campus a building refers to before touching the buildings table.
#[derive(Clone)]
pub struct BuildingService {
    repository: Arc<dyn BuildingRepository>,
    campuses: Arc<dyn CampusRepository>,
}

impl BuildingService {
    pub fn new(
        repository: Arc<dyn BuildingRepository>,
        campuses: Arc<dyn CampusRepository>,
    ) -> Self {
        Self {
            repository,
            campuses,
        }
    }

    async fn ensure_campus_exists(&self, campus_id: i64) -> Result<(), ServiceError> {
        match self.campuses.find_by_id(campus_id).await? {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(campus_id, "Referenced campus does not exist.");
                Err(ServiceError::ReferencedCampusNotFound(campus_id))
            }
        }
    }

    pub async fn create(&self, building: NewBuilding) -> Result<Building, ServiceError> {
        self.ensure_campus_exists(building.campus_id).await?;

        // The check and the insert are separate round trips. A campus deleted in
        // between trips the foreign key, which reads the same as a failed check.
        let created = self
            .repository
            .create(&building)
            .await
            .map_err(|err| match err {
                DbError::ForeignKeyViolation(_) => {
                    ServiceError::ReferencedCampusNotFound(building.campus_id)
                }
                other => other.into(),
            })?;
        tracing::info!(
            building_id = created.id,
            campus_id = created.campus_id,
            "Building created."
        );
        Ok(created)
    }

    /// Lists buildings, optionally only those of `campus_id`, which must exist.
    pub async fn list(&self, campus_id: Option<i64>) -> Result<Vec<Building>, ServiceError> {
        if let Some(campus_id) = campus_id {
            self.ensure_campus_exists(campus_id).await?;
        }
        Ok(self.repository.find_all(campus_id).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Building, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::BuildingNotFound(id))
    }

    /// Applies a partial update. A payload that mentions `campus_id` at all is refused.
    pub async fn update(
        &self,
        id: i64,
        changes: BuildingChanges,
    ) -> Result<Building, ServiceError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ServiceError::BuildingNotFound(id));
        }
        if changes.touches_campus_id() {
            tracing::warn!(building_id = id, "Rejected attempt to move a building to another campus.");
            return Err(ServiceError::ImmutableField("campus_id"));
        }
        if changes.is_empty() {
            return Err(ServiceError::EmptyUpdate);
        }

        let updated = self
            .repository
            .update(id, &changes)
            .await?
            .ok_or(ServiceError::BuildingNotFound(id))?;
        tracing::info!(building_id = id, "Building updated.");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<Building, ServiceError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or(ServiceError::BuildingNotFound(id))?;
        tracing::info!(building_id = id, "Building deleted.");
        Ok(deleted)
    }
}
