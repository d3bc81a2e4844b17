use crate::error::ServiceError;
use core_types::{Campus, CampusChanges, NewCampus};
use database::CampusRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct CampusService {
    repository: Arc<dyn CampusRepository>,
}

impl CampusService {
    pub fn new(repository: Arc<dyn CampusRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, campus: NewCampus) -> Result<Campus, ServiceError> {
        let created = self.repository.create(&campus).await?;
        tracing::info!(campus_id = created.id, name = %created.name, "Campus created.");
        Ok(created)
    }

    /// Lists campuses, optionally those whose city contains `city`. An empty filter lists all.
    pub async fn list(&self, city: Option<&str>) -> Result<Vec<Campus>, ServiceError> {
        let city = city.filter(|city| !city.is_empty());
        Ok(self.repository.find_all(city).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Campus, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::CampusNotFound(id))
    }

    pub async fn update(&self, id: i64, changes: CampusChanges) -> Result<Campus, ServiceError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ServiceError::CampusNotFound(id));
        }
        if changes.is_empty() {
            tracing::debug!(campus_id = id, "Rejected campus update without fields.");
            return Err(ServiceError::EmptyUpdate);
        }

        // The row can still vanish between the lookup and the update.
        let updated = self
            .repository
            .update(id, &changes)
            .await?
            .ok_or(ServiceError::CampusNotFound(id))?;
        tracing::info!(campus_id = id, "Campus updated.");
        Ok(updated)
    }

    /// Deletes a campus together with all of its buildings.
    pub async fn delete(&self, id: i64) -> Result<Campus, ServiceError> {
        let deleted = self
            .repository
            .delete(id)
            .await?
            .ok_or(ServiceError::CampusNotFound(id))?;
        tracing::info!(campus_id = id, "Campus deleted.");
        Ok(deleted)
    }
}
