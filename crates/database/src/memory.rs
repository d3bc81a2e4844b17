//! An in-process store implementing both repository traits.
//!
//! It mirrors the behavior the PostgreSQL schema guarantees (sequential ids,
//! the campus foreign key, `ON DELETE CASCADE`) so that services and the HTTP
//! layer can be exercised without a database. [`MemoryStore::set_failing`]
//! makes every call fail, either like a broken query or like an exhausted pool.

use crate::repository::{BuildingRepository, CampusRepository};
use crate::DbError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use core_types::{Building, BuildingChanges, Campus, CampusChanges, NewBuilding, NewCampus};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Tables {
    campuses: BTreeMap<i64, Campus>,
    buildings: BTreeMap<i64, Building>,
    last_campus_id: i64,
    last_building_id: i64,
}

/// How a failing [`MemoryStore`] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Failure {
    /// Every call errors as a rejected query would.
    Query = 1,
    /// Every call errors as if no connection became free in time.
    PoolTimedOut = 2,
}

const HEALTHY: u8 = 0;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    failure: AtomicU8,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` restores normal operation.
    pub fn set_failing(&self, failure: Option<Failure>) {
        let code = failure.map_or(HEALTHY, |failure| failure as u8);
        self.failure.store(code, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DbError> {
        match self.failure.load(Ordering::SeqCst) {
            HEALTHY => Ok(()),
            code if code == Failure::PoolTimedOut as u8 => Err(DbError::PoolTimedOut),
            _ => Err(DbError::QueryError(sqlx::Error::Protocol(
                "simulated storage failure".to_string(),
            ))),
        }
    }
}

/// Lowercases one character at a time, keeping only the first character of a
/// multi-character mapping, the way PostgreSQL's `ILIKE` folds `İ` to `i`.
fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// A timestamp strictly later than `previous`, so every mutation advances `updated_at`.
fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + Duration::microseconds(1))
}

#[async_trait]
impl CampusRepository for MemoryStore {
    async fn create(&self, campus: &NewCampus) -> Result<Campus, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        tables.last_campus_id += 1;
        let now = Utc::now();
        let created = Campus {
            id: tables.last_campus_id,
            name: campus.name.clone(),
            city: campus.city.clone(),
            address: campus.address.clone(),
            established_year: campus.established_year,
            total_area: campus.total_area,
            student_capacity: campus.student_capacity,
            created_at: now,
            updated_at: now,
        };
        tables.campuses.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_all(&self, city: Option<&str>) -> Result<Vec<Campus>, DbError> {
        self.check()?;
        let tables = self.tables.lock().await;
        let needle = city.map(fold_case);
        Ok(tables
            .campuses
            .values()
            .filter(|campus| match &needle {
                Some(needle) => fold_case(&campus.city).contains(needle.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Campus>, DbError> {
        self.check()?;
        Ok(self.tables.lock().await.campuses.get(&id).cloned())
    }

    async fn update(&self, id: i64, changes: &CampusChanges) -> Result<Option<Campus>, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        let Some(campus) = tables.campuses.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            campus.name = name.clone();
        }
        if let Some(city) = &changes.city {
            campus.city = city.clone();
        }
        if let Some(address) = &changes.address {
            campus.address = address.clone();
        }
        if let Some(year) = changes.established_year {
            campus.established_year = year;
        }
        if let Some(area) = changes.total_area {
            campus.total_area = area;
        }
        if let Some(capacity) = changes.student_capacity {
            campus.student_capacity = capacity;
        }
        campus.updated_at = advance(campus.updated_at);
        Ok(Some(campus.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Campus>, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        let deleted = tables.campuses.remove(&id);
        if deleted.is_some() {
            tables.buildings.retain(|_, building| building.campus_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl BuildingRepository for MemoryStore {
    async fn create(&self, building: &NewBuilding) -> Result<Building, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        if !tables.campuses.contains_key(&building.campus_id) {
            return Err(DbError::ForeignKeyViolation(format!(
                "campus {} is not present in table \"campuses\"",
                building.campus_id
            )));
        }
        tables.last_building_id += 1;
        let now = Utc::now();
        let created = Building {
            id: tables.last_building_id,
            campus_id: building.campus_id,
            name: building.name.clone(),
            building_type: building.building_type.clone(),
            floor_count: building.floor_count,
            construction_year: building.construction_year,
            gross_area: building.gross_area,
            created_at: now,
            updated_at: now,
        };
        tables.buildings.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_all(&self, campus_id: Option<i64>) -> Result<Vec<Building>, DbError> {
        self.check()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .buildings
            .values()
            .filter(|building| campus_id.is_none_or(|id| building.campus_id == id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Building>, DbError> {
        self.check()?;
        Ok(self.tables.lock().await.buildings.get(&id).cloned())
    }

    async fn update(
        &self,
        id: i64,
        changes: &BuildingChanges,
    ) -> Result<Option<Building>, DbError> {
        self.check()?;
        let mut tables = self.tables.lock().await;
        let Some(building) = tables.buildings.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            building.name = name.clone();
        }
        if let Some(kind) = &changes.building_type {
            building.building_type = kind.clone();
        }
        if let Some(floors) = changes.floor_count {
            building.floor_count = floors;
        }
        if let Some(year) = changes.construction_year {
            building.construction_year = year;
        }
        if let Some(area) = changes.gross_area {
            building.gross_area = area;
        }
        building.updated_at = advance(building.updated_at);
        Ok(Some(building.clone()))
    }

    async fn delete(&self, id: i64) -> Result<Option<Building>, DbError> {
        self.check()?;
        Ok(self.tables.lock().await.buildings.remove(&id))
    }
}
