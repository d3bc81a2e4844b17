use crate::error::ValidationErrors;
use crate::patch;
use crate::validate::{
    Validate, check_at_least, check_length, check_non_negative, check_range, MAX_YEAR, MIN_YEAR,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A physical university site. Represents a row of the `campuses` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Campus {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: Option<String>,
    pub established_year: Option<i32>,
    /// Total area in square metres.
    pub total_area: Option<Decimal>,
    pub student_capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The payload for creating a campus. `id` and the timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCampus {
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub established_year: Option<i32>,
    #[serde(default)]
    pub total_area: Option<Decimal>,
    #[serde(default)]
    pub student_capacity: Option<i32>,
}

impl NewCampus {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            address: None,
            established_year: None,
            total_area: None,
            student_capacity: None,
        }
    }
}

impl Validate for NewCampus {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_length(&mut errors, "name", &self.name, 1, 255);
        check_length(&mut errors, "city", &self.city, 1, 100);
        if let Some(year) = self.established_year {
            check_range(&mut errors, "established_year", year, MIN_YEAR, MAX_YEAR);
        }
        if let Some(area) = self.total_area {
            check_non_negative(&mut errors, "total_area", area);
        }
        if let Some(capacity) = self.student_capacity {
            check_at_least(&mut errors, "student_capacity", capacity, 0);
        }
        errors.into_result()
    }
}

/// A sparse set of campus changes.
///
/// `None` leaves a column untouched. For nullable columns the inner option
/// distinguishes "set to a value" from an explicit `null` that clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub established_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub total_area: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub student_capacity: Option<Option<i32>>,
}

impl CampusChanges {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.address.is_none()
            && self.established_year.is_none()
            && self.total_area.is_none()
            && self.student_capacity.is_none()
    }
}

impl Validate for CampusChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(name) = &self.name {
            check_length(&mut errors, "name", name, 1, 255);
        }
        if let Some(city) = &self.city {
            check_length(&mut errors, "city", city, 1, 100);
        }
        if let Some(Some(year)) = self.established_year {
            check_range(&mut errors, "established_year", year, MIN_YEAR, MAX_YEAR);
        }
        if let Some(Some(area)) = self.total_area {
            check_non_negative(&mut errors, "total_area", area);
        }
        if let Some(Some(capacity)) = self.student_capacity {
            check_at_least(&mut errors, "student_capacity", capacity, 0);
        }
        errors.into_result()
    }
}
