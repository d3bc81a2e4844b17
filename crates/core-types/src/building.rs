use crate::error::ValidationErrors;
use crate::patch;
use crate::validate::{
    Validate, check_at_least, check_length, check_non_negative, check_range, MAX_YEAR, MIN_YEAR,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// A structure on a campus. Represents a row of the `buildings` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Building {
    pub id: i64,
    pub campus_id: i64,
    pub name: String,
    /// Free-form category label, e.g. "Derslik" or "Kütüphane".
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub building_type: Option<String>,
    pub floor_count: Option<i32>,
    pub construction_year: Option<i32>,
    /// Gross floor area in square metres.
    pub gross_area: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBuilding {
    pub campus_id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub building_type: Option<String>,
    #[serde(default)]
    pub floor_count: Option<i32>,
    #[serde(default)]
    pub construction_year: Option<i32>,
    #[serde(default)]
    pub gross_area: Option<Decimal>,
}

impl NewBuilding {
    pub fn new(campus_id: i64, name: impl Into<String>) -> Self {
        Self {
            campus_id,
            name: name.into(),
            building_type: None,
            floor_count: None,
            construction_year: None,
            gross_area: None,
        }
    }
}

impl Validate for NewBuilding {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_length(&mut errors, "name", &self.name, 1, 255);
        if let Some(kind) = &self.building_type {
            check_length(&mut errors, "type", kind, 0, 50);
        }
        if let Some(floors) = self.floor_count {
            check_at_least(&mut errors, "floor_count", floors, 1);
        }
        if let Some(year) = self.construction_year {
            check_range(&mut errors, "construction_year", year, MIN_YEAR, MAX_YEAR);
        }
        if let Some(area) = self.gross_area {
            check_non_negative(&mut errors, "gross_area", area);
        }
        errors.into_result()
    }
}

/// A sparse set of building changes.
///
/// `campus_id` is captured only so that its presence can be refused: a
/// building never moves to another campus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingChanges {
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub campus_id: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "patch::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub building_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub floor_count: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub construction_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "patch::present", skip_serializing_if = "Option::is_none")]
    pub gross_area: Option<Option<Decimal>>,
}

impl BuildingChanges {
    pub fn touches_campus_id(&self) -> bool {
        self.campus_id.is_some()
    }

    /// True when no updatable field was supplied. `campus_id` is not one.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.building_type.is_none()
            && self.floor_count.is_none()
            && self.construction_year.is_none()
            && self.gross_area.is_none()
    }
}

impl Validate for BuildingChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(name) = &self.name {
            check_length(&mut errors, "name", name, 1, 255);
        }
        if let Some(Some(kind)) = &self.building_type {
            check_length(&mut errors, "type", kind, 0, 50);
        }
        if let Some(Some(floors)) = self.floor_count {
            check_at_least(&mut errors, "floor_count", floors, 1);
        }
        if let Some(Some(year)) = self.construction_year {
            check_range(&mut errors, "construction_year", year, MIN_YEAR, MAX_YEAR);
        }
        if let Some(Some(area)) = self.gross_area {
            check_non_negative(&mut errors, "gross_area", area);
        }
        errors.into_result()
    }
}
