use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use core_types::{
    Building, BuildingChanges, Campus, CampusChanges, NewBuilding, NewCampus, Validate,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

type JsonBody<T> = WithRejection<Json<T>, AppError>;
type IdPath = WithRejection<Path<i64>, AppError>;

#[derive(Debug, Deserialize)]
pub struct CampusFilter {
    /// Case-insensitive substring of the city name.
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BuildingFilter {
    pub campus_id: Option<i64>,
}

/// # GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the University Campus and Building API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ==============================================================================
// Campuses
// ==============================================================================

/// # POST /api/campuses
pub async fn create_campus(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<NewCampus>,
) -> Result<(StatusCode, Json<Campus>), AppError> {
    payload.validate()?;
    let campus = state.campuses.create(payload).await?;
    Ok((StatusCode::CREATED, Json(campus)))
}

/// # GET /api/campuses?city=
pub async fn list_campuses(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(filter), _): WithRejection<Query<CampusFilter>, AppError>,
) -> Result<Json<Vec<Campus>>, AppError> {
    let campuses = state.campuses.list(filter.city.as_deref()).await?;
    Ok(Json(campuses))
}

/// # GET /api/campuses/:campus_id
pub async fn get_campus(
    WithRejection(Path(campus_id), _): IdPath,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Campus>, AppError> {
    Ok(Json(state.campuses.get_by_id(campus_id).await?))
}

/// # PUT /api/campuses/:campus_id
pub async fn update_campus(
    WithRejection(Path(campus_id), _): IdPath,
    State(state): State<Arc<AppState>>,
    WithRejection(Json(changes), _): JsonBody<CampusChanges>,
) -> Result<Json<Campus>, AppError> {
    changes.validate()?;
    Ok(Json(state.campuses.update(campus_id, changes).await?))
}

/// # DELETE /api/campuses/:campus_id
/// Deletes the campus and, by cascade, all of its buildings.
pub async fn delete_campus(
    WithRejection(Path(campus_id), _): IdPath,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Campus>, AppError> {
    Ok(Json(state.campuses.delete(campus_id).await?))
}

// ==============================================================================
// Buildings
// ==============================================================================

/// # POST /api/buildings
pub async fn create_building(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): JsonBody<NewBuilding>,
) -> Result<(StatusCode, Json<Building>), AppError> {
    payload.validate()?;
    let building = state.buildings.create(payload).await?;
    Ok((StatusCode::CREATED, Json(building)))
}

/// # GET /api/buildings?campus_id=
pub async fn list_buildings(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(filter), _): WithRejection<Query<BuildingFilter>, AppError>,
) -> Result<Json<Vec<Building>>, AppError> {
    Ok(Json(state.buildings.list(filter.campus_id).await?))
}

/// # GET /api/buildings/:building_id
pub async fn get_building(
    WithRejection(Path(building_id), _): IdPath,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Building>, AppError> {
    Ok(Json(state.buildings.get_by_id(building_id).await?))
}

/// # PUT /api/buildings/:building_id
pub async fn update_building(
    WithRejection(Path(building_id), _): IdPath,
    State(state): State<Arc<AppState>>,
    WithRejection(Json(changes), _): JsonBody<BuildingChanges>,
) -> Result<Json<Building>, AppError> {
    changes.validate()?;
    Ok(Json(state.buildings.update(building_id, changes).await?))
}

/// # DELETE /api/buildings/:building_id
pub async fn delete_building(
    WithRejection(Path(building_id), _): IdPath,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Building>, AppError> {
    Ok(Json(state.buildings.delete(building_id).await?))
}
