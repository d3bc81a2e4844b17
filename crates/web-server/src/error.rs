use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::ValidationErrors;
use serde_json::json;
use services::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("Invalid request body: {0}")]
    Json(#[from] JsonRejection),
    #[error("Invalid path parameter: {0}")]
    Path(#[from] PathRejection),
    #[error("Invalid query parameter: {0}")]
    Query(#[from] QueryRejection),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Service(err) => match err {
                ServiceError::CampusNotFound(_)
                | ServiceError::BuildingNotFound(_)
                | ServiceError::ReferencedCampusNotFound(_) => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                ServiceError::EmptyUpdate | ServiceError::ImmutableField(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                ServiceError::Unavailable => {
                    tracing::warn!("Database pool exhausted.");
                    (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
                }
                ServiceError::Storage(db_err) => {
                    tracing::error!(error = ?db_err, "Database error.");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal database error occurred".to_string(),
                    )
                }
            },
            AppError::Validation(errors) => {
                let body = Json(json!({
                    "error": "Request validation failed",
                    "details": errors.fields(),
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::Json(rejection) => (rejection.status(), rejection.body_text()),
            AppError::Path(rejection) => (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()),
            AppError::Query(rejection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
