use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Campus with ID {0} not found")]
    CampusNotFound(i64),

    #[error("Building with ID {0} not found")]
    BuildingNotFound(i64),

    /// The campus named by a building payload or filter does not exist.
    #[error("Campus ID {0} not found")]
    ReferencedCampusNotFound(i64),

    #[error("No fields were supplied for the update")]
    EmptyUpdate,

    #[error("The field '{0}' cannot be updated")]
    ImmutableField(&'static str),

    #[error("No database connection became available in time")]
    Unavailable,

    #[error("Storage failure: {0}")]
    Storage(#[source] DbError),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::PoolTimedOut => ServiceError::Unavailable,
            other => ServiceError::Storage(other),
        }
    }
}
