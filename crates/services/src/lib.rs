//! # Campus Registry Services
//!
//! The business rules of the registry, sitting between the HTTP handlers and
//! the repositories:
//!
//! - lookups that find nothing become typed "not found" errors;
//! - updates must carry at least one field;
//! - a building can only be created under, or listed for, a campus that exists;
//! - a building never changes campus.
//!
//! Services are written against the repository traits, so the same code runs
//! on PostgreSQL in production and on `database::MemoryStore` in tests.

pub mod building;
pub mod campus;
pub mod error;

pub use building::BuildingService;
pub use campus::CampusService;
pub use error::ServiceError;
