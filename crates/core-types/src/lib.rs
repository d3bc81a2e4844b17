//! # Campus Registry Core Types
//!
//! The shared vocabulary of the workspace: the persisted `Campus` and
//! `Building` records, the payloads used to create them, the sparse
//! change-sets used to update them, and the input validation rules that guard
//! the HTTP boundary.
//!
//! This crate has no knowledge of the database or the web framework; both the
//! `database` and `web-server` crates speak in these types.

// Declare the modules that make up this crate.
pub mod building;
pub mod campus;
pub mod error;
pub mod patch;
pub mod validate;

// Re-export the core types to provide a clean public API.
pub use building::{Building, BuildingChanges, NewBuilding};
pub use campus::{Campus, CampusChanges, NewCampus};
pub use error::{FieldError, ValidationErrors};
pub use validate::Validate;
