//! # Campus Registry Database Crate
//!
//! This crate is the application-specific interface to the PostgreSQL
//! database holding the `campuses` and `buildings` tables.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** all SQL lives here. The rest of the application talks to the
//!   `CampusRepository` and `BuildingRepository` traits and never sees a query.
//! - **Parameterized Everywhere:** values only ever reach the database as bind
//!   parameters, including the dynamically assembled partial updates.
//! - **Asynchronous & Pooled:** every operation borrows a connection from a
//!   bounded `PgPool` that is created once and handed to each repository.
//! - **Atomic Mutations:** inserts, updates and deletes each run in their own
//!   transaction and roll back on failure.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: pool construction and schema setup.
//! - `PgCampusRepository` / `PgBuildingRepository`: the PostgreSQL implementations.
//! - `MemoryStore`: an in-process implementation of both traits.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod buildings;
pub mod campuses;
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use buildings::PgBuildingRepository;
pub use campuses::PgCampusRepository;
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::{Failure, MemoryStore};
pub use repository::{BuildingRepository, CampusRepository};
pub use sqlx::PgPool;
