//! Core domain logic for the projects tracker.
//! Owns storage, the project entity graph, and the transactional CRUD layer.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{ConnectionProvider, DbConfig, DbError, DbResult, SqliteConnectionProvider};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::decimal::{Decimal2, ParseDecimalError};
pub use model::project::{
    Category, Material, Project, ProjectId, ProjectValidationError, Step, MAX_DIFFICULTY,
    MIN_DIFFICULTY,
};
pub use repo::project_repo::{ProjectRepository, RepoError, RepoResult, SqliteProjectRepository};
pub use service::project_service::ProjectService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
