//! Data-access layer for the projects database.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep SQL and transaction handling out of the service and UI layers.
//!
//! # Invariants
//! - Each repository call is one atomic transaction.
//! - "Not found" is reported through `Option`/`bool`, storage failures
//!   through `RepoError`.

pub mod project_repo;
pub mod transaction;
