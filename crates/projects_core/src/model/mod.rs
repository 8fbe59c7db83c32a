//! Project tracking domain model.
//!
//! # Responsibility
//! - Define the project entity graph and its value types.
//! - Keep field rules next to the data they constrain.
//!
//! # Invariants
//! - A project owns its child collections; children carry no back-references.

pub mod decimal;
pub mod project;
