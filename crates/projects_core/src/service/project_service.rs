//! Project use-case service.
//!
//! # Responsibility
//! - Provide the CRUD entry points the console menu calls.
//! - Delegate persistence to a `ProjectRepository`.
//!
//! # Invariants
//! - Service layer remains storage-agnostic.
//! - "Not found" stays in `Option`/`bool`; it is never turned into an error.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::{ProjectRepository, RepoResult};

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves a new project and returns it with its assigned ID.
    pub fn add_project(&self, project: Project) -> RepoResult<Project> {
        self.repo.insert_project(project)
    }

    /// Lists projects ordered by name. Child collections are left empty.
    pub fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.fetch_all_projects()
    }

    /// Loads one project with its children, or `None` for an unknown ID.
    pub fn fetch_project_by_id(&self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.fetch_project_by_id(project_id)
    }

    /// Writes every scalar field of an already-merged project.
    ///
    /// Returns `false` when the project ID no longer exists.
    pub fn modify_project_details(&self, project: &Project) -> RepoResult<bool> {
        self.repo.modify_project_details(project)
    }

    /// Deletes a project; `false` when the ID is unknown.
    pub fn delete_project(&self, project_id: ProjectId) -> RepoResult<bool> {
        self.repo.delete_project(project_id)
    }
}
