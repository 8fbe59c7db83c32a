//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide atomic insert/fetch/update/delete over the `project` table.
//! - Load a project's categories, steps and materials in the same
//!   transaction as the project row.
//!
//! # Invariants
//! - One connection and one transaction per call.
//! - Write paths call `Project::validate()` before any SQL runs.
//! - Read paths only decode; a stored row that breaks a field rule still
//!   loads so it can be listed, fixed or deleted.
//! - Missing rows are `Ok(None)` / `Ok(false)`, never an error.
//! - SQL text is static; only values are bound.

use crate::db::{ConnectionProvider, DbError};
use crate::model::decimal::Decimal2;
use crate::model::project::{
    Category, Material, Project, ProjectId, ProjectValidationError, Step,
};
use crate::repo::transaction::with_transaction;
use log::info;
use rusqlite::{params, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    project_id,
    project_name,
    estimated_hours,
    actual_hours,
    difficulty,
    notes
FROM project";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for project persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProjectValidationError),
    Db(DbError),
    /// Update called on a project that was never inserted.
    MissingId,
    /// Insert called on a project that already has an identity.
    IdAlreadyAssigned(ProjectId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingId => write!(f, "project has no ID; insert it first"),
            Self::IdAlreadyAssigned(id) => write!(f, "project already has ID {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::MissingId | Self::IdAlreadyAssigned(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for project CRUD operations.
pub trait ProjectRepository {
    /// Persists a new project and returns it with its assigned ID.
    fn insert_project(&self, project: Project) -> RepoResult<Project>;
    /// Lists every project by name, without child collections.
    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>>;
    /// Loads one project with categories, steps and materials.
    fn fetch_project_by_id(&self, project_id: ProjectId) -> RepoResult<Option<Project>>;
    /// Replaces all scalar fields; `false` when no row has that ID.
    fn modify_project_details(&self, project: &Project) -> RepoResult<bool>;
    /// Removes a project and its children; `false` when no row has that ID.
    fn delete_project(&self, project_id: ProjectId) -> RepoResult<bool>;
}

impl<R: ProjectRepository + ?Sized> ProjectRepository for &R {
    fn insert_project(&self, project: Project) -> RepoResult<Project> {
        (**self).insert_project(project)
    }

    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        (**self).fetch_all_projects()
    }

    fn fetch_project_by_id(&self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        (**self).fetch_project_by_id(project_id)
    }

    fn modify_project_details(&self, project: &Project) -> RepoResult<bool> {
        (**self).modify_project_details(project)
    }

    fn delete_project(&self, project_id: ProjectId) -> RepoResult<bool> {
        (**self).delete_project(project_id)
    }
}

/// SQLite-backed project repository.
///
/// Holds only a connection provider; every call opens its own connection.
pub struct SqliteProjectRepository<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteProjectRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: ConnectionProvider> ProjectRepository for SqliteProjectRepository<P> {
    fn insert_project(&self, mut project: Project) -> RepoResult<Project> {
        if let Some(existing) = project.project_id {
            return Err(RepoError::IdAlreadyAssigned(existing));
        }
        project.validate()?;

        let project_id = with_transaction(&self.provider, "project_insert", |tx| {
            tx.execute(
                "INSERT INTO project (
                    project_name,
                    estimated_hours,
                    actual_hours,
                    difficulty,
                    notes
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    project.project_name.as_str(),
                    decimal_to_db(project.estimated_hours),
                    decimal_to_db(project.actual_hours),
                    project.difficulty,
                    project.notes.as_deref(),
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        project.project_id = Some(project_id);
        info!("event=project_insert module=repo status=ok project_id={project_id}");
        Ok(project)
    }

    fn fetch_all_projects(&self) -> RepoResult<Vec<Project>> {
        with_transaction(&self.provider, "project_fetch_all", |tx| {
            let mut stmt = tx.prepare(&format!(
                "{PROJECT_SELECT_SQL} ORDER BY project_name ASC, project_id ASC;"
            ))?;
            let mut rows = stmt.query([])?;
            let mut projects = Vec::new();
            while let Some(row) = rows.next()? {
                projects.push(parse_project_row(row)?);
            }
            Ok(projects)
        })
    }

    fn fetch_project_by_id(&self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        with_transaction(&self.provider, "project_fetch_by_id", |tx| {
            let Some(mut project) = fetch_project_row(tx, project_id)? else {
                return Ok(None);
            };

            project.materials = fetch_materials_for_project(tx, project_id)?;
            project.steps = fetch_steps_for_project(tx, project_id)?;
            project.categories = fetch_categories_for_project(tx, project_id)?;
            Ok(Some(project))
        })
    }

    fn modify_project_details(&self, project: &Project) -> RepoResult<bool> {
        let project_id = project.project_id.ok_or(RepoError::MissingId)?;
        project.validate()?;

        let changed = with_transaction(&self.provider, "project_update", |tx| {
            let changed = tx.execute(
                "UPDATE project
                 SET
                    project_name = ?1,
                    estimated_hours = ?2,
                    actual_hours = ?3,
                    difficulty = ?4,
                    notes = ?5
                 WHERE project_id = ?6;",
                params![
                    project.project_name.as_str(),
                    decimal_to_db(project.estimated_hours),
                    decimal_to_db(project.actual_hours),
                    project.difficulty,
                    project.notes.as_deref(),
                    project_id,
                ],
            )?;
            Ok(changed)
        })?;

        info!("event=project_update module=repo status=ok project_id={project_id} changed={changed}");
        Ok(changed == 1)
    }

    fn delete_project(&self, project_id: ProjectId) -> RepoResult<bool> {
        let changed = with_transaction(&self.provider, "project_delete", |tx| {
            let changed = tx.execute("DELETE FROM project WHERE project_id = ?1;", [project_id])?;
            Ok(changed)
        })?;

        info!("event=project_delete module=repo status=ok project_id={project_id} changed={changed}");
        Ok(changed == 1)
    }
}

fn fetch_project_row(tx: &Transaction<'_>, project_id: ProjectId) -> RepoResult<Option<Project>> {
    let mut stmt = tx.prepare(&format!("{PROJECT_SELECT_SQL} WHERE project_id = ?1;"))?;
    let mut rows = stmt.query([project_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_project_row(row)?));
    }

    Ok(None)
}

fn fetch_materials_for_project(
    tx: &Transaction<'_>,
    project_id: ProjectId,
) -> RepoResult<Vec<Material>> {
    let mut stmt = tx.prepare(
        "SELECT material_id, project_id, material_name, num_required, cost
         FROM material
         WHERE project_id = ?1
         ORDER BY material_id ASC;",
    )?;
    let mut rows = stmt.query([project_id])?;
    let mut materials = Vec::new();
    while let Some(row) = rows.next()? {
        materials.push(Material {
            material_id: row.get("material_id")?,
            project_id: row.get("project_id")?,
            material_name: row.get("material_name")?,
            num_required: row.get("num_required")?,
            cost: decimal_from_db(row, "cost", "material.cost")?,
        });
    }
    Ok(materials)
}

fn fetch_steps_for_project(tx: &Transaction<'_>, project_id: ProjectId) -> RepoResult<Vec<Step>> {
    let mut stmt = tx.prepare(
        "SELECT step_id, project_id, step_text, step_order
         FROM step
         WHERE project_id = ?1
         ORDER BY step_order ASC, step_id ASC;",
    )?;
    let mut rows = stmt.query([project_id])?;
    let mut steps = Vec::new();
    while let Some(row) = rows.next()? {
        steps.push(Step {
            step_id: row.get("step_id")?,
            project_id: row.get("project_id")?,
            step_text: row.get("step_text")?,
            step_order: row.get("step_order")?,
        });
    }
    Ok(steps)
}

fn fetch_categories_for_project(
    tx: &Transaction<'_>,
    project_id: ProjectId,
) -> RepoResult<Vec<Category>> {
    let mut stmt = tx.prepare(
        "SELECT c.category_id, c.category_name
         FROM category c
         INNER JOIN project_category pc ON pc.category_id = c.category_id
         WHERE pc.project_id = ?1
         ORDER BY c.category_name ASC, c.category_id ASC;",
    )?;
    let mut rows = stmt.query([project_id])?;
    let mut categories = Vec::new();
    while let Some(row) = rows.next()? {
        categories.push(Category {
            category_id: row.get("category_id")?,
            category_name: row.get("category_name")?,
        });
    }
    Ok(categories)
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    Ok(Project {
        project_id: Some(row.get("project_id")?),
        project_name: row.get("project_name")?,
        estimated_hours: decimal_from_db(row, "estimated_hours", "project.estimated_hours")?,
        actual_hours: decimal_from_db(row, "actual_hours", "project.actual_hours")?,
        difficulty: row.get("difficulty")?,
        notes: row.get("notes")?,
        ..Project::default()
    })
}

fn decimal_to_db(value: Option<Decimal2>) -> Option<String> {
    value.map(|decimal| decimal.to_string())
}

fn decimal_from_db(row: &Row<'_>, column: &str, label: &str) -> RepoResult<Option<Decimal2>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|err| RepoError::InvalidData(format!("{err} in {label}"))),
        None => Ok(None),
    }
}
