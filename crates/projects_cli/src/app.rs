//! Interactive projects menu.
//!
//! # Responsibility
//! - Print the menu, read a selection, run one project operation per pass.
//! - Report every operation error once and keep looping.
//!
//! # Invariants
//! - The selected project is the only state carried between passes.
//! - Only console I/O failures end the loop early.

use crate::console::Console;
use crate::error::AppError;
use log::{info, warn};
use projects_core::{Decimal2, Project, ProjectId, ProjectRepository, ProjectService};
use std::fmt::Display;
use std::io::{self, BufRead, Write};

const OPERATIONS: &[&str] = &[
    "1) Add a project",
    "2) List projects",
    "3) Select a project",
    "4) Update project details",
    "5) Delete a project",
];

enum Flow {
    Continue,
    Exit,
}

pub struct ProjectsApp<R: ProjectRepository, I, O> {
    service: ProjectService<R>,
    console: Console<I, O>,
    current_project: Option<Project>,
}

impl<R, I, O> ProjectsApp<R, I, O>
where
    R: ProjectRepository,
    I: BufRead,
    O: Write,
{
    pub fn new(service: ProjectService<R>, console: Console<I, O>) -> Self {
        Self {
            service,
            console,
            current_project: None,
        }
    }

    /// Runs the menu until the user quits or input ends.
    ///
    /// # Errors
    /// Returns only console read/write failures.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.process_user_selection() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(AppError::Io(err)) => return Err(err),
                Err(err) => {
                    warn!(
                        "event=menu_operation module=cli status=error error_kind={}",
                        err.kind()
                    );
                    if let Err(AppError::Io(io_err)) =
                        self.console.print_line(format_args!("\nError: {err} Try again."))
                    {
                        return Err(io_err);
                    }
                }
            }
        }
    }

    fn process_user_selection(&mut self) -> Result<Flow, AppError> {
        self.print_operations()?;

        let Some(selection) = self.console.read_number::<i32>("Enter a menu selection")? else {
            self.console.print_line("Exiting the menu.")?;
            info!("event=menu_exit module=cli status=ok");
            return Ok(Flow::Exit);
        };

        info!("event=menu_selection module=cli selection={selection}");
        match selection {
            1 => self.create_project()?,
            2 => self.list_projects()?,
            3 => self.select_project()?,
            4 => self.update_project_details()?,
            5 => self.delete_project()?,
            other => self
                .console
                .print_line(format_args!("\n{other} is not a valid selection. Try again."))?,
        }
        Ok(Flow::Continue)
    }

    fn print_operations(&mut self) -> Result<(), AppError> {
        self.console
            .print_line("\nThese are the available selections. Press the Enter key to quit.")?;
        for operation in OPERATIONS {
            self.console.print_line(format_args!("  {operation}"))?;
        }

        match &self.current_project {
            Some(project) => self
                .console
                .print_line(format_args!("\nYou are working with project: {project}")),
            None => self
                .console
                .print_line("\nYou are not working with a project."),
        }
    }

    fn create_project(&mut self) -> Result<(), AppError> {
        let mut project = Project::new(
            self.console
                .read_string("Enter the project name")?
                .unwrap_or_default(),
        );
        project.estimated_hours = self.console.read_decimal("Enter the estimated hours")?;
        project.actual_hours = self.console.read_decimal("Enter the actual hours")?;
        project.difficulty = self
            .console
            .read_number("Enter the project difficulty (1-5)")?;
        project.notes = self.console.read_string("Enter the project notes")?;

        let saved = self.service.add_project(project)?;
        self.console.print_line(format_args!(
            "\nYou have successfully created project: {saved}"
        ))
    }

    fn list_projects(&mut self) -> Result<(), AppError> {
        let projects = self.service.fetch_all_projects()?;

        self.console.print_line("\nProjects:")?;
        for project in &projects {
            if let Some(project_id) = project.project_id {
                self.console
                    .print_line(format_args!("  {project_id}: {}", project.project_name))?;
            }
        }
        Ok(())
    }

    fn select_project(&mut self) -> Result<(), AppError> {
        self.list_projects()?;
        let Some(project_id) = self
            .console
            .read_number::<ProjectId>("Enter a project ID to select a project")?
        else {
            return Ok(());
        };

        self.current_project = None;
        self.current_project = self.service.fetch_project_by_id(project_id)?;
        if self.current_project.is_none() {
            self.console.print_line("\nInvalid project ID selected.")?;
        }
        Ok(())
    }

    fn update_project_details(&mut self) -> Result<(), AppError> {
        let Some(mut project) = self.current_project.clone() else {
            return self.console.print_line("\nPlease select a project.");
        };
        let Some(project_id) = project.project_id else {
            return self.console.print_line("\nPlease select a project.");
        };

        let name = self.console.read_string(&format!(
            "Enter the project name [{}]",
            project.project_name
        ))?;
        let estimated_hours = self.console.read_decimal(&format!(
            "Enter the estimated hours [{}]",
            shown(project.estimated_hours.as_ref())
        ))?;
        let actual_hours = self.console.read_decimal(&format!(
            "Enter the actual hours [{}]",
            shown(project.actual_hours.as_ref())
        ))?;
        let difficulty = self.console.read_number(&format!(
            "Enter the project difficulty (1-5) [{}]",
            shown(project.difficulty.as_ref())
        ))?;
        let notes = self.console.read_string(&format!(
            "Enter the project notes [{}]",
            shown(project.notes.as_ref())
        ))?;

        merge_project_details(
            &mut project,
            name,
            estimated_hours,
            actual_hours,
            difficulty,
            notes,
        );

        if self.service.modify_project_details(&project)? {
            self.current_project = self.service.fetch_project_by_id(project_id)?;
            self.console
                .print_line(format_args!("\nProject {project_id} was updated."))
        } else {
            self.current_project = None;
            self.console
                .print_line(format_args!("\nProject ID {project_id} does not exist."))
        }
    }

    fn delete_project(&mut self) -> Result<(), AppError> {
        self.list_projects()?;
        let Some(project_id) = self
            .console
            .read_number::<ProjectId>("Enter the ID of the project to delete")?
        else {
            return Ok(());
        };

        if !self.service.delete_project(project_id)? {
            return self
                .console
                .print_line(format_args!("\nProject ID {project_id} does not exist."));
        }

        let deleted_current = self
            .current_project
            .as_ref()
            .is_some_and(|project| project.project_id == Some(project_id));
        if deleted_current {
            self.current_project = None;
        }
        self.console.print_line(format_args!(
            "\nProject {project_id} was deleted successfully."
        ))
    }
}

/// Blank answers keep the value already on the project.
fn merge_project_details(
    project: &mut Project,
    name: Option<String>,
    estimated_hours: Option<Decimal2>,
    actual_hours: Option<Decimal2>,
    difficulty: Option<i32>,
    notes: Option<String>,
) {
    if let Some(name) = name {
        project.project_name = name;
    }
    project.estimated_hours = estimated_hours.or(project.estimated_hours);
    project.actual_hours = actual_hours.or(project.actual_hours);
    project.difficulty = difficulty.or(project.difficulty);
    if notes.is_some() {
        project.notes = notes;
    }
}

fn shown<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(String::new, ToString::to_string)
}
