//! Project entity graph.
//!
//! # Responsibility
//! - Define `Project` and its owned child records.
//! - Validate scalar fields before they reach storage.
//!
//! # Invariants
//! - `project_id` is `None` until the first successful insert and is never
//!   changed afterwards.
//! - Child collections are only populated by a fetch-by-id.
//! - `difficulty`, when set, is within `1..=5`.

use crate::model::decimal::Decimal2;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned project identity.
pub type ProjectId = i64;

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

/// Largest magnitude a `DECIMAL(7,2)` column can hold.
pub const MAX_HOURS: Decimal2 = Decimal2::from_hundredths(9_999_999);

/// Tracked unit of work with effort estimates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Project {
    pub project_id: Option<ProjectId>,
    pub project_name: String,
    pub estimated_hours: Option<Decimal2>,
    pub actual_hours: Option<Decimal2>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
    pub categories: Vec<Category>,
    pub steps: Vec<Step>,
    pub materials: Vec<Material>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub step_id: i64,
    pub project_id: ProjectId,
    pub step_text: String,
    pub step_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub material_id: i64,
    pub project_id: ProjectId,
    pub material_name: String,
    pub num_required: Option<i32>,
    pub cost: Option<Decimal2>,
}

/// Project field rule violations caught before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    BlankName,
    DifficultyOutOfRange(i32),
    HoursOutOfRange {
        field: &'static str,
        value: Decimal2,
    },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "project name cannot be blank"),
            Self::DifficultyOutOfRange(value) => write!(
                f,
                "difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {value}"
            ),
            Self::HoursOutOfRange { field, value } => {
                write!(f, "{field} must be between -{MAX_HOURS} and {MAX_HOURS}, got {value}")
            }
        }
    }
}

impl Error for ProjectValidationError {}

impl Project {
    /// Creates an unsaved project with only a name.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Checks scalar fields against storage rules.
    ///
    /// # Errors
    /// - `BlankName` when the name is empty after trimming.
    /// - `DifficultyOutOfRange` when difficulty is outside `1..=5`.
    /// - `HoursOutOfRange` when an hours value exceeds `DECIMAL(7,2)`.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.project_name.trim().is_empty() {
            return Err(ProjectValidationError::BlankName);
        }

        if let Some(difficulty) = self.difficulty {
            if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
                return Err(ProjectValidationError::DifficultyOutOfRange(difficulty));
            }
        }

        for (field, hours) in [
            ("estimated hours", self.estimated_hours),
            ("actual hours", self.actual_hours),
        ] {
            if let Some(value) = hours {
                if value.abs_hundredths() > MAX_HOURS.abs_hundredths() {
                    return Err(ProjectValidationError::HoursOutOfRange { field, value });
                }
            }
        }

        Ok(())
    }
}

impl Display for Project {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "   ID={}", display_opt(self.project_id.as_ref()))?;
        writeln!(f, "   name={}", self.project_name)?;
        writeln!(
            f,
            "   estimatedHours={}",
            display_opt(self.estimated_hours.as_ref())
        )?;
        writeln!(f, "   actualHours={}", display_opt(self.actual_hours.as_ref()))?;
        writeln!(f, "   difficulty={}", display_opt(self.difficulty.as_ref()))?;
        writeln!(f, "   notes={}", display_opt(self.notes.as_ref()))?;

        writeln!(f, "\n   Materials:")?;
        for material in &self.materials {
            writeln!(f, "      {material}")?;
        }

        writeln!(f, "\n   Steps:")?;
        for step in &self.steps {
            writeln!(f, "      {step}")?;
        }

        writeln!(f, "\n   Categories:")?;
        for category in &self.categories {
            writeln!(f, "      {category}")?;
        }

        Ok(())
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID={}, name={}", self.category_id, self.category_name)
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID={}, order={}, text={}",
            self.step_id, self.step_order, self.step_text
        )
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID={}, name={}, required={}, cost={}",
            self.material_id,
            self.material_name,
            display_opt(self.num_required.as_ref()),
            display_opt(self.cost.as_ref())
        )
    }
}

fn display_opt<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "null".to_string(), ToString::to_string)
}
