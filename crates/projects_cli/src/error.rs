//! Errors surfaced to the menu loop.

use projects_core::{ParseDecimalError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// Text that could not be read as the number a prompt asked for.
#[derive(Debug)]
pub enum InputError {
    InvalidNumber(String),
    InvalidDecimal {
        input: String,
        source: ParseDecimalError,
    },
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber(input) => write!(f, "{input} is not a valid number."),
            Self::InvalidDecimal { input, .. } => {
                write!(f, "{input} is not a valid decimal number.")
            }
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidNumber(_) => None,
            Self::InvalidDecimal { source, .. } => Some(source),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Input(InputError),
    Repo(RepoError),
    /// Console read/write failure; ends the session.
    Io(io::Error),
}

impl AppError {
    /// Stable label for log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Repo(RepoError::Validation(_)) => "validation",
            Self::Repo(_) => "storage",
            Self::Io(_) => "io",
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Input(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<io::Error> for AppError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
