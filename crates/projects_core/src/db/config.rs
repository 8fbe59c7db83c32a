use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings handed to [`super::SqliteConnectionProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SQLite database file. Created on first connect if missing.
    pub path: PathBuf,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
