//! Console entry point for the projects tracker.
//!
//! # Responsibility
//! - Resolve database and log locations from flags or per-user defaults.
//! - Start file logging, then hand stdin/stdout to the menu loop.

mod app;
mod console;
mod error;

use app::ProjectsApp;
use clap::Parser;
use console::Console;
use log::{error, info};
use projects_core::{
    default_log_level, init_logging, DbConfig, ProjectService, SqliteConnectionProvider,
    SqliteProjectRepository,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const APP_DIR_NAME: &str = "projects";
const DB_FILE_NAME: &str = "projects.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "projects")]
#[command(author, version, about = "Console manager for the projects tracking database", long_about = None)]
struct Cli {
    /// SQLite database file (default: <data dir>/projects/projects.sqlite3)
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Directory for rolling log files (default: <data dir>/projects/logs)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (default: debug in debug builds, info otherwise)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let app_dir = default_app_dir();

    let log_dir = absolutize(cli.log_dir.unwrap_or_else(|| app_dir.join(LOG_DIR_NAME)));
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let db_path = cli.db.unwrap_or_else(|| app_dir.join(DB_FILE_NAME));
    if let Err(err) = ensure_parent_dir(&db_path) {
        error!("event=cli_start module=cli status=error error_code=db_dir_failed error={err}");
        eprintln!(
            "cannot create directory for database `{}`: {err}",
            db_path.display()
        );
        return ExitCode::FAILURE;
    }
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        db_path.display()
    );

    let provider = SqliteConnectionProvider::new(DbConfig::new(db_path));
    let service = ProjectService::new(SqliteProjectRepository::new(provider));
    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut app = ProjectsApp::new(service, console);

    match app.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={err}");
            eprintln!("console I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn default_app_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(&path))
        .unwrap_or(path)
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{absolutize, ensure_parent_dir, Cli};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    #[test]
    fn flags_are_optional() {
        let cli = Cli::try_parse_from(["projects"]).unwrap();
        assert!(cli.db.is_none());
        assert!(cli.log_dir.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "projects",
            "--db",
            "/tmp/p.sqlite3",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/p.sqlite3")));
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn absolutize_keeps_absolute_paths() {
        let absolute = std::env::temp_dir();
        assert_eq!(absolutize(absolute.clone()), absolute);
        assert!(absolutize(PathBuf::from("logs")).is_absolute());
    }

    #[test]
    fn ensure_parent_dir_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("projects.sqlite3");

        ensure_parent_dir(&db_path).unwrap();

        assert!(db_path.parent().unwrap().is_dir());
        ensure_parent_dir(Path::new("projects.sqlite3")).unwrap();
    }
}
