//! Connection bootstrap for the projects database.
//!
//! # Responsibility
//! - Open a fresh SQLite connection per data-access call.
//! - Configure pragmas and apply the schema before handing it out.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Open and bootstrap failures surface as `DbError::Connection`, never
//!   as a bare SQLite error. A too-new schema stays
//!   `DbError::UnsupportedSchemaVersion`.

use super::config::DbConfig;
use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{debug, error};
use rusqlite::Connection;
use std::time::Instant;

/// Source of open connections for the data-access layer.
///
/// The caller owns the returned connection and drops it when done.
pub trait ConnectionProvider {
    fn connect(&self) -> DbResult<Connection>;
}

/// Opens connections to the SQLite file named in a [`DbConfig`].
#[derive(Debug, Clone)]
pub struct SqliteConnectionProvider {
    config: DbConfig,
}

impl SqliteConnectionProvider {
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }
}

impl ConnectionProvider for SqliteConnectionProvider {
    fn connect(&self) -> DbResult<Connection> {
        open_db(&self.config)
    }
}

/// Opens the configured database file and applies the schema.
///
/// # Side effects
/// - Creates the database file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(config: &DbConfig) -> DbResult<Connection> {
    let started_at = Instant::now();

    let mut conn = Connection::open(config.path()).map_err(|source| {
        error!(
            "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
            started_at.elapsed().as_millis(),
            source
        );
        DbError::Connection {
            path: config.path.clone(),
            source,
        }
    })?;

    if let Err(err) = bootstrap_connection(&mut conn, config) {
        error!(
            "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
            started_at.elapsed().as_millis(),
            err
        );
        return Err(match err {
            DbError::Sqlite(source) => DbError::Connection {
                path: config.path.clone(),
                source,
            },
            other => other,
        });
    }

    debug!(
        "event=db_open module=db status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

fn bootstrap_connection(conn: &mut Connection, config: &DbConfig) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(config.busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}
