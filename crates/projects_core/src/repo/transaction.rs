//! Scoped connection + transaction for one logical operation.
//!
//! # Invariants
//! - Every call opens its own connection and drops it before returning.
//! - Work that fails is rolled back explicitly before the error is returned.
//! - A connection failure is returned as-is; no rollback is attempted.

use crate::db::ConnectionProvider;
use crate::repo::project_repo::RepoResult;
use log::{debug, error, warn};
use rusqlite::Transaction;
use std::time::Instant;

/// Runs `work` inside a fresh transaction and commits when it returns `Ok`.
///
/// `operation` is a stable event name used only for logging.
///
/// # Errors
/// - Connection and `BEGIN` failures.
/// - Whatever `work` returns, after the transaction has been rolled back.
/// - `COMMIT` failures. The transaction is rolled back when dropped.
pub fn with_transaction<P, T, F>(provider: &P, operation: &'static str, work: F) -> RepoResult<T>
where
    P: ConnectionProvider + ?Sized,
    F: FnOnce(&Transaction<'_>) -> RepoResult<T>,
{
    let started_at = Instant::now();
    let mut conn = provider.connect()?;
    let tx = conn.transaction()?;

    match work(&tx) {
        Ok(value) => {
            if let Err(err) = tx.commit() {
                error!(
                    "event=tx_commit module=repo status=error op={} duration_ms={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
            debug!(
                "event=tx_commit module=repo status=ok op={} duration_ms={}",
                operation,
                started_at.elapsed().as_millis()
            );
            Ok(value)
        }
        Err(err) => {
            match tx.rollback() {
                Ok(()) => warn!(
                    "event=tx_rollback module=repo status=ok op={} duration_ms={} cause={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err
                ),
                Err(rollback_err) => error!(
                    "event=tx_rollback module=repo status=error op={} duration_ms={} cause={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    err,
                    rollback_err
                ),
            }
            Err(err)
        }
    }
}
