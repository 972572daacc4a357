//! Internal audit trail: one row in `log` per mutating command.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{Connection, params};

/// Write an audit line (`operation` on `target`) stamped with the local time.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), operation, target, message])?;
    Ok(())
}

/// [`ttlog`] for callers whose own work already succeeded: a failed audit
/// write is reported, not propagated.
pub fn ttlog_quiet(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        warning(format!("Audit log not written ({operation} {target}): {e}"));
    }
}
