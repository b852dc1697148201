//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Resolve where the contact database lives.
//! - Open file or in-memory SQLite connections with the pragmas core needs.
//! - Ensure the schema exists before returning a bootstrapped connection.
//!
//! # Invariants
//! - Every returned connection has a busy timeout configured.
//! - `open_db*` connections have the `Contacts` schema in place.

use super::schema::ensure_schema;
use super::DbResult;
use log::{debug, error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File name of the default store, resolved next to the running executable.
pub const DEFAULT_DB_FILE_NAME: &str = "contacts.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a contact database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// SQLite file on disk, created on first open.
    File(PathBuf),
    /// Named shared-cache memory database.
    ///
    /// The database only lives while at least one connection to it is open.
    SharedMemory(String),
}

impl DbLocation {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::SharedMemory(_) => "memory",
        }
    }

    fn open_raw(&self) -> rusqlite::Result<Connection> {
        match self {
            Self::File(path) => Connection::open(path),
            Self::SharedMemory(name) => {
                Connection::open(format!("file:{name}?mode=memory&cache=shared"))
            }
        }
    }
}

/// Returns the default store path: `contacts.db` in the process base
/// directory (the directory holding the running executable).
///
/// # Errors
/// - Returns an error when the executable path cannot be resolved.
pub fn default_db_path() -> DbResult<PathBuf> {
    let exe = std::env::current_exe()?;
    let base_dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(base_dir.join(DEFAULT_DB_FILE_NAME))
}

/// Opens a SQLite database file and ensures the contact schema exists.
///
/// # Side effects
/// - Creates the database file when it does not exist yet.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_bootstrapped(&DbLocation::File(path.as_ref().to_path_buf()))
}

/// Opens a private in-memory SQLite database with the contact schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=private_memory");

    let conn = Connection::open_in_memory()?;
    bootstrap_connection(&conn)?;

    info!(
        "event=db_open module=db status=ok mode=private_memory duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

/// Opens a per-operation connection without schema bootstrap.
///
/// Callers are expected to have bootstrapped `location` once beforehand.
pub fn connect(location: &DbLocation) -> DbResult<Connection> {
    let conn = location.open_raw().map_err(|err| {
        error!(
            "event=db_connect module=db status=error mode={} error_code=db_open_failed error={}",
            location.mode(),
            err
        );
        err
    })?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    debug!("event=db_connect module=db status=ok mode={}", location.mode());
    Ok(conn)
}

pub(crate) fn open_bootstrapped(location: &DbLocation) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = location.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match location.open_raw() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, DEFAULT_DB_FILE_NAME};

    #[test]
    fn default_db_path_uses_fixed_file_name_next_to_executable() {
        let path = default_db_path().unwrap();
        let exe_dir = std::env::current_exe().unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_DB_FILE_NAME);
        assert_eq!(path.parent(), exe_dir.parent());
    }
}
