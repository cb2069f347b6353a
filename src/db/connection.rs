use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::TrackerError;

use super::migrations;
use super::sqlite_store::SqliteStore;

pub const HOME_ENV: &str = "REELTRACK_HOME";
const DATA_DIR: &str = ".reeltrack";

/// Find the workspace root: `$REELTRACK_HOME` if set, else the nearest
/// ancestor of the current directory that holds a `.reeltrack` directory.
pub fn find_workspace_root() -> Result<PathBuf, TrackerError> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let mut dir = env::current_dir()?;
    loop {
        if dir.join(DATA_DIR).is_dir() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(TrackerError::not_initialized());
        }
    }
}

/// Root used by `init`: `$REELTRACK_HOME` if set, else the current directory.
pub fn init_root() -> Result<PathBuf, TrackerError> {
    match env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        Some(home) => Ok(PathBuf::from(home)),
        None => Ok(env::current_dir()?),
    }
}

pub fn db_path_in(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join("reeltrack.db")
}

pub fn config_path_in(root: &Path) -> PathBuf {
    root.join(DATA_DIR).join("config.json")
}

pub fn config_path() -> Result<PathBuf, TrackerError> {
    Ok(config_path_in(&find_workspace_root()?))
}

/// Open the store of an initialized workspace.
pub fn open_store() -> Result<SqliteStore, TrackerError> {
    let path = db_path_in(&find_workspace_root()?);
    if !path.exists() {
        return Err(TrackerError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(SqliteStore::new(conn))
}

/// Create the data directory and database, then run migrations. Idempotent.
pub fn init_store(root: &Path) -> Result<(PathBuf, SqliteStore), TrackerError> {
    let path = db_path_in(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok((path, SqliteStore::new(conn)))
}

pub(crate) fn configure_connection(conn: &Connection) -> Result<(), TrackerError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
