//! Explicit session factory.
//!
//! A session is one migrated `Connection`. Callers own the factory and pass
//! it where sessions are needed; there is no process-wide connection state.

use super::{open_db, open_db_in_memory, DbResult};
use rusqlite::Connection;
use std::path::PathBuf;

/// Where sessions are opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    /// SQLite database file, created on first open.
    File(PathBuf),
    /// Private in-memory database; each session gets its own.
    Memory,
}

/// Opens configured, migrated connections for one `DbTarget`.
#[derive(Debug, Clone)]
pub struct SessionFactory {
    target: DbTarget,
}

impl SessionFactory {
    pub fn new(target: DbTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &DbTarget {
        &self.target
    }

    /// Opens a new session.
    ///
    /// Sessions opened from a `DbTarget::File` factory see each other's
    /// committed work; `DbTarget::Memory` sessions are isolated databases.
    pub fn open_session(&self) -> DbResult<Connection> {
        match &self.target {
            DbTarget::File(path) => open_db(path),
            DbTarget::Memory => open_db_in_memory(),
        }
    }
}
