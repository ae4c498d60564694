//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define storage-agnostic `add`/`get` contracts per entity.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories borrow the connection they were built with and never begin,
//!   commit or roll back a transaction; that belongs to `UnitOfWork`.
//! - Write paths validate entities before any SQL mutation.
//! - Write paths refuse to run in autocommit mode, so nothing is staged
//!   outside an open unit of work.
//! - Lookups return a fully populated entity or `RepoError::NotFound`.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod order_repo;
pub mod product_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by product and order persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Entity rejected before reaching storage.
    Validation(ValidationError),
    /// Store rejected the operation (constraint, I/O, locking).
    Db(DbError),
    /// No record exists for the requested id.
    NotFound { entity: &'static str, id: i64 },
    /// Lookup id is negative.
    InvalidId { entity: &'static str, id: i64 },
    /// `add` received an entity that already carries a storage id.
    AlreadyPersisted { entity: &'static str, id: i64 },
    /// `add` called while the connection has no open transaction.
    NoActiveTransaction { entity: &'static str },
    /// Stored data could not be mapped back to a valid entity.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether this error means "no such record".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidId { entity, id } => {
                write!(f, "invalid {entity} id {id}: ids are non-negative")
            }
            Self::AlreadyPersisted { entity, id } => {
                write!(f, "{entity} already persisted with id {id}")
            }
            Self::NoActiveTransaction { entity } => {
                write!(f, "cannot stage {entity} without an open unit of work")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::InvalidId { .. }
            | Self::AlreadyPersisted { .. }
            | Self::NoActiveTransaction { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn ensure_lookup_id(entity: &'static str, id: i64) -> RepoResult<()> {
    if id < 0 {
        return Err(RepoError::InvalidId { entity, id });
    }
    Ok(())
}

fn ensure_active_transaction(conn: &Connection, entity: &'static str) -> RepoResult<()> {
    if conn.is_autocommit() {
        return Err(RepoError::NoActiveTransaction { entity });
    }
    Ok(())
}
