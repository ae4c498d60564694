//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve the database target and logging options from environment
//!   variables.
//!
//! # Invariants
//! - Unset variables fall back to defaults; set but invalid values fail.
//! - Parsing never mutates process state.

use crate::db::DbTarget;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATABASE_PATH_ENV: &str = "WAREHOUSE_DATABASE_PATH";
pub const LOG_LEVEL_ENV: &str = "WAREHOUSE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "WAREHOUSE_LOG_DIR";

const DEFAULT_DATABASE_FILE: &str = "warehouse.sqlite3";
const MEMORY_DATABASE: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable is set but blank.
    Empty { key: &'static str },
    /// Variable must hold an absolute path.
    NotAbsolute { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { key } => write!(f, "{key} is set but empty"),
            Self::NotAbsolute { key, value } => {
                write!(f, "{key} must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseConfig {
    pub database: DbTarget,
    pub log_level: String,
    /// `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl WarehouseConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = match non_blank(DATABASE_PATH_ENV, lookup(DATABASE_PATH_ENV))? {
            Some(value) if value == MEMORY_DATABASE => DbTarget::Memory,
            Some(value) => DbTarget::File(PathBuf::from(value)),
            None => DbTarget::File(PathBuf::from(DEFAULT_DATABASE_FILE)),
        };

        let log_level = non_blank(LOG_LEVEL_ENV, lookup(LOG_LEVEL_ENV))?
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = match non_blank(LOG_DIR_ENV, lookup(LOG_DIR_ENV))? {
            Some(value) if Path::new(&value).is_absolute() => Some(PathBuf::from(value)),
            Some(value) => {
                return Err(ConfigError::NotAbsolute {
                    key: LOG_DIR_ENV,
                    value,
                })
            }
            None => None,
        };

        Ok(Self {
            database,
            log_level,
            log_dir,
        })
    }
}

fn non_blank(key: &'static str, value: Option<String>) -> Result<Option<String>, ConfigError> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { key }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}
