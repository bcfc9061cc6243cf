//! Storage module for persisting check history
//!
//! This module handles all database operations, including:
//! - SQLite database initialization and schema management
//! - Run tracking (start, finish, settings hash)
//! - Per-URL outcome persistence in input order

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::IndexError;
use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(IndexError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> Result<SqliteStorage, IndexError> {
    Ok(SqliteStorage::new(path)?)
}

/// Represents a check run in the database
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub url_count: u64,
    pub proxy_count: u64,
}

/// Represents the stored outcome of one URL check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub run_id: i64,
    pub position: u64,
    pub url: String,
    pub kind: String,
    pub label: String,
    pub checked_at: String,
}

/// Status of a check run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}
