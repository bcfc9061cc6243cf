//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::checker::Outcome;
use crate::storage::{ResultRecord, RunRecord, RunStatus};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
pub trait Storage {
    // ===== Run Management =====

    /// Creates a new run in the Running state
    ///
    /// # Arguments
    ///
    /// * `config_hash` - Hash of the settings file used for the run
    /// * `url_count` - Number of URLs in the batch
    /// * `proxy_count` - Number of proxies in the pool
    ///
    /// # Returns
    ///
    /// The ID of the newly created run
    fn create_run(&mut self, config_hash: &str, url_count: u64, proxy_count: u64)
        -> StorageResult<i64>;

    /// Gets a run by ID
    fn get_run(&self, run_id: i64) -> StorageResult<RunRecord>;

    /// Gets the most recent run
    fn get_latest_run(&self) -> StorageResult<Option<RunRecord>>;

    /// Marks a run finished with the given status and a finish timestamp
    fn finish_run(&mut self, run_id: i64, status: RunStatus) -> StorageResult<()>;

    // ===== Results =====

    /// Records the outcome of the URL at `position` in the batch
    fn record_result(
        &mut self,
        run_id: i64,
        position: u64,
        url: &str,
        outcome: &Outcome,
    ) -> StorageResult<()>;

    /// Gets all results of a run in input order
    fn get_results(&self, run_id: i64) -> StorageResult<Vec<ResultRecord>>;

    /// Counts the results of a run per outcome kind
    fn count_by_kind(&self, run_id: i64) -> StorageResult<BTreeMap<String, u64>>;

    /// Gets the most recent results for a URL across runs, newest first
    fn get_url_history(&self, url: &str, limit: u32) -> StorageResult<Vec<ResultRecord>>;
}
