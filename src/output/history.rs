//! Run history sink
//!
//! Stores each batch as a run plus one row per URL so earlier results can be
//! compared with later ones.

use crate::checker::BatchResult;
use crate::output::traits::{OutputResult, ResultSink};
use crate::storage::{RunStatus, Storage};

/// Sink recording batches into a `Storage` backend
pub struct HistorySink<S> {
    storage: S,
    config_hash: String,
    proxy_count: u64,
    last_run_id: Option<i64>,
}

impl<S: Storage> HistorySink<S> {
    /// Creates a sink for runs made with the given settings
    ///
    /// # Arguments
    ///
    /// * `storage` - Backend the runs are written to
    /// * `config_hash` - Hash of the settings file, stored with each run
    /// * `proxy_count` - Size of the proxy pool used for the batch
    pub fn new(storage: S, config_hash: impl Into<String>, proxy_count: usize) -> Self {
        Self {
            storage,
            config_hash: config_hash.into(),
            proxy_count: proxy_count as u64,
            last_run_id: None,
        }
    }

    /// ID of the run created by the last `write_batch` call
    pub fn last_run_id(&self) -> Option<i64> {
        self.last_run_id
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn record_all(&mut self, run_id: i64, batch: &BatchResult) -> OutputResult<()> {
        for (position, (url, outcome)) in batch.iter().enumerate() {
            self.storage
                .record_result(run_id, position as u64, url, outcome)?;
        }
        Ok(())
    }
}

impl<S: Storage> ResultSink for HistorySink<S> {
    fn name(&self) -> &str {
        "run history"
    }

    fn write_batch(&mut self, batch: &BatchResult) -> OutputResult<()> {
        let run_id =
            self.storage
                .create_run(&self.config_hash, batch.len() as u64, self.proxy_count)?;
        self.last_run_id = Some(run_id);

        if let Err(e) = self.record_all(run_id, batch) {
            if let Err(finish_err) = self.storage.finish_run(run_id, RunStatus::Failed) {
                tracing::error!("Could not mark run {} as failed: {}", run_id, finish_err);
            }
            return Err(e);
        }

        self.storage.finish_run(run_id, RunStatus::Completed)?;
        tracing::info!("Recorded run {} ({} result(s))", run_id, batch.len());
        Ok(())
    }
}
