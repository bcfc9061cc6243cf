//! Statistics for stored runs
//!
//! This module provides functionality for extracting and displaying
//! outcome statistics from the storage layer.

use crate::checker::Outcome;
use crate::storage::{RunRecord, Storage, StorageResult};
use std::collections::BTreeMap;

/// Outcome statistics of one stored run
#[derive(Debug, Clone)]
pub struct CheckStatistics {
    /// The run the statistics belong to
    pub run: RunRecord,

    /// Number of URLs with a recorded outcome
    pub total: u64,

    /// Count of results per outcome kind
    pub by_kind: BTreeMap<String, u64>,
}

impl CheckStatistics {
    /// Count for one outcome kind, zero when absent
    pub fn count(&self, kind: &str) -> u64 {
        self.by_kind.get(kind).copied().unwrap_or(0)
    }

    /// Share of URLs found indexed among those that got a verdict, in percent
    pub fn indexed_rate(&self) -> f64 {
        let indexed = self.count("indexed");
        let verdicts = indexed + self.count("not_indexed");
        if verdicts == 0 {
            return 0.0;
        }
        (indexed as f64 / verdicts as f64) * 100.0
    }

    /// Number of URLs whose check failed
    pub fn error_count(&self) -> u64 {
        self.total - self.count("indexed") - self.count("not_indexed")
    }
}

/// Loads statistics for the latest stored run
///
/// # Returns
///
/// * `Ok(Some(CheckStatistics))` - Statistics of the latest run
/// * `Ok(None)` - No run has been stored yet
/// * `Err(StorageError)` - Failed to query storage
pub fn load_statistics(storage: &dyn Storage) -> StorageResult<Option<CheckStatistics>> {
    let Some(run) = storage.get_latest_run()? else {
        return Ok(None);
    };

    let by_kind = storage.count_by_kind(run.id)?;
    let total = by_kind.values().sum();

    Ok(Some(CheckStatistics {
        run,
        total,
        by_kind,
    }))
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CheckStatistics) {
    println!("=== Check Statistics ===\n");

    println!("Run {}:", stats.run.id);
    println!("  Started: {}", stats.run.started_at);
    if let Some(finished) = &stats.run.finished_at {
        println!("  Finished: {}", finished);
    }
    println!("  Status: {}", stats.run.status.to_db_string());
    println!("  Proxies: {}", stats.run.proxy_count);
    println!("  Settings hash: {}", stats.run.config_hash);
    println!();

    println!("Outcomes:");
    for kind in Outcome::all_kinds() {
        let count = stats.count(kind);
        if count == 0 {
            continue;
        }
        let percentage = (count as f64 / stats.total as f64) * 100.0;
        println!("  {}: {} ({:.1}%)", kind, count, percentage);
    }
    println!();

    println!(
        "Indexed: {:.1}% of {} URL(s) with a verdict, {} error(s)",
        stats.indexed_rate(),
        stats.total - stats.error_count(),
        stats.error_count()
    );
}
