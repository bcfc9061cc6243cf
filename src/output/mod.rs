//! Output module for exporting batch results
//!
//! This module handles:
//! - The result sink interface every exporter implements
//! - The markdown results report
//! - Run history recorded in the storage layer
//! - Console tables and statistics

mod console;
mod history;
mod markdown;
pub mod stats;
mod traits;

pub use console::{format_table, print_table};
pub use history::HistorySink;
pub use markdown::{format_markdown_report, MarkdownReport};
pub use stats::{load_statistics, print_statistics, CheckStatistics};
pub use traits::{OutputError, OutputResult, ResultSink};

use crate::checker::BatchResult;

/// Hands the batch to every sink in order
///
/// Every sink is attempted even when an earlier one fails; the first error
/// is returned.
pub fn export_batch(batch: &BatchResult, sinks: &mut [Box<dyn ResultSink>]) -> OutputResult<()> {
    let mut first_error = None;

    for sink in sinks.iter_mut() {
        if let Err(e) = sink.write_batch(batch) {
            tracing::error!("Failed to write {}: {}", sink.name(), e);
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
