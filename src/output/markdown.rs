//! Markdown results report
//!
//! Writes the `URL | Status` table that replaces the spreadsheet export,
//! followed by a count per outcome.

use crate::checker::BatchResult;
use crate::output::traits::{OutputResult, ResultSink};
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sink writing the batch as a markdown table to a file
pub struct MarkdownReport {
    path: PathBuf,
}

impl MarkdownReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for MarkdownReport {
    fn name(&self) -> &str {
        "markdown report"
    }

    fn write_batch(&mut self, batch: &BatchResult) -> OutputResult<()> {
        let generated_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let markdown = format_markdown_report(batch, &generated_at);

        let mut file = File::create(&self.path)?;
        file.write_all(markdown.as_bytes())?;

        tracing::info!("Results saved to {}", self.path.display());
        Ok(())
    }
}

/// Formats a batch as a markdown report
///
/// # Arguments
///
/// * `batch` - The finished batch
/// * `generated_at` - Timestamp printed under the title
pub fn format_markdown_report(batch: &BatchResult, generated_at: &str) -> String {
    let mut md = String::new();

    md.push_str("# Indexation Results\n\n");
    md.push_str(&format!("Generated: {}\n\n", generated_at));

    md.push_str("| URL | Status |\n");
    md.push_str("|-----|--------|\n");
    for (url, label) in batch.labelled() {
        md.push_str(&format!(
            "| {} | {} |\n",
            escape_cell(&url),
            escape_cell(&label)
        ));
    }
    md.push('\n');

    md.push_str("## Summary\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    let tally = batch.tally();
    for (kind, count) in &tally {
        md.push_str(&format!("| {} | {} |\n", kind, count));
    }
    md.push_str(&format!("| **total** | {} |\n", batch.len()));

    md
}

/// Keeps a table cell on one line and escapes column separators
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
