//! Console table of batch results

use crate::checker::BatchResult;

/// Widest URL column before truncation
const URL_WIDTH: usize = 60;

/// Formats the batch as a plain-text table
pub fn format_table(batch: &BatchResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<width$} {}\n", "URL", "STATUS", width = URL_WIDTH));
    out.push_str(&format!("{}\n", "=".repeat(URL_WIDTH + 30)));

    for (url, outcome) in batch.iter() {
        out.push_str(&format!(
            "{:<width$} {}\n",
            truncate(url, URL_WIDTH - 1),
            outcome,
            width = URL_WIDTH
        ));
    }

    out.push('\n');
    out.push_str(&format!(
        "Checked: {}  Indexed: {}  Not indexed: {}  Errors: {}\n",
        batch.len(),
        batch.tally().get("indexed").copied().unwrap_or(0),
        batch.tally().get("not_indexed").copied().unwrap_or(0),
        batch.error_count()
    ));

    out
}

/// Prints the batch table to stdout
pub fn print_table(batch: &BatchResult) {
    print!("{}", format_table(batch));
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
