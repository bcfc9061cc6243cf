//! Outcome taxonomy and the batch result container

use std::collections::BTreeMap;
use std::fmt;

/// Final classification recorded for one URL check
///
/// Every URL of a batch ends in exactly one of these. Failures are values
/// here, not errors: a batch always completes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The search engine returned at least one organic result for the URL
    Indexed,

    /// The search engine answered but returned no organic result
    NotIndexed,

    /// Every proxy in the pool failed to connect during this run
    AllProxiesFailed,

    /// A proxy connection failed and no proxies were configured
    NoProxyAvailable,

    /// The request did not complete within the timeout
    Timeout,

    /// Any other request failure, with a human readable description
    OtherError(String),
}

impl Outcome {
    /// Label handed to result sinks
    pub fn label(&self) -> String {
        match self {
            Self::Indexed => "Indexed".to_string(),
            Self::NotIndexed => "Not Indexed".to_string(),
            Self::AllProxiesFailed => "Error: All proxies failed".to_string(),
            Self::NoProxyAvailable => "Error: No proxy available".to_string(),
            Self::Timeout => "Error: Request timeout".to_string(),
            Self::OtherError(message) => format!("Error: {}", message),
        }
    }

    /// Stable name of the variant, used for storage and statistics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Indexed => "indexed",
            Self::NotIndexed => "not_indexed",
            Self::AllProxiesFailed => "all_proxies_failed",
            Self::NoProxyAvailable => "no_proxy_available",
            Self::Timeout => "timeout",
            Self::OtherError(_) => "other_error",
        }
    }

    /// Returns true if the check itself failed (no verdict was reached)
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Indexed | Self::NotIndexed)
    }

    /// All variant kinds in display order
    pub fn all_kinds() -> [&'static str; 6] {
        [
            "indexed",
            "not_indexed",
            "all_proxies_failed",
            "no_proxy_available",
            "timeout",
            "other_error",
        ]
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ordered URL to Outcome mapping produced by one batch run
///
/// Entries keep input order. Duplicate URLs are kept as separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    entries: Vec<(String, Outcome)>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the outcome for the next URL in input order
    pub fn record(&mut self, url: impl Into<String>, outcome: Outcome) {
        self.entries.push((url.into(), outcome));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.entries.iter().map(|(url, outcome)| (url.as_str(), outcome))
    }

    /// Outcome of the first entry for `url`
    pub fn get(&self, url: &str) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(entry_url, _)| entry_url == url)
            .map(|(_, outcome)| outcome)
    }

    /// `(url, label)` pairs in input order, the form sinks export
    pub fn labelled(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(url, outcome)| (url.clone(), outcome.label()))
            .collect()
    }

    /// Number of entries per outcome kind (kinds with no entries are omitted)
    pub fn tally(&self) -> BTreeMap<&'static str, u64> {
        let mut counts = BTreeMap::new();
        for (_, outcome) in &self.entries {
            *counts.entry(outcome.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of entries whose check failed
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_error())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Outcome::Indexed.label(), "Indexed");
        assert_eq!(Outcome::NotIndexed.label(), "Not Indexed");
        assert_eq!(Outcome::AllProxiesFailed.label(), "Error: All proxies failed");
        assert_eq!(Outcome::NoProxyAvailable.label(), "Error: No proxy available");
        assert_eq!(Outcome::Timeout.label(), "Error: Request timeout");
        assert_eq!(
            Outcome::OtherError("HTTP status client error (429 Too Many Requests)".to_string())
                .label(),
            "Error: HTTP status client error (429 Too Many Requests)"
        );
    }

    #[test]
    fn test_is_error() {
        assert!(!Outcome::Indexed.is_error());
        assert!(!Outcome::NotIndexed.is_error());
        assert!(Outcome::AllProxiesFailed.is_error());
        assert!(Outcome::NoProxyAvailable.is_error());
        assert!(Outcome::Timeout.is_error());
        assert!(Outcome::OtherError(String::new()).is_error());
    }

    #[test]
    fn test_kinds_are_listed() {
        let kinds = Outcome::all_kinds();
        for outcome in [
            Outcome::Indexed,
            Outcome::NotIndexed,
            Outcome::AllProxiesFailed,
            Outcome::NoProxyAvailable,
            Outcome::Timeout,
            Outcome::OtherError("x".to_string()),
        ] {
            assert!(kinds.contains(&outcome.kind()));
        }
    }

    #[test]
    fn test_batch_keeps_order_and_duplicates() {
        let mut batch = BatchResult::new();
        batch.record("b.com", Outcome::Indexed);
        batch.record("a.com", Outcome::Timeout);
        batch.record("b.com", Outcome::NotIndexed);

        let urls: Vec<&str> = batch.iter().map(|(url, _)| url).collect();
        assert_eq!(urls, vec!["b.com", "a.com", "b.com"]);
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.get("b.com"), Some(&Outcome::Indexed));
        assert_eq!(batch.get("c.com"), None);
    }

    #[test]
    fn test_labelled_and_tally() {
        let mut batch = BatchResult::new();
        batch.record("a.com", Outcome::Indexed);
        batch.record("b.com", Outcome::Indexed);
        batch.record("c.com", Outcome::OtherError("boom".to_string()));

        assert_eq!(
            batch.labelled(),
            vec![
                ("a.com".to_string(), "Indexed".to_string()),
                ("b.com".to_string(), "Indexed".to_string()),
                ("c.com".to_string(), "Error: boom".to_string()),
            ]
        );

        let tally = batch.tally();
        assert_eq!(tally.get("indexed"), Some(&2));
        assert_eq!(tally.get("other_error"), Some(&1));
        assert_eq!(tally.get("timeout"), None);
        assert_eq!(batch.error_count(), 1);
    }
}
