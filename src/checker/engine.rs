//! Checker engine - per-URL check loop with proxy failover
//!
//! # Per-URL Flow
//!
//! | Query result | Pool | Action |
//! |--------------|------|--------|
//! | Body | any | Classify → Indexed / NotIndexed |
//! | Proxy failure | non-empty | Advance cursor, retry same URL, or AllProxiesFailed once past the end |
//! | Proxy failure | empty | NoProxyAvailable |
//! | Timeout | any | Timeout, no retry |
//! | Other failure | any | OtherError(message), no retry |
//!
//! The cursor belongs to one `run` call and is shared by every URL of that
//! batch. It is never reset between URLs: a proxy that failed for one URL is
//! not offered to later URLs, and once the pool is exhausted every remaining
//! URL is `AllProxiesFailed` without a request being made.

use crate::checker::classifier::{Classifier, Verdict};
use crate::checker::outcome::{BatchResult, Outcome};
use crate::checker::query::{QueryResult, SearchQuery};
use crate::proxy::{ProxyCursor, ProxyPool};

/// Runs batches of indexation checks through a `SearchQuery`
pub struct CheckerEngine<Q> {
    query: Q,
    classifier: Classifier,
}

impl<Q: SearchQuery> CheckerEngine<Q> {
    /// Creates an engine using the default organic-result marker
    pub fn new(query: Q) -> Self {
        Self {
            query,
            classifier: Classifier::new(),
        }
    }

    /// Replaces the classifier used on successful responses
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The query function this engine issues requests through
    pub fn query(&self) -> &Q {
        &self.query
    }

    /// Checks every URL in order and returns one outcome per URL
    ///
    /// A fresh proxy cursor is created for each call. URLs are checked one at
    /// a time; individual failures are recorded as outcomes and the batch
    /// always completes.
    ///
    /// # Arguments
    ///
    /// * `user_agent` - User-Agent header sent with every request
    /// * `urls` - Target URLs, duplicates allowed
    /// * `pool` - Proxies to rotate through, possibly empty
    pub async fn run<S: AsRef<str>>(
        &self,
        user_agent: &str,
        urls: &[S],
        pool: &ProxyPool,
    ) -> BatchResult {
        let mut cursor = ProxyCursor::new();
        let mut batch = BatchResult::new();

        tracing::info!(
            "Checking {} URL(s) with {} prox{}",
            urls.len(),
            pool.len(),
            if pool.len() == 1 { "y" } else { "ies" }
        );

        for (index, url) in urls.iter().enumerate() {
            let url = url.as_ref();
            let outcome = self.check_url(url, user_agent, pool, &mut cursor).await;

            if outcome.is_error() {
                tracing::warn!("[{}/{}] {}: {}", index + 1, urls.len(), url, outcome);
            } else {
                tracing::info!("[{}/{}] {}: {}", index + 1, urls.len(), url, outcome);
            }

            batch.record(url, outcome);
        }

        tracing::info!(
            "Batch finished: {} checked, {} error(s), proxy cursor at {}",
            batch.len(),
            batch.error_count(),
            cursor.position()
        );

        batch
    }

    /// Checks one URL, advancing the shared cursor on proxy failures
    async fn check_url(
        &self,
        url: &str,
        user_agent: &str,
        pool: &ProxyPool,
        cursor: &mut ProxyCursor,
    ) -> Outcome {
        if pool.is_empty() {
            tracing::debug!("Querying {} directly", url);
            return match self.query.query(url, user_agent, None).await {
                QueryResult::Body { body, .. } => self.classify(&body),
                QueryResult::ProxyFailure(reason) => {
                    tracing::debug!("Proxy failure without proxies for {}: {}", url, reason);
                    Outcome::NoProxyAvailable
                }
                QueryResult::Timeout => Outcome::Timeout,
                QueryResult::Failure(message) => Outcome::OtherError(message),
            };
        }

        // Each pass either returns or advances the cursor, so pool.len() + 1
        // passes always reach a terminal outcome.
        for _ in 0..=pool.len() {
            let Some(proxy) = pool.get(cursor.position()) else {
                return Outcome::AllProxiesFailed;
            };

            tracing::debug!(
                "Querying {} via proxy #{} ({})",
                url,
                cursor.position(),
                proxy
            );

            match self.query.query(url, user_agent, Some(proxy)).await {
                QueryResult::Body { body, .. } => return self.classify(&body),
                QueryResult::ProxyFailure(reason) => {
                    tracing::warn!(
                        "Proxy #{} ({}) failed for {}: {}",
                        cursor.position(),
                        proxy,
                        url,
                        reason
                    );
                    cursor.advance();
                    if cursor.is_exhausted(pool.len()) {
                        tracing::warn!("All {} proxies have failed", pool.len());
                        return Outcome::AllProxiesFailed;
                    }
                }
                QueryResult::Timeout => return Outcome::Timeout,
                QueryResult::Failure(message) => return Outcome::OtherError(message),
            }
        }

        Outcome::AllProxiesFailed
    }

    fn classify(&self, body: &str) -> Outcome {
        match self.classifier.classify(body) {
            Verdict::Indexed => Outcome::Indexed,
            Verdict::NotIndexed => Outcome::NotIndexed,
        }
    }
}
