//! Outbound search query
//!
//! This module issues the single HTTP request behind one check attempt and
//! reduces its result to the four cases the engine distinguishes:
//! - a response body (2xx only)
//! - a proxy connection failure
//! - a timeout
//! - any other failure, carrying a readable message
//!
//! Requests are never retried here. Failover is the engine's job.

use crate::proxy::ProxyCredential;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Proxy};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

/// Search engine queried when no other base URL is configured
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.google.com";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of one search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// The search engine answered with a 2xx status
    Body {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// The proxy could not be reached or refused the connection
    ProxyFailure(String),

    /// The request did not complete within the timeout
    Timeout,

    /// Any other failure, including non-2xx statuses
    Failure(String),
}

/// One outbound "site:" query
///
/// The engine only talks to the network through this trait.
pub trait SearchQuery {
    /// Queries the search engine for `url` and classifies the result
    ///
    /// # Arguments
    ///
    /// * `url` - The target URL exactly as supplied by the user
    /// * `user_agent` - Sent verbatim as the User-Agent header
    /// * `proxy` - Proxy to route the request through, or None for a direct request
    fn query(
        &self,
        url: &str,
        user_agent: &str,
        proxy: Option<&ProxyCredential>,
    ) -> impl Future<Output = QueryResult> + Send;
}

/// `SearchQuery` backed by reqwest
///
/// Keeps one client per proxy descriptor so connections are reused across the
/// URLs of a batch. The direct client ignores proxy environment variables.
pub struct HttpSearchQuery {
    search_base_url: String,
    timeout: Duration,
    direct: Client,
    proxied: Mutex<HashMap<String, Client>>,
}

impl HttpSearchQuery {
    /// Creates a query function against `search_base_url`
    ///
    /// # Arguments
    ///
    /// * `search_base_url` - Scheme and host of the search engine, e.g. `https://www.google.com`
    /// * `timeout` - Total time allowed for each request
    ///
    /// # Returns
    ///
    /// * `Ok(HttpSearchQuery)` - Ready to issue requests
    /// * `Err(reqwest::Error)` - The HTTP client could not be built
    pub fn new(search_base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            search_base_url: search_base_url.trim_end_matches('/').to_string(),
            timeout,
            direct: build_client(timeout, None)?,
            proxied: Mutex::new(HashMap::new()),
        })
    }

    /// Query function against the default search engine with a 10 second timeout
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(DEFAULT_SEARCH_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Search URL requested for `url`: `<base>/search?q=site:<url>`
    pub fn search_url(&self, url: &str) -> String {
        format!("{}/search?q=site:{}", self.search_base_url, url)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn client_for(&self, proxy: Option<&ProxyCredential>) -> Result<Client, reqwest::Error> {
        let Some(proxy) = proxy else {
            return Ok(self.direct.clone());
        };

        let mut clients = self
            .proxied
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(client) = clients.get(proxy.descriptor()) {
            return Ok(client.clone());
        }

        let client = build_client(self.timeout, Some(proxy.descriptor()))?;
        clients.insert(proxy.descriptor().to_string(), client.clone());
        Ok(client)
    }
}

impl SearchQuery for HttpSearchQuery {
    async fn query(
        &self,
        url: &str,
        user_agent: &str,
        proxy: Option<&ProxyCredential>,
    ) -> QueryResult {
        let client = match self.client_for(proxy) {
            Ok(client) => client,
            Err(e) => return QueryResult::Failure(e.to_string()),
        };

        let search_url = self.search_url(url);
        let response = client
            .get(&search_url)
            .header(USER_AGENT, user_agent)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return classify_error(&e, proxy.is_some()),
        };

        // Non-2xx statuses are failures, never a body to classify
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => return QueryResult::Failure(e.to_string()),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => QueryResult::Body { status, body },
            Err(e) => classify_error(&e, proxy.is_some()),
        }
    }
}

/// Builds an HTTP client, routing all traffic through `proxy` when given
///
/// # Arguments
///
/// * `timeout` - Total time allowed for each request
/// * `proxy` - Proxy descriptor used for both HTTP and HTTPS, or None
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - The descriptor was rejected or the TLS backend failed
pub fn build_client(timeout: Duration, proxy: Option<&str>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true);

    let builder = match proxy {
        Some(descriptor) => builder.proxy(Proxy::all(descriptor)?),
        None => builder.no_proxy(),
    };

    builder.build()
}

/// Maps a transport error to a query result
///
/// Timeouts win over connection errors: a proxy that never answers is a
/// timeout, a proxy that refuses or breaks the tunnel is a proxy failure.
/// Connection errors on a direct request are ordinary failures.
fn classify_error(error: &reqwest::Error, via_proxy: bool) -> QueryResult {
    if error.is_timeout() {
        QueryResult::Timeout
    } else if via_proxy && error.is_connect() {
        QueryResult::ProxyFailure(error.to_string())
    } else {
        QueryResult::Failure(error.to_string())
    }
}
