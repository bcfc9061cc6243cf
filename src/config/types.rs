use crate::checker::{DEFAULT_SEARCH_BASE_URL, ORGANIC_RESULT_SELECTOR};
use crate::proxy::{ProxyCredential, ProxyPool, ProxyResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for index-sentinel
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub checker: CheckerConfig,
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default, rename = "proxy")]
    pub proxies: Vec<ProxyEntry>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Request and classification settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CheckerConfig {
    /// User-Agent header sent with every search request
    #[serde(rename = "user-agent", default)]
    pub user_agent: String,

    /// Scheme and host of the search engine
    #[serde(rename = "search-base-url", default = "default_search_base_url")]
    pub search_base_url: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// CSS selector identifying one organic search result
    #[serde(rename = "marker-selector", default = "default_marker_selector")]
    pub marker_selector: String,
}

/// URLs to check, in order
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TargetsConfig {
    #[serde(default)]
    pub urls: Vec<String>,
}

/// One proxy as written in the settings file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProxyEntry {
    /// Proxy address (`host` or `host:port`); entries without one are dropped
    #[serde(default)]
    pub ip: String,

    #[serde(default)]
    pub login: String,

    #[serde(default)]
    pub password: String,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Path to the markdown results report
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,

    /// Path to the SQLite run history database
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_search_base_url() -> String {
    DEFAULT_SEARCH_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_marker_selector() -> String {
    ORGANIC_RESULT_SELECTOR.to_string()
}

fn default_summary_path() -> String {
    "indexation_results.md".to_string()
}

fn default_database_path() -> String {
    "indexation_history.db".to_string()
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            search_base_url: default_search_base_url(),
            timeout_secs: default_timeout_secs(),
            marker_selector: default_marker_selector(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: default_summary_path(),
            database_path: default_database_path(),
        }
    }
}

impl CheckerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Returns a copy with blank URLs and address-less proxies removed
    ///
    /// URLs and proxy fields are trimmed. Entries dropped here are logged.
    pub fn normalized(&self) -> Config {
        let urls = self
            .targets
            .urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        let mut proxies = Vec::with_capacity(self.proxies.len());
        for (position, entry) in self.proxies.iter().enumerate() {
            let ip = entry.ip.trim();
            if ip.is_empty() {
                tracing::warn!("Ignoring proxy #{}: no address", position + 1);
                continue;
            }
            proxies.push(ProxyEntry {
                ip: ip.to_string(),
                login: entry.login.trim().to_string(),
                password: entry.password.trim().to_string(),
            });
        }

        Config {
            checker: self.checker.clone(),
            targets: TargetsConfig { urls },
            proxies,
            output: self.output.clone(),
        }
    }

    /// Builds the proxy pool in file order
    ///
    /// # Returns
    ///
    /// * `Ok(ProxyPool)` - Every entry forms a valid proxy
    /// * `Err(ProxyError)` - The first entry that does not
    pub fn proxy_pool(&self) -> ProxyResult<ProxyPool> {
        self.proxies
            .iter()
            .map(|entry| ProxyCredential::new(&entry.ip, &entry.login, &entry.password))
            .collect::<ProxyResult<Vec<_>>>()
            .map(ProxyPool::new)
    }
}
