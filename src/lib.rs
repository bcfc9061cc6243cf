//! index-sentinel: search engine indexation checker
//!
//! This crate checks, URL by URL, whether a search engine has indexed a site.
//! Each URL is queried as `site:<url>`, optionally through a rotating pool of
//! authenticated proxies, and the response is classified into an outcome.

pub mod checker;
pub mod config;
pub mod output;
pub mod proxy;
pub mod storage;

use thiserror::Error;

/// Main error type for index-sentinel operations
///
/// Per-URL failures are never reported here; they are `checker::Outcome`
/// values. These errors abort a run before or after the batch itself.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Proxy error: {0}")]
    Proxy(#[from] proxy::ProxyError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid marker selector: {0}")]
    InvalidSelector(String),
}

/// Result type alias for index-sentinel operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{BatchResult, CheckerEngine, HttpSearchQuery, Outcome};
pub use config::Config;
pub use proxy::{ProxyCredential, ProxyPool};

/// Builds the HTTP query function and engine described by `config`
///
/// # Returns
///
/// * `Ok(CheckerEngine)` - Engine ready to run batches
/// * `Err(IndexError)` - The marker selector or HTTP client could not be built
pub fn engine_from_config(config: &Config) -> Result<CheckerEngine<HttpSearchQuery>> {
    let classifier = checker::Classifier::with_selector(&config.checker.marker_selector)
        .map_err(ConfigError::InvalidSelector)?;
    let query = HttpSearchQuery::new(&config.checker.search_base_url, config.checker.timeout())?;
    Ok(CheckerEngine::new(query).with_classifier(classifier))
}

/// Runs one batch with the settings in `config`
///
/// The proxy pool is built before any request is made; a malformed proxy
/// aborts the run here. Once the batch starts it always completes.
pub async fn check_indexation(config: &Config) -> Result<BatchResult> {
    let pool = config.proxy_pool()?;
    let engine = engine_from_config(config)?;
    Ok(engine
        .run(&config.checker.user_agent, &config.targets.urls, &pool)
        .await)
}
