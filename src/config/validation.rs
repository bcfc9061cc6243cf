use crate::checker::Classifier;
use crate::config::types::{CheckerConfig, Config, OutputConfig, ProxyEntry};
use crate::proxy::ProxyCredential;
use crate::ConfigError;
use url::Url;

/// Longest per-request timeout accepted, in seconds
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_checker_config(&config.checker)?;
    validate_proxies(&config.proxies)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates request and classification settings
fn validate_checker_config(config: &CheckerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.search_base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid search-base-url '{}': {}",
            config.search_base_url, e
        ))
    })?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "search-base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "search-base-url must not carry a query or fragment: '{}'",
            config.search_base_url
        )));
    }

    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    Classifier::with_selector(&config.marker_selector).map_err(ConfigError::InvalidSelector)?;

    Ok(())
}

/// Validates that every proxy entry forms a usable proxy
fn validate_proxies(proxies: &[ProxyEntry]) -> Result<(), ConfigError> {
    for (position, entry) in proxies.iter().enumerate() {
        ProxyCredential::new(&entry.ip, &entry.login, &entry.password).map_err(|e| {
            ConfigError::Validation(format!("proxy #{}: {}", position + 1, e))
        })?;
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary-path cannot be empty".to_string(),
        ));
    }

    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
