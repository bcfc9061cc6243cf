use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads, normalizes and validates a settings file
///
/// Blank URLs and proxies without an address are dropped before validation,
/// so the returned configuration is ready to hand to the checker.
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use index_sentinel::config::load_config;
///
/// let config = load_config(Path::new("settings.toml")).unwrap();
/// println!("Timeout: {}s", config.checker.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;
    let config = config.normalized();

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Writes the settings back to disk
///
/// This is the "save settings" step: command-line overrides merged into the
/// configuration are persisted for the next run.
///
/// # Arguments
///
/// * `config` - The configuration to write
/// * `path` - Destination TOML file (overwritten)
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    tracing::debug!("Settings saved to {}", path.display());
    Ok(())
}

/// Reads a URL list with one URL per line, skipping blank lines
pub fn read_url_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Stored with each run so results can be tied to the settings that produced them.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Hashes the settings as `save_config` would write them
///
/// Used when command-line overrides make the file on disk differ from the
/// settings a run actually used. After `save_config` the result equals
/// `compute_config_hash` of the saved file.
pub fn hash_settings(config: &Config) -> Result<String, ConfigError> {
    let content = toml::to_string_pretty(config)?;
    Ok(hash_content(&content))
}

fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
