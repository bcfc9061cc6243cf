//! Configuration module for index-sentinel
//!
//! This module handles loading, validating, normalizing and saving the TOML
//! settings file (user agent, URL list, proxy list, output paths).
//!
//! # Example
//!
//! ```no_run
//! use index_sentinel::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("settings.toml")).unwrap();
//! println!("Checking {} URL(s)", config.targets.urls.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CheckerConfig, Config, OutputConfig, ProxyEntry, TargetsConfig};

// Re-export parser functions
pub use parser::{
    compute_config_hash, hash_settings, load_config, load_config_with_hash, read_url_list,
    save_config,
};
pub use validation::validate;
