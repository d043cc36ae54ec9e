//! Configuration module for Feedrelay
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, plus the environment overrides applied on top of them.
//!
//! # Example
//!
//! ```no_run
//! use feedrelay::config::load_effective_config;
//! use std::path::Path;
//!
//! let config = load_effective_config(Some(Path::new("feedrelay.toml"))).unwrap();
//! println!("Feed source: {:?}", config.source.url());
//! ```

mod parser;
mod types;
mod validation;

pub use validation::validate;

// Re-export types
pub use types::{
    Config, FetchConfig, ServerConfig, SourceConfig, UserAgentConfig, DEFAULT_RETRIES,
    DEFAULT_TIMEOUT_MS,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_effective_config, ENV_BIND,
    ENV_RETRIES, ENV_SOURCE_URL, ENV_TIMEOUT_MS,
};
