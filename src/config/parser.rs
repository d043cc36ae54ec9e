use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable overriding `[source] url`
pub const ENV_SOURCE_URL: &str = "RSS_URL";
/// Environment variable overriding `[fetch] timeout-ms`
pub const ENV_TIMEOUT_MS: &str = "FEED_TIMEOUT_MS";
/// Environment variable overriding `[fetch] retries`
pub const ENV_RETRIES: &str = "FEED_RETRIES";
/// Environment variable overriding `[server] bind`
pub const ENV_BIND: &str = "FEEDRELAY_BIND";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
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
/// use feedrelay::config::load_config;
///
/// let config = load_config(Path::new("feedrelay.toml")).unwrap();
/// println!("Timeout: {}ms", config.fetch.timeout_ms);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Builds the process configuration: optional file, then environment overrides
///
/// Without a file every section takes its defaults. The result is validated
/// after the overrides are applied, so a bad `RSS_URL` is caught at startup.
pub fn load_effective_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Applies overrides from a variable lookup (the process environment in production)
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_SOURCE_URL) {
        config.source.url = Some(url);
    }

    if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
        config.fetch.timeout_ms = raw.trim().parse().map_err(|_| {
            ConfigError::Validation(format!("{} must be an integer, got '{}'", ENV_TIMEOUT_MS, raw))
        })?;
    }

    if let Some(raw) = lookup(ENV_RETRIES) {
        config.fetch.retries = raw.trim().parse().map_err(|_| {
            ConfigError::Validation(format!("{} must be an integer, got '{}'", ENV_RETRIES, raw))
        })?;
    }

    if let Some(bind) = lookup(ENV_BIND) {
        config.server.bind = bind;
    }

    Ok(())
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so operators can tell which file a process runs with.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}
