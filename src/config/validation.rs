use crate::config::types::{Config, FetchConfig, ServerConfig, SourceConfig, UserAgentConfig};
use crate::server::HEALTH_ROUTE;
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Upper bound for the per-attempt timeout (5 minutes)
const MAX_TIMEOUT_MS: u64 = 300_000;

/// Upper bound for additional attempts
const MAX_RETRIES: u32 = 10;

/// Validates the entire configuration
///
/// A missing source URL is not an error here: it is reported per request.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates the feed source, if one is configured
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let Some(raw) = config.url() else {
        return Ok(());
    };

    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid source url '{}': {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Source url '{}' must use http or https, got '{}'",
            raw,
            url.scheme()
        )));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 1 || config.timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be between 1 and {}, got {}",
            MAX_TIMEOUT_MS, config.timeout_ms
        )));
    }

    if config.retries > MAX_RETRIES {
        return Err(ConfigError::Validation(format!(
            "retries must be <= {}, got {}",
            MAX_RETRIES, config.retries
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.client_name.is_empty() {
        return Err(ConfigError::Validation(
            "client_name cannot be empty".to_string(),
        ));
    }

    if !config
        .client_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "client_name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.client_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates the HTTP surface configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.bind, e))
    })?;

    if !config.route.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "route must start with '/', got '{}'",
            config.route
        )));
    }

    // The router treats these as captures or wildcards
    if let Some(segment) = config.route.split('/').find(|segment| {
        segment.starts_with(':') || segment.starts_with('*') || segment.contains(['{', '}'])
    }) {
        return Err(ConfigError::Validation(format!(
            "route '{}' must be a literal path, found segment '{}'",
            config.route, segment
        )));
    }

    if config.route == HEALTH_ROUTE {
        return Err(ConfigError::Validation(format!(
            "route '{}' is reserved for health checks",
            HEALTH_ROUTE
        )));
    }

    Ok(())
}
