use crate::config::types::{CrawlConfig, CrawlerConfig, HttpConfig};
use crate::ConfigError;

/// Validates the entire configuration
///
/// The seed URL is not checked here; it is parsed when the crawl starts.
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.num_threads < 1 {
        return Err(ConfigError::Validation(format!(
            "num_threads must be >= 1, got {}",
            config.num_threads
        )));
    }

    if config.frontier_capacity < 1 {
        return Err(ConfigError::Validation(format!(
            "frontier_capacity must be >= 1, got {}",
            config.frontier_capacity
        )));
    }

    if config.response_capacity < 1 {
        return Err(ConfigError::Validation(format!(
            "response_capacity must be >= 1, got {}",
            config.response_capacity
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.client_label.trim().is_empty() {
        return Err(ConfigError::Validation(
            "client_label cannot be empty".to_string(),
        ));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    Ok(())
}
