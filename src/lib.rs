//! Ripple-Spider: a bounded, concurrent web crawler
//!
//! Starting from a single seed URL, the crawler fetches pages, extracts absolute
//! HTTP(S) links and feeds them back into the same pipeline until a configured
//! number of pages has been fetched successfully.

pub mod config;
pub mod crawler;
pub mod url;

use thiserror::Error;

/// Main error type for Ripple-Spider startup
///
/// Only these errors are fatal. Everything that goes wrong once the worker
/// pools are running is logged and dropped where it happens.
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Link parser error: {0}")]
    Parser(#[from] ParseError),

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

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL '{url}': {message}")]
    Parse { url: String, message: String },

    #[error("Relative URL is not crawlable: {0}")]
    Relative(String),

    #[error("Invalid URL scheme '{scheme}' in {url}")]
    InvalidScheme { url: String, scheme: String },
}

/// Errors raised while fetching a single page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Unable to crawl {url}: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("Did not receive an OK response from {url}, got {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Errors raised while extracting links from a single document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Unable to parse document {url}: {message}")]
    Document { url: String, message: String },
}

/// Result type alias for Ripple-Spider operations
pub type Result<T> = std::result::Result<T, SpiderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlEngine, CrawlSummary, EngineStatus};
pub use crate::url::{parse_link, parse_seed};
