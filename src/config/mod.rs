//! Configuration module for Ripple-Spider
//!
//! Settings come from an optional TOML file and are overridden by command-line
//! flags.
//!
//! # Example
//!
//! ```no_run
//! use ripple_spider::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("spider.toml")).unwrap();
//! println!("Crawler will stop after {} pages", config.crawler.crawl_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CrawlConfig, CrawlOverrides, CrawlerConfig, HttpConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
