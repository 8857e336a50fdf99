use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Ripple-Spider
///
/// Every key is optional; missing keys fall back to the defaults the CLI
/// documents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlConfig {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// The seed URL the crawl starts from
    #[serde(rename = "starting-url")]
    pub starting_url: String,

    /// Number of successful fetches after which the crawl stops
    #[serde(rename = "crawl-limit")]
    pub crawl_limit: u64,

    /// Number of fetch workers, and separately of parse workers
    #[serde(rename = "num-threads")]
    pub num_threads: u32,

    /// Seconds each fetch worker waits before every request
    #[serde(rename = "crawl-delay")]
    pub crawl_delay: u64,

    /// Capacity of the queue of URLs waiting to be fetched
    #[serde(rename = "frontier-capacity")]
    pub frontier_capacity: usize,

    /// Capacity of the queue of responses waiting to be parsed
    #[serde(rename = "response-capacity")]
    pub response_capacity: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            starting_url: String::new(),
            crawl_limit: 100,
            num_threads: 1,
            crawl_delay: 1,
            frontier_capacity: 10,
            response_capacity: 15,
        }
    }
}

impl CrawlerConfig {
    /// The inter-fetch delay as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.crawl_delay)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Sent as the User-Agent header on every request
    #[serde(rename = "client-label")]
    pub client_label: String,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            client_label: "Ripple Spider 0.1".to_string(),
            request_timeout: 30,
        }
    }
}

/// Values given on the command line
///
/// Anything set here wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct CrawlOverrides {
    pub starting_url: Option<String>,
    pub crawl_limit: Option<u64>,
    pub num_threads: Option<u32>,
    pub crawl_delay: Option<u64>,
}

impl CrawlConfig {
    /// Applies command-line overrides on top of this configuration
    pub fn with_overrides(mut self, overrides: CrawlOverrides) -> Self {
        if let Some(url) = overrides.starting_url {
            self.crawler.starting_url = url;
        }
        if let Some(limit) = overrides.crawl_limit {
            self.crawler.crawl_limit = limit;
        }
        if let Some(threads) = overrides.num_threads {
            self.crawler.num_threads = threads;
        }
        if let Some(delay) = overrides.crawl_delay {
            self.crawler.crawl_delay = delay;
        }
        self
    }

    /// Returns true if no seed URL was supplied anywhere
    pub fn has_seed(&self) -> bool {
        !self.crawler.starting_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.crawler.crawl_limit, 100);
        assert_eq!(config.crawler.num_threads, 1);
        assert_eq!(config.crawler.crawl_delay, 1);
        assert_eq!(config.crawler.frontier_capacity, 10);
        assert_eq!(config.crawler.response_capacity, 15);
        assert!(!config.has_seed());
    }

    #[test]
    fn test_overrides_win() {
        let config = CrawlConfig::default().with_overrides(CrawlOverrides {
            starting_url: Some("http://example.com".to_string()),
            crawl_limit: Some(5),
            num_threads: None,
            crawl_delay: Some(0),
        });

        assert_eq!(config.crawler.starting_url, "http://example.com");
        assert_eq!(config.crawler.crawl_limit, 5);
        assert_eq!(config.crawler.num_threads, 1);
        assert_eq!(config.crawler.delay(), Duration::ZERO);
        assert!(config.has_seed());
    }

    #[test]
    fn test_blank_seed_is_missing() {
        let mut config = CrawlConfig::default();
        config.crawler.starting_url = "   ".to_string();
        assert!(!config.has_seed());
    }
}
