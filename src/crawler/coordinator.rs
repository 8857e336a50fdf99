//! Crawler coordinator - turns a configuration into a running crawl
//!
//! This module wires the production collaborators together:
//! - Validating the merged configuration
//! - Parsing the seed URL
//! - Building the HTTP fetcher and the HTML link parser
//! - Creating the engine and running it

use crate::config::{validate, CrawlConfig};
use crate::crawler::engine::{CrawlEngine, CrawlSummary, EngineSettings};
use crate::crawler::fetcher::HttpFetcher;
use crate::crawler::parser::HtmlLinkParser;
use crate::url::parse_seed;
use crate::SpiderError;
use std::sync::Arc;
use tokio::sync::mpsc;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    seed: Url,
    engine: Arc<CrawlEngine>,
    fetcher: Arc<HttpFetcher>,
    parser: Arc<HtmlLinkParser>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Every fatal startup condition is detected here, before any worker
    /// starts.
    ///
    /// # Arguments
    ///
    /// * `config` - The merged crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SpiderError)` - Invalid configuration, seed URL, or HTTP client
    pub fn new(config: CrawlConfig) -> Result<Self, SpiderError> {
        validate(&config)?;

        let seed = parse_seed(&config.crawler.starting_url)?;
        let fetcher = HttpFetcher::new(&config.http)?;
        let parser = HtmlLinkParser::new()?;
        let engine = CrawlEngine::new(EngineSettings::from(&config.crawler));

        tracing::debug!(
            "Client label '{}', request timeout {}s",
            config.http.client_label,
            config.http.request_timeout
        );

        Ok(Self {
            seed,
            engine: Arc::new(engine),
            fetcher: Arc::new(fetcher),
            parser: Arc::new(parser),
        })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The engine this coordinator will run
    pub fn engine(&self) -> &Arc<CrawlEngine> {
        &self.engine
    }

    /// Runs the crawl to completion
    ///
    /// Each message on `status_triggers` produces one status line.
    pub async fn run(self, status_triggers: mpsc::Receiver<()>) -> CrawlSummary {
        self.engine
            .run(self.seed, self.fetcher, self.parser, status_triggers)
            .await
    }
}

/// Runs a complete crawl operation
///
/// # Arguments
///
/// * `config` - The merged crawler configuration
/// * `status_triggers` - Each message requests one status line
///
/// # Returns
///
/// * `Ok(CrawlSummary)` - The crawl reached its limit and shut down
/// * `Err(SpiderError)` - The crawl could not start
///
/// # Example
///
/// ```no_run
/// use ripple_spider::config::CrawlConfig;
/// use ripple_spider::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut config = CrawlConfig::default();
/// config.crawler.starting_url = "https://example.com/".to_string();
/// let (_status, triggers) = tokio::sync::mpsc::channel(1);
/// let summary = run_crawl(config, triggers).await?;
/// println!("Crawled {} pages", summary.pages_crawled);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: CrawlConfig,
    status_triggers: mpsc::Receiver<()>,
) -> Result<CrawlSummary, SpiderError> {
    let coordinator = Coordinator::new(config)?;
    Ok(coordinator.run(status_triggers).await)
}
