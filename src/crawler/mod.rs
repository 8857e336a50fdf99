//! Crawler module for web page fetching and processing
//!
//! This module contains the concurrent crawl pipeline:
//! - Bounded frontier and response queues
//! - Fetch and parse worker pools
//! - The shared crawl counter and one-shot shutdown signal
//! - On-demand status reporting
//! - Overall crawl coordination

mod coordinator;
mod counter;
mod engine;
mod fetcher;
mod parser;
mod pool;
mod queue;
mod shutdown;
mod status;
mod workers;

pub use coordinator::{run_crawl, Coordinator};
pub use counter::CrawlCounter;
pub use engine::{CrawlEngine, CrawlSummary, EngineSettings};
pub use fetcher::{
    build_http_client, FetchedResponse, Fetcher, HttpFetcher, OpenResponses, ResponseBody,
};
pub use parser::{extract_hrefs, HtmlLinkParser, LinkParser};
pub use pool::{Worker, WorkerPool};
pub use queue::{BoundedQueue, QueueError};
pub use shutdown::Shutdown;
pub use status::{EngineStatus, StatusReporter};
pub use workers::{FetchWorker, ParseWorker};

use crate::config::CrawlConfig;
use crate::SpiderError;
use tokio::sync::mpsc;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the configuration and parse the seed URL
/// 2. Build the HTTP client and link parser
/// 3. Seed the frontier
/// 4. Run the fetch and parse pools until the crawl limit is reached
/// 5. Join every worker and summarize the run
pub async fn crawl(
    config: CrawlConfig,
    status_triggers: mpsc::Receiver<()>,
) -> Result<CrawlSummary, SpiderError> {
    run_crawl(config, status_triggers).await
}
