//! Crawl engine - shared state and the run loop
//!
//! The engine owns everything the worker pools share: both queues, the crawl
//! counter, the shutdown signal and the open-response gauge. One engine is one
//! crawl; tests build as many as they like.
//!
//! # Liveness
//!
//! Both queues are bounded and the pipeline is a cycle. If every parse worker
//! is waiting on a full frontier while every fetch worker is waiting on a full
//! response queue, nothing moves and the limit is never observed. Small fixed
//! capacities make this unlikely; it is accepted rather than hidden behind
//! unbounded queues. A crawl whose frontier runs dry before the limit is
//! reached also idles until the process is stopped.

use crate::config::CrawlerConfig;
use crate::crawler::counter::CrawlCounter;
use crate::crawler::fetcher::{FetchedResponse, Fetcher, OpenResponses};
use crate::crawler::parser::LinkParser;
use crate::crawler::pool::WorkerPool;
use crate::crawler::queue::BoundedQueue;
use crate::crawler::shutdown::Shutdown;
use crate::crawler::status::{EngineStatus, StatusReporter};
use crate::crawler::workers::{FetchWorker, ParseWorker};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use url::Url;

/// Tunables for one engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Successful fetches after which the crawl stops
    pub crawl_limit: u64,
    /// Size of each worker pool
    pub num_threads: usize,
    /// Wait before every fetch
    pub crawl_delay: Duration,
    pub frontier_capacity: usize,
    pub response_capacity: usize,
}

impl From<&CrawlerConfig> for EngineSettings {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            crawl_limit: config.crawl_limit,
            num_threads: config.num_threads as usize,
            crawl_delay: config.delay(),
            frontier_capacity: config.frontier_capacity,
            response_capacity: config.response_capacity,
        }
    }
}

/// What a finished crawl left behind
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    /// Successful fetches counted against the limit
    pub pages_crawled: u64,
    /// URLs still queued when the crawl stopped
    pub frontier_abandoned: usize,
    /// Responses still queued when the crawl stopped
    pub responses_abandoned: usize,
    /// Status lines emitted during the run
    pub status_reports: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Shared context for one crawl
#[derive(Debug)]
pub struct CrawlEngine {
    settings: EngineSettings,
    frontier: Arc<BoundedQueue<Url>>,
    responses: Arc<BoundedQueue<FetchedResponse>>,
    counter: CrawlCounter,
    shutdown: Shutdown,
    open_responses: OpenResponses,
}

impl CrawlEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            frontier: Arc::new(BoundedQueue::new("frontier", settings.frontier_capacity)),
            responses: Arc::new(BoundedQueue::new("response", settings.response_capacity)),
            counter: CrawlCounter::new(),
            shutdown: Shutdown::new(),
            open_responses: OpenResponses::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn frontier(&self) -> &BoundedQueue<Url> {
        &self.frontier
    }

    pub fn responses(&self) -> &BoundedQueue<FetchedResponse> {
        &self.responses
    }

    pub fn counter(&self) -> &CrawlCounter {
        &self.counter
    }

    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }

    pub fn open_responses(&self) -> &OpenResponses {
        &self.open_responses
    }

    /// Reads queue depths and the crawl count
    ///
    /// The fields are read one after another, not as one atomic snapshot.
    pub fn status(&self) -> EngineStatus {
        EngineStatus {
            frontier: self.frontier.len(),
            responses: self.responses.len(),
            crawled: self.counter.get(),
            open_responses: self.open_responses.get(),
        }
    }

    /// Runs a crawl from `seed` until the crawl limit shuts it down
    ///
    /// Spawns the status reporter and one fetch and one parse pool of
    /// `num_threads` workers each, then waits for all of them to finish.
    pub async fn run<F, P>(
        self: Arc<Self>,
        seed: Url,
        fetcher: Arc<F>,
        parser: Arc<P>,
        status_triggers: mpsc::Receiver<()>,
    ) -> CrawlSummary
    where
        F: Fetcher + 'static,
        P: LinkParser + 'static,
    {
        let started_at = Utc::now();
        tracing::info!(
            limit = self.settings.crawl_limit,
            threads = self.settings.num_threads,
            "Starting crawl from {}",
            seed
        );

        if let Err(e) = self.frontier.push(seed, &self.shutdown).await {
            tracing::warn!("Seed URL was not queued: {}", e);
        }

        let reporter = tokio::spawn(StatusReporter::new(Arc::clone(&self), status_triggers).run());

        let fetchers = WorkerPool::spawn(
            "fetch",
            self.settings.num_threads,
            Arc::new(FetchWorker::new(Arc::clone(&self), fetcher)),
            Arc::clone(&self.frontier),
            self.shutdown.clone(),
        );
        let parsers = WorkerPool::spawn(
            "parse",
            self.settings.num_threads,
            Arc::new(ParseWorker::new(Arc::clone(&self), parser)),
            Arc::clone(&self.responses),
            self.shutdown.clone(),
        );

        self.shutdown.wait().await;

        fetchers.join().await;
        parsers.join().await;
        let status_reports = reporter.await.unwrap_or_else(|e| {
            tracing::error!("Status reporter failed: {}", e);
            0
        });

        let summary = CrawlSummary {
            pages_crawled: self.counter.get(),
            frontier_abandoned: self.frontier.len(),
            responses_abandoned: self.responses.len(),
            status_reports,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            crawled = summary.pages_crawled,
            frontier = summary.frontier_abandoned,
            responses = summary.responses_abandoned,
            "Crawl finished in {}ms",
            summary.elapsed().num_milliseconds()
        );

        summary
    }
}
