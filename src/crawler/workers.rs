//! Work functions for the fetch and parse pools
//!
//! Fetch workers turn frontier URLs into responses; parse workers turn
//! responses back into frontier URLs and decide when the crawl is over.

use crate::crawler::engine::CrawlEngine;
use crate::crawler::fetcher::{FetchedResponse, Fetcher};
use crate::crawler::parser::LinkParser;
use crate::crawler::pool::Worker;
use crate::url::parse_link;
use crate::UrlError;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Fetches one frontier URL per call
pub struct FetchWorker<F> {
    engine: Arc<CrawlEngine>,
    fetcher: Arc<F>,
}

impl<F> FetchWorker<F> {
    pub fn new(engine: Arc<CrawlEngine>, fetcher: Arc<F>) -> Self {
        Self { engine, fetcher }
    }
}

#[async_trait]
impl<F: Fetcher + 'static> Worker for FetchWorker<F> {
    type Item = Url;

    async fn handle(&self, worker_id: usize, url: Url) {
        let engine = &self.engine;
        let shutdown = engine.shutdown();

        let delay = engine.settings().crawl_delay;
        if !delay.is_zero() {
            tokio::select! {
                biased;
                _ = shutdown.wait() => return,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::info!("Crawling {}", url);
        let mut response = match self.fetcher.fetch(&url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{}", e);
                return;
            }
        };
        response.track(engine.open_responses());

        // The count must be visible before the response can reach a parser.
        match engine.counter().claim(engine.settings().crawl_limit) {
            Some(crawled) => {
                tracing::debug!(worker = worker_id, crawled, "Fetched {}", url)
            }
            None => tracing::debug!(
                worker = worker_id,
                "Crawl limit already reached, forwarding {} uncounted",
                url
            ),
        }

        if let Err(e) = engine.responses().push(response, shutdown).await {
            tracing::debug!("Dropped response for {}: {}", url, e);
        }
    }
}

/// Extracts links from one response per call
pub struct ParseWorker<P> {
    engine: Arc<CrawlEngine>,
    parser: Arc<P>,
}

impl<P> ParseWorker<P> {
    pub fn new(engine: Arc<CrawlEngine>, parser: Arc<P>) -> Self {
        Self { engine, parser }
    }
}

#[async_trait]
impl<P: LinkParser + 'static> Worker for ParseWorker<P> {
    type Item = FetchedResponse;

    async fn handle(&self, worker_id: usize, response: FetchedResponse) {
        let engine = &self.engine;

        // Checked before parsing, so the page that hits the limit adds no links.
        if engine.counter().reached(engine.settings().crawl_limit) {
            response.release();
            if engine.shutdown().raise() {
                tracing::info!(
                    crawled = engine.counter().get(),
                    "Crawl limit reached! Shutting down"
                );
            }
            return;
        }

        let page = response.url().clone();
        let document = match response.into_text().await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Unable to parse URL {}: {}", page, e);
                return;
            }
        };

        let hrefs = match self.parser.parse_links(&document) {
            Ok(hrefs) => hrefs,
            Err(e) => {
                tracing::warn!("Unable to parse URL {}: {}", page, e);
                return;
            }
        };

        let mut queued = 0usize;
        for href in hrefs {
            let link = match parse_link(&href) {
                Ok(link) => link,
                Err(e @ UrlError::Parse { .. }) => {
                    tracing::warn!("{}", e);
                    continue;
                }
                Err(e) => {
                    tracing::trace!("Skipping link: {}", e);
                    continue;
                }
            };

            if let Err(e) = engine.frontier().push(link, engine.shutdown()).await {
                tracing::debug!("Stopped queueing links from {}: {}", page, e);
                break;
            }
            queued += 1;
        }

        tracing::debug!(worker = worker_id, queued, "Parsed {}", page);
    }
}
