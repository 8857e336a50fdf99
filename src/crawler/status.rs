//! On-demand status reporting
//!
//! The reporter sleeps until something asks for a status line (SIGHUP in the
//! binary) and then logs queue depths and the crawl count. It only reads.

use crate::crawler::engine::CrawlEngine;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Point-in-time view of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStatus {
    /// URLs waiting to be fetched
    pub frontier: usize,
    /// Responses waiting to be parsed
    pub responses: usize,
    /// Successful fetches counted so far
    pub crawled: u64,
    /// Fetched responses not yet released
    pub open_responses: usize,
}

/// Background unit that logs an [`EngineStatus`] per trigger
pub struct StatusReporter {
    engine: Arc<CrawlEngine>,
    triggers: mpsc::Receiver<()>,
}

impl StatusReporter {
    pub fn new(engine: Arc<CrawlEngine>, triggers: mpsc::Receiver<()>) -> Self {
        Self { engine, triggers }
    }

    /// Runs until the engine shuts down
    ///
    /// Returns the number of status lines emitted.
    pub async fn run(mut self) -> usize {
        let shutdown = self.engine.shutdown().clone();
        let mut reports = 0;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                trigger = self.triggers.recv() => match trigger {
                    Some(()) => {
                        report(&self.engine.status());
                        reports += 1;
                    }
                    None => {
                        // Nothing can ask for a status line any more.
                        shutdown.wait().await;
                        break;
                    }
                },
            }
        }

        tracing::debug!("Status reporter stopped after {} reports", reports);
        reports
    }
}

fn report(status: &EngineStatus) {
    tracing::info!(
        frontier = status.frontier,
        responses = status.responses,
        crawled = status.crawled,
        "Crawl status"
    );
}
