//! Shared count of successfully fetched pages

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide crawl counter
///
/// Written only by fetch workers, read by parse workers. It never moves past
/// the limit it is claimed against and is never decremented.
#[derive(Debug, Default)]
pub struct CrawlCounter {
    crawled: AtomicU64,
}

impl CrawlCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one successful fetch if the budget allows it
    ///
    /// Returns the new count, or `None` when `limit` has already been reached.
    pub fn claim(&self, limit: u64) -> Option<u64> {
        self.crawled
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < limit).then_some(current + 1)
            })
            .ok()
            .map(|previous| previous + 1)
    }

    /// Current number of counted fetches
    pub fn get(&self) -> u64 {
        self.crawled.load(Ordering::Acquire)
    }

    /// Returns true once the counter has reached `limit`
    pub fn reached(&self, limit: u64) -> bool {
        self.get() >= limit
    }
}
