//! Fixed-size worker pools
//!
//! A pool runs `size` identical tasks that pull from one queue and hand each
//! item to a [`Worker`]. Every task stops as soon as the shutdown signal is
//! raised; items still queued at that point are abandoned.

use crate::crawler::queue::BoundedQueue;
use crate::crawler::shutdown::Shutdown;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinSet;

/// The work function a pool applies to each queued item
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    type Item: Send + 'static;

    /// Handles one item. Failures are dealt with here and never escape.
    async fn handle(&self, worker_id: usize, item: Self::Item);
}

/// A running pool of worker tasks
#[derive(Debug)]
pub struct WorkerPool {
    name: &'static str,
    tasks: JoinSet<()>,
}

impl WorkerPool {
    /// Starts `size` tasks that feed items from `queue` to `worker`
    pub fn spawn<W: Worker>(
        name: &'static str,
        size: usize,
        worker: Arc<W>,
        queue: Arc<BoundedQueue<W::Item>>,
        shutdown: Shutdown,
    ) -> Self {
        let mut tasks = JoinSet::new();

        for worker_id in 0..size {
            let worker = Arc::clone(&worker);
            let queue = Arc::clone(&queue);
            let shutdown = shutdown.clone();

            tasks.spawn(async move {
                tracing::debug!("{} worker {} started", name, worker_id);
                while let Some(item) = queue.pop(&shutdown).await {
                    worker.handle(worker_id, item).await;
                }
                tracing::debug!("{} worker {} stopped", name, worker_id);
            });
        }

        Self { name, tasks }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of tasks that have not been joined yet
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits for every task to finish
    ///
    /// Returns how many tasks completed normally. A panicking task is logged
    /// and not counted.
    pub async fn join(mut self) -> usize {
        let mut completed = 0;
        while let Some(result) = self.tasks.join_next().await {
            match result {
                Ok(()) => completed += 1,
                Err(e) => tracing::error!("{} worker failed: {}", self.name, e),
            }
        }
        tracing::debug!("{} pool stopped ({} workers)", self.name, completed);
        completed
    }
}
