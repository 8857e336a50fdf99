//! Bounded FIFO queues between the worker pools
//!
//! A full queue makes the producer wait; nothing is ever dropped for lack of
//! room. Every blocking operation also watches the shutdown signal so a worker
//! parked on a queue still exits promptly.

use crate::crawler::shutdown::Shutdown;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};

/// Why an item could not be pushed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("shutdown raised before {0} queue accepted the item")]
    Shutdown(&'static str),

    #[error("{0} queue is closed")]
    Closed(&'static str),
}

/// A multi-producer, multi-consumer bounded queue
///
/// Consumers share the receiving half behind an async mutex; whichever
/// consumer holds it takes the next item.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    name: &'static str,
    tx: mpsc::Sender<T>,
    rx: Mutex<mpsc::Receiver<T>>,
}

impl<T: Send> BoundedQueue<T> {
    /// Creates a queue holding at most `capacity` items
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; configuration validation rules that out.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            name,
            tx,
            rx: Mutex::new(rx),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Appends an item, waiting for a free slot if the queue is full
    ///
    /// Gives up without enqueuing once `shutdown` is raised.
    pub async fn push(&self, item: T, shutdown: &Shutdown) -> Result<(), QueueError> {
        tokio::select! {
            biased;
            _ = shutdown.wait() => Err(QueueError::Shutdown(self.name)),
            sent = self.tx.send(item) => sent.map_err(|_| QueueError::Closed(self.name)),
        }
    }

    /// Takes the oldest item, waiting until one arrives
    ///
    /// Returns `None` once `shutdown` is raised, even if items remain queued.
    pub async fn pop(&self, shutdown: &Shutdown) -> Option<T> {
        tokio::select! {
            biased;
            _ = shutdown.wait() => None,
            item = async { self.rx.lock().await.recv().await } => item,
        }
    }

    /// Number of items currently waiting
    ///
    /// Observational only; the value may be stale by the time it is read.
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}
