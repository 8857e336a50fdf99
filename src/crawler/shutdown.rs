//! One-shot shutdown broadcast
//!
//! Raised once, observed by every worker and by the status reporter. It is
//! never lowered for the lifetime of an engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A cloneable handle to a shared shutdown signal
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    inner: Arc<ShutdownInner>,
}

#[derive(Debug, Default)]
struct ShutdownInner {
    raised: AtomicBool,
    token: CancellationToken,
}

impl Shutdown {
    /// Creates a signal that has not been raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the signal
    ///
    /// Returns true only for the call that performed the transition. Raising
    /// an already-raised signal is a no-op.
    pub fn raise(&self) -> bool {
        let first = self
            .inner
            .raised
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        // Waking waiters is idempotent on the token, so this runs unconditionally.
        self.inner.token.cancel();
        first
    }

    /// Returns true once the signal has been raised
    pub fn is_raised(&self) -> bool {
        self.inner.raised.load(Ordering::Acquire)
    }

    /// Completes when the signal is raised, immediately if it already was
    pub async fn wait(&self) {
        self.inner.token.cancelled().await
    }
}
