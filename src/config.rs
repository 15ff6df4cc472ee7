//! # Parallel execution configuration.
//!
//! Provides [`ParallelConfig`] centralized settings for the worker pool, the
//! parallel executor and pull cursors.
//!
//! Config is threaded explicitly; there is no process-wide default worker count:
//! 1. **Parallel descriptor**: `seq.par_with(config)` / `seq.parallel(n)`
//! 2. **Worker pool**: `WorkerPool::new(config)`
//! 3. **Cursor**: `Cursor::with_config(seq, &config)` (subscribers only)
//!
//! ## Sentinel values
//! - `workers = 0` → clamped to 1 (a pipeline must be able to make progress)
//! - `cancel = None` → not bound to an external cancellation token

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use tokio_util::sync::CancellationToken;

use crate::subscribers::{Subscribe, SubscriberSet};

/// Policy controlling what `submit` does while `workers` jobs are in flight.
///
/// ## Invariants
/// - At most `workers` jobs **execute** concurrently under either policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backpressure {
    /// Block the submitting thread until a permit frees up.
    ///
    /// Use when:
    /// - The source may be infinite or large
    /// - At most `workers` elements may be mid-pipeline at any moment
    #[default]
    Block,

    /// Enqueue immediately (FIFO); workers drain the queue.
    ///
    /// Use when:
    /// - The source is finite and cheap to buffer
    /// - The producer must never stall
    Queue,
}

/// Configuration for parallel execution.
///
/// ## Field semantics
/// - `workers`: worker thread count and in-flight bound (`0` is clamped to 1)
/// - `backpressure`: submission policy once `workers` jobs are in flight
/// - `cancel`: optional external token; when it fires no new elements are produced
///   or scheduled, in-flight jobs finish
/// - `subscribers`: observers of pool and cursor events
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Maximum number of elements in flight (and worker threads).
    pub workers: usize,

    /// Submission policy under saturation.
    pub backpressure: Backpressure,

    /// External cancellation signal bound to every pipeline built from this config.
    pub cancel: Option<CancellationToken>,

    /// Event subscribers.
    pub subscribers: SubscriberSet,
}

impl ParallelConfig {
    /// Creates a config with the given worker count and defaults elsewhere.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    /// Returns the worker count clamped to a minimum of 1.
    #[inline]
    pub fn workers_clamped(&self) -> usize {
        self.workers.max(1)
    }

    /// Sets the submission policy.
    #[must_use]
    pub fn with_backpressure(mut self, backpressure: Backpressure) -> Self {
        self.backpressure = backpressure;
        self
    }

    /// Binds an external cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Adds an event subscriber.
    #[must_use]
    pub fn with_subscriber(mut self, sub: Arc<dyn Subscribe>) -> Self {
        self.subscribers = self.subscribers.with(sub);
        self
    }

    /// Returns a fresh token for one run: a child of the bound token, or a root.
    ///
    /// Cancelling the child never affects the caller's token.
    pub(crate) fn run_token(&self) -> CancellationToken {
        match &self.cancel {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        }
    }
}

impl Default for ParallelConfig {
    /// Default configuration:
    ///
    /// - `workers = available_parallelism()` (1 if unknown)
    /// - `backpressure = Block`
    /// - `cancel = None`
    /// - no subscribers
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            backpressure: Backpressure::default(),
            cancel: None,
            subscribers: SubscriberSet::default(),
        }
    }
}

impl From<usize> for ParallelConfig {
    fn from(workers: usize) -> Self {
        Self::new(workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_workers_clamped() {
        assert_eq!(ParallelConfig::new(0).workers_clamped(), 1);
        assert_eq!(ParallelConfig::from(6).workers_clamped(), 6);
    }

    #[test]
    fn test_default_has_at_least_one_worker() {
        let cfg = ParallelConfig::default();
        assert!(cfg.workers_clamped() >= 1);
        assert_eq!(cfg.backpressure, Backpressure::Block);
        assert!(cfg.cancel.is_none());
        assert!(cfg.subscribers.is_empty());
    }

    #[test]
    fn test_run_token_is_child_of_bound_token() {
        let parent = CancellationToken::new();
        let cfg = ParallelConfig::new(2).with_cancel(parent.clone());

        let child = cfg.run_token();
        child.cancel();
        assert!(!parent.is_cancelled());

        let child = cfg.run_token();
        parent.cancel();
        assert!(child.is_cancelled());
    }
}
