//! Consuming side of the worker pool.

use std::panic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::events::{Event, EventKind};
use crate::result::ResultSeq;
use crate::seq::{drain, Drain};
use crate::subscribers::SubscriberSet;

use super::submit::Outcome;

/// Unordered stream of job results, in completion order.
///
/// ### Rules
/// - Yields every `Ok` and `Err` exactly once, then `None`.
/// - Re-raises a job or producer panic on the consuming thread.
/// - [`close`](ResultStream::close) (also run on drop) cancels submission,
///   skips queued jobs, waits for running ones and joins every pool thread.
pub struct ResultStream<T, E> {
    results: Receiver<Outcome<T, E>>,
    token: CancellationToken,
    permits: Arc<Semaphore>,
    threads: Vec<JoinHandle<()>>,
    subscribers: SubscriberSet,
    pool_id: u64,
    completed: Arc<AtomicU64>,
    finished: bool,
}

impl<T, E> ResultStream<T, E> {
    pub(crate) fn new(
        results: Receiver<Outcome<T, E>>,
        token: CancellationToken,
        permits: Arc<Semaphore>,
        threads: Vec<JoinHandle<()>>,
        subscribers: SubscriberSet,
        pool_id: u64,
        completed: Arc<AtomicU64>,
    ) -> Self {
        Self {
            results,
            token,
            permits,
            threads,
            subscribers,
            pool_id,
            completed,
            finished: false,
        }
    }

    /// Identifier used in this pool's events.
    pub fn pool_id(&self) -> u64 {
        self.pool_id
    }

    /// True once the stream has ended or been closed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Stops the pool early.
    ///
    /// No new jobs are accepted or started; jobs already running finish and
    /// their results are discarded. Returns once every pool thread has exited.
    /// Idempotent.
    pub fn close(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.token.cancel();
        self.permits.close();
        // Discard whatever is still coming, including panics.
        for _ in self.results.iter() {}
        self.join();
        self.subscribers.emit(
            &Event::new(EventKind::PoolCancelled)
                .with_pool(self.pool_id)
                .with_jobs(self.completed.load(Ordering::Relaxed)),
        );
    }

    /// Exposes the remaining results as a one-shot result sequence.
    pub fn into_seq(self) -> ResultSeq<Drain<Self>> {
        ResultSeq::new(drain(self))
    }

    fn join(&mut self) {
        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        self.join();
        self.subscribers.emit(
            &Event::new(EventKind::PoolDrained)
                .with_pool(self.pool_id)
                .with_jobs(self.completed.load(Ordering::Relaxed)),
        );
    }
}

impl<T, E> Iterator for ResultStream<T, E> {
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Result<T, E>> {
        if self.finished {
            return None;
        }
        match self.results.recv() {
            Ok(Ok(res)) => Some(res),
            Ok(Err(payload)) => {
                self.close();
                panic::resume_unwind(payload)
            }
            Err(_disconnected) => {
                self.finish();
                None
            }
        }
    }
}

impl<T, E> Drop for ResultStream<T, E> {
    fn drop(&mut self) {
        self.close();
    }
}
