//! Submission side of the worker pool.

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use futures::executor::block_on;
use tokio::select;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::config::Backpressure;
use crate::error::RuntimeError;
use crate::events::{Event, EventKind};
use crate::subscribers::SubscriberSet;

/// Boxed unit of work.
pub(crate) type JobFn<T, E> = Box<dyn FnOnce() -> Result<T, E> + Send + 'static>;

/// Outcome delivered to the result stream; `Err` carries a panic payload.
pub(crate) type Outcome<T, E> = Result<Result<T, E>, Box<dyn Any + Send + 'static>>;

/// One queued job.
pub(crate) struct Job<T, E> {
    pub(crate) id: u64,
    pub(crate) run: JobFn<T, E>,
    /// Held until the job finishes (only under `Backpressure::Block`).
    pub(crate) permit: Option<OwnedSemaphorePermit>,
}

/// Handle passed to the producer for submitting jobs.
///
/// ### Rules
/// - `submit` fails with [`RuntimeError::Cancelled`] once the stream is closed
///   or the bound token fires; a producer should stop on the first error.
/// - Job numbers are 1-based and increase per pool.
pub struct Submitter<T, E> {
    pub(crate) jobs: Sender<Job<T, E>>,
    pub(crate) permits: Arc<Semaphore>,
    pub(crate) token: CancellationToken,
    pub(crate) backpressure: Backpressure,
    pub(crate) subscribers: SubscriberSet,
    pub(crate) pool_id: u64,
    pub(crate) next_job: AtomicU64,
}

impl<T, E> Submitter<T, E> {
    /// Queues `job` for execution on a worker.
    ///
    /// Blocks under [`Backpressure::Block`] while the pool is saturated.
    pub fn submit<F>(&self, job: F) -> Result<(), RuntimeError>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        self.enqueue(Box::new(job)).map_err(|err| {
            self.subscribers.emit(
                &Event::new(EventKind::SubmitRejected)
                    .with_pool(self.pool_id)
                    .with_reason(err.as_label()),
            );
            err
        })
    }

    /// True once submission has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token observed by this submitter; fires when the stream is closed.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    fn enqueue(&self, run: JobFn<T, E>) -> Result<(), RuntimeError> {
        if self.token.is_cancelled() {
            return Err(RuntimeError::Cancelled);
        }
        let permit = match self.backpressure {
            Backpressure::Block => Some(self.acquire()?),
            Backpressure::Queue => None,
        };
        let id = self.next_job.fetch_add(1, Ordering::Relaxed) + 1;
        self.jobs
            .send(Job { id, run, permit })
            .map_err(|_| RuntimeError::Closed)
    }

    fn acquire(&self) -> Result<OwnedSemaphorePermit, RuntimeError> {
        let permits = Arc::clone(&self.permits);
        let token = &self.token;
        block_on(async move {
            let permit_future = permits.acquire_owned();
            tokio::pin!(permit_future);

            select! {
                biased;
                _ = token.cancelled() => Err(RuntimeError::Cancelled),
                res = &mut permit_future => res.map_err(|_closed| RuntimeError::Closed),
            }
        })
    }
}
