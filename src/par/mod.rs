//! # Parallel executor: bounded fan-out of a per-element pipeline.
//!
//! [`Par`] is the parallel descriptor returned by
//! [`SequenceExt::parallel`](crate::SequenceExt::parallel). Combinators called
//! on it *before* any terminal (`map`, `filter`, `flat_map`, ...) are captured
//! into one per-element stage that runs inside the pool's workers. Everything
//! else (`take`, `find`, `reduce`, `collect`, `chain`, ...) operates on the
//! fan-in side, because `Par` is itself a [`Sequence`].
//!
//! ## Architecture
//! ```text
//!                      ┌──────── WorkerPool (N workers) ────────┐
//! source ─► driver ─►  │ job(x) = stage(x) → out, out, ...  × N │ ─► fan-in ─► sink
//!  (one thread)        └────────────────────────────────────────┘  (completion order)
//! ```
//!
//! ## Rules
//! - At most `N` elements are mid-pipeline at any moment.
//! - Output order follows completion order, not source order.
//! - Every stage output reaches the fan-in as soon as it is produced.
//! - A sink that stops (e.g. `take`, `find`) stops distribution; running stages
//!   stop at their next output and `run` returns once they have.
//! - A bound cancellation token stops scheduling; in-flight jobs finish.
//! - Stateful combinators (`dedup`, `enumerate`, `scan`, ...) belong upstream
//!   of `parallel`: they run on the distributing thread only.
//! - `reduce`/`fold` over a `Par` see elements in completion order; the combiner
//!   must be associative and commutative for a deterministic answer.
//!
//! ## Example
//! ```rust
//! use lazyseq::{iter, SequenceExt};
//!
//! let total: u64 = iter(1..=100u64)
//!     .parallel(4)
//!     .filter(|x: &u64| x % 3 == 0)
//!     .map(|x: u64| x * 2)
//!     .fold(0, |a, b| a + b);
//! assert_eq!(total, 3366);
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use tokio_util::sync::CancellationToken;

use crate::config::ParallelConfig;
use crate::events::{Event, EventKind};
use crate::pool::WorkerPool;
use crate::seq::Sequence;

/// Per-element pipeline executed inside a worker.
type Stage<I, O> = Arc<dyn Fn(I, &mut dyn FnMut(O) -> bool) -> bool + Send + Sync>;

/// Parallel descriptor: a source plus the captured per-element stage.
pub struct Par<S: Sequence, O> {
    source: Arc<S>,
    stage: Stage<S::Item, O>,
    config: ParallelConfig,
}

impl<S: Sequence, O> Clone for Par<S, O> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            stage: Arc::clone(&self.stage),
            config: self.config.clone(),
        }
    }
}

impl<S> Par<S, S::Item>
where
    S: Sequence + Send + Sync + 'static,
    S::Item: Send + 'static,
{
    pub(crate) fn new(source: S, config: ParallelConfig) -> Self {
        Self {
            source: Arc::new(source),
            stage: Arc::new(|x, sink: &mut dyn FnMut(S::Item) -> bool| sink(x)),
            config,
        }
    }
}

impl<S, O> Par<S, O>
where
    S: Sequence + Send + Sync + 'static,
    S::Item: Send + 'static,
    O: Send + 'static,
{
    /// Returns the configuration used for every run.
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Binds a cancellation token (replaces any token already configured).
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.config.cancel = Some(token);
        self
    }

    /// Transforms every element inside the workers.
    pub fn map<U, F>(self, f: F) -> Par<S, U>
    where
        U: Send + 'static,
        F: Fn(O) -> U + Send + Sync + 'static,
    {
        self.then(move |o, sink| sink(f(o)))
    }

    /// Keeps elements for which `pred` is true.
    pub fn filter<P>(self, pred: P) -> Par<S, O>
    where
        P: Fn(&O) -> bool + Send + Sync + 'static,
    {
        self.then(move |o, sink| if pred(&o) { sink(o) } else { true })
    }

    /// Drops elements for which `pred` is true.
    pub fn exclude<P>(self, pred: P) -> Par<S, O>
    where
        P: Fn(&O) -> bool + Send + Sync + 'static,
    {
        self.then(move |o, sink| if pred(&o) { true } else { sink(o) })
    }

    /// Transforms and filters in one step.
    pub fn filter_map<U, F>(self, f: F) -> Par<S, U>
    where
        U: Send + 'static,
        F: Fn(O) -> Option<U> + Send + Sync + 'static,
    {
        self.then(move |o, sink| match f(o) {
            Some(u) => sink(u),
            None => true,
        })
    }

    /// Expands every element into a sub-sequence, run inside the worker.
    pub fn flat_map<Q, F>(self, f: F) -> Par<S, Q::Item>
    where
        Q: Sequence,
        Q::Item: Send + 'static,
        F: Fn(O) -> Q + Send + Sync + 'static,
    {
        self.then(move |o, sink| f(o).run(sink))
    }

    /// Observes every element inside the workers.
    pub fn inspect<F>(self, f: F) -> Par<S, O>
    where
        F: Fn(&O) + Send + Sync + 'static,
    {
        self.then(move |o, sink| {
            f(&o);
            sink(o)
        })
    }

    fn then<U, F>(self, next: F) -> Par<S, U>
    where
        F: Fn(O, &mut dyn FnMut(U) -> bool) -> bool + Send + Sync + 'static,
    {
        let prev = self.stage;
        Par {
            source: self.source,
            stage: Arc::new(move |x, sink: &mut dyn FnMut(U) -> bool| {
                prev(x, &mut |o| next(o, &mut *sink))
            }),
            config: self.config,
        }
    }

    fn is_cancelled(&self) -> bool {
        self.config
            .cancel
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Runs source and stage on the calling thread.
    fn run_inline(&self, sink: &mut dyn FnMut(O) -> bool) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.source
            .run(&mut |x| !self.is_cancelled() && (self.stage)(x, &mut *sink))
    }
}

impl<S, O> Sequence for Par<S, O>
where
    S: Sequence + Send + Sync + 'static,
    S::Item: Send + 'static,
    O: Send + 'static,
{
    type Item = O;

    fn run(&self, sink: &mut dyn FnMut(O) -> bool) -> bool {
        let source = Arc::clone(&self.source);
        let stage = Arc::clone(&self.stage);
        let pool = WorkerPool::new(self.config.clone());
        // Disconnects once the driver and every job have dropped their sender.
        let (out_tx, out_rx) = bounded::<O>(self.config.workers_clamped());

        let started = pool.stream::<(), Infallible, _>(move |submit| {
            source.run(&mut |x| {
                let stage = Arc::clone(&stage);
                let out = out_tx.clone();
                let token = submit.token().clone();
                submit
                    .submit(move || {
                        let _guard = CancelOnPanic(token.clone());
                        stage(x, &mut |o| !token.is_cancelled() && out.send(o).is_ok());
                        Ok(())
                    })
                    .is_ok()
            });
        });

        let mut stream = match started {
            Ok(stream) => stream,
            Err(err) => {
                self.config.subscribers.emit(
                    &Event::new(EventKind::PoolFallback)
                        .with_workers(self.config.workers_clamped())
                        .with_reason(err.as_message()),
                );
                return self.run_inline(sink);
            }
        };

        while let Ok(o) = out_rx.recv() {
            if !sink(o) {
                // Unblocks stages waiting to hand over output.
                drop(out_rx);
                stream.close();
                return false;
            }
        }
        // Surfaces job panics.
        for res in stream.by_ref() {
            if let Err(never) = res {
                match never {}
            }
        }
        !self.is_cancelled()
    }
}

/// Cancels the run when a stage unwinds, so the driver stops and the fan-in
/// reaches the panic.
struct CancelOnPanic(CancellationToken);

impl Drop for CancelOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.cancel();
        }
    }
}
