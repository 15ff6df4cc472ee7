//! # Pull cursor: step-by-step consumption of a push sequence.
//!
//! A [`Cursor`] runs the sequence on one dedicated background thread and
//! hands elements over a zero-capacity rendezvous, one per `next()` call.
//!
//! ## Hand-off protocol
//! ```text
//! consumer                          producer thread
//! ────────                          ───────────────
//!                                   wait resume ◄─────────┐
//! next() ──► resume ──────────────► run sequence          │
//!        ◄── item   ◄────────────── sink(x): send item    │
//!                                            wait resume ─┘
//! stop() ──► drop both channel ends ► send/recv fails → sink returns false
//!        ──► join thread
//! ```
//!
//! ## Rules
//! - Production starts on the first `next()`; nothing runs ahead of demand.
//! - `stop()` is idempotent and returns only after the producer thread exited.
//! - `next()` after exhaustion or `stop()` returns `None`.
//! - Dropping the cursor stops it.
//! - A producer panic is re-raised on the consumer (unless it is already
//!   unwinding).

use std::panic;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tokio_util::sync::CancellationToken;

use crate::config::ParallelConfig;
use crate::error::RuntimeError;
use crate::events::{next_resource_id, Event, EventKind};
use crate::seq::Sequence;
use crate::subscribers::SubscriberSet;

/// Pull view over a sequence, backed by one background thread.
///
/// ```rust
/// use lazyseq::{iter, SequenceExt};
///
/// let mut cur = iter(1..).map(|x: u64| x * x).cursor().unwrap();
/// assert_eq!(cur.next(), Some(1));
/// assert_eq!(cur.next(), Some(4));
/// cur.stop();
/// assert_eq!(cur.next(), None);
/// ```
pub struct Cursor<T> {
    id: u64,
    resume: Option<Sender<()>>,
    items: Option<Receiver<T>>,
    handle: Option<JoinHandle<()>>,
    subscribers: SubscriberSet,
    handed: u64,
}

impl<T: Send + 'static> Cursor<T> {
    /// Starts a cursor over `seq` with no subscribers and no external token.
    pub fn new<S>(seq: S) -> Result<Self, RuntimeError>
    where
        S: Sequence<Item = T> + Send + 'static,
    {
        Self::spawn(seq, SubscriberSet::default(), None)
    }

    /// Starts a cursor using the subscribers and cancellation token of `config`.
    ///
    /// When the token fires the producer stops at its next element.
    pub fn with_config<S>(seq: S, config: &ParallelConfig) -> Result<Self, RuntimeError>
    where
        S: Sequence<Item = T> + Send + 'static,
    {
        Self::spawn(seq, config.subscribers.clone(), config.cancel.clone())
    }

    fn spawn<S>(
        seq: S,
        subscribers: SubscriberSet,
        cancel: Option<CancellationToken>,
    ) -> Result<Self, RuntimeError>
    where
        S: Sequence<Item = T> + Send + 'static,
    {
        let id = next_resource_id();
        let (resume_tx, resume_rx) = bounded::<()>(0);
        let (item_tx, item_rx) = bounded::<T>(0);

        let handle = thread::Builder::new()
            .name(format!("lazyseq-cursor-{id}"))
            .spawn(move || {
                if resume_rx.recv().is_err() {
                    return;
                }
                let cancelled = || cancel.as_ref().is_some_and(CancellationToken::is_cancelled);
                seq.run(&mut |x| {
                    !cancelled() && item_tx.send(x).is_ok() && resume_rx.recv().is_ok()
                });
            })
            .map_err(|e| RuntimeError::spawn("cursor", e))?;

        subscribers.emit(&Event::new(EventKind::CursorStarted).with_cursor(id));

        Ok(Self {
            id,
            resume: Some(resume_tx),
            items: Some(item_rx),
            handle: Some(handle),
            subscribers,
            handed: 0,
        })
    }
}

impl<T> Cursor<T> {
    /// Identifier used in this cursor's events.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True once the cursor is exhausted or stopped.
    pub fn is_done(&self) -> bool {
        self.handle.is_none()
    }

    /// Number of elements handed to the consumer so far.
    pub fn handed(&self) -> u64 {
        self.handed
    }

    /// Stops the background producer and waits for its thread to exit.
    ///
    /// Safe to call any number of times, before the first `next()` or after
    /// exhaustion.
    pub fn stop(&mut self) {
        if self.handle.is_some() {
            self.finish(EventKind::CursorStopped);
        }
    }

    /// Drops both rendezvous ends, then joins the producer.
    fn finish(&mut self, kind: EventKind) {
        self.resume = None;
        self.items = None;
        let Some(handle) = self.handle.take() else {
            return;
        };
        let joined = handle.join();
        self.subscribers.emit(
            &Event::new(kind)
                .with_cursor(self.id)
                .with_jobs(self.handed),
        );
        if let Err(payload) = joined {
            if !thread::panicking() {
                panic::resume_unwind(payload);
            }
        }
    }
}

impl<T> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (Some(resume), Some(items)) = (&self.resume, &self.items) else {
            return None;
        };
        if resume.send(()).is_err() {
            self.finish(EventKind::CursorExhausted);
            return None;
        }
        match items.recv() {
            Ok(x) => {
                self.handed += 1;
                Some(x)
            }
            Err(_) => {
                self.finish(EventKind::CursorExhausted);
                None
            }
        }
    }
}

impl<T> Drop for Cursor<T> {
    fn drop(&mut self) {
        self.stop();
    }
}
