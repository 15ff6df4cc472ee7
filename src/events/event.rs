//! # Runtime events emitted by worker pools and pull cursors.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Pool events**: worker pool lifecycle (started, drained, cancelled, fallback)
//! - **Job events**: per-job outcomes worth reporting (failed, panicked, rejected)
//! - **Cursor events**: pull cursor lifecycle (started, exhausted, stopped)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! pool or cursor identifier, worker counts and reasons.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Events are emitted from several threads; use `seq` to restore the exact order.
//!
//! ## Example
//! ```rust
//! use lazyseq::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::JobPanicked)
//!     .with_pool(3)
//!     .with_job(17)
//!     .with_reason("index out of bounds");
//!
//! assert_eq!(ev.kind, EventKind::JobPanicked);
//! assert_eq!(ev.pool, Some(3));
//! assert_eq!(ev.reason.as_deref(), Some("index out of bounds"));
//! ```

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Global counter used to identify pools and cursors in events.
static RESOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates a process-unique identifier for a pool or cursor.
pub(crate) fn next_resource_id() -> u64 {
    RESOURCE_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // === Pool events ===
    /// Worker pool spawned its driver and worker threads.
    ///
    /// Sets:
    /// - `pool`: pool id
    /// - `workers`: number of worker threads
    PoolStarted,

    /// Producer finished and every submitted job completed.
    ///
    /// Sets:
    /// - `pool`: pool id
    /// - `jobs`: number of jobs that ran to completion
    PoolDrained,

    /// Result stream was closed before the producer finished.
    ///
    /// Sets:
    /// - `pool`: pool id
    /// - `jobs`: number of jobs that ran to completion
    PoolCancelled,

    /// Pool threads could not be spawned; work ran inline on the caller.
    ///
    /// Sets:
    /// - `workers`: requested worker count
    /// - `reason`: spawn error message
    PoolFallback,

    // === Job events ===
    /// A job returned `Err`. Sibling jobs are unaffected.
    ///
    /// Sets:
    /// - `pool`: pool id
    /// - `job`: job number (1-based, per pool)
    JobFailed,

    /// A job panicked; the panic is re-raised on the consuming thread.
    ///
    /// Sets:
    /// - `pool`: pool id
    /// - `job`: job number
    /// - `reason`: panic message
    JobPanicked,

    /// A submission was refused (cancelled or pool closed).
    ///
    /// Sets:
    /// - `pool`: pool id
    /// - `reason`: error label
    SubmitRejected,

    // === Cursor events ===
    /// Pull cursor spawned its background producer.
    ///
    /// Sets:
    /// - `cursor`: cursor id
    CursorStarted,

    /// Producer behind a pull cursor ran out of elements.
    ///
    /// Sets:
    /// - `cursor`: cursor id
    /// - `jobs`: number of elements handed over
    CursorExhausted,

    /// Pull cursor was stopped before exhaustion.
    ///
    /// Sets:
    /// - `cursor`: cursor id
    /// - `jobs`: number of elements handed over
    CursorStopped,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `reason`: subscriber name and panic message
    SubscriberPanicked,
}

impl EventKind {
    /// Returns a short stable label used by log output.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::PoolStarted => "pool-started",
            EventKind::PoolDrained => "pool-drained",
            EventKind::PoolCancelled => "pool-cancelled",
            EventKind::PoolFallback => "pool-fallback",
            EventKind::JobFailed => "job-failed",
            EventKind::JobPanicked => "job-panicked",
            EventKind::SubmitRejected => "submit-rejected",
            EventKind::CursorStarted => "cursor-started",
            EventKind::CursorExhausted => "cursor-exhausted",
            EventKind::CursorStopped => "cursor-stopped",
            EventKind::SubscriberPanicked => "subscriber-panicked",
        }
    }
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Identifier of the emitting pool, if applicable.
    pub pool: Option<u64>,
    /// Identifier of the emitting cursor, if applicable.
    pub cursor: Option<u64>,
    /// Job number within its pool (starting from 1).
    pub job: Option<u64>,
    /// Worker thread count.
    pub workers: Option<u32>,
    /// Count of completed jobs or handed-over elements.
    pub jobs: Option<u64>,
    /// Human-readable reason (errors, panic messages, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            pool: None,
            cursor: None,
            job: None,
            workers: None,
            jobs: None,
            reason: None,
        }
    }

    /// Attaches a pool identifier.
    #[inline]
    pub fn with_pool(mut self, id: u64) -> Self {
        self.pool = Some(id);
        self
    }

    /// Attaches a cursor identifier.
    #[inline]
    pub fn with_cursor(mut self, id: u64) -> Self {
        self.cursor = Some(id);
        self
    }

    /// Attaches a job number.
    #[inline]
    pub fn with_job(mut self, n: u64) -> Self {
        self.job = Some(n);
        self
    }

    /// Attaches a worker count (saturates at `u32::MAX`).
    #[inline]
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }

    /// Attaches a completed-job count.
    #[inline]
    pub fn with_jobs(mut self, n: u64) -> Self {
        self.jobs = Some(n);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} panic={info}"))
    }

    /// True for events reporting a subscriber panic.
    ///
    /// Subscribers that forward events elsewhere can use it to avoid reporting
    /// their own failures in a loop.
    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}

/// Renders a panic payload as text for the `reason` field.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
