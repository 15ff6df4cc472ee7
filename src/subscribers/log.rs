//! # LogWriter: simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [pool-started] pool=1 workers=4
//! [job-failed] pool=1 job=7
//! [job-panicked] pool=1 job=9 reason="index out of bounds"
//! [pool-drained] pool=1 jobs=100
//! [cursor-started] cursor=2
//! [cursor-stopped] cursor=2 handed=3
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let label = e.kind.as_label();
        match e.kind {
            EventKind::PoolStarted => {
                println!("[{label}] pool={:?} workers={:?}", e.pool, e.workers);
            }
            EventKind::PoolDrained | EventKind::PoolCancelled => {
                println!("[{label}] pool={:?} jobs={:?}", e.pool, e.jobs);
            }
            EventKind::JobFailed => {
                println!("[{label}] pool={:?} job={:?}", e.pool, e.job);
            }
            EventKind::JobPanicked => {
                println!(
                    "[{label}] pool={:?} job={:?} reason={:?}",
                    e.pool, e.job, e.reason
                );
            }
            EventKind::PoolFallback => {
                println!("[{label}] workers={:?} reason={:?}", e.workers, e.reason);
            }
            EventKind::SubmitRejected => {
                println!("[{label}] pool={:?} reason={:?}", e.pool, e.reason);
            }
            EventKind::CursorStarted => {
                println!("[{label}] cursor={:?}", e.cursor);
            }
            EventKind::CursorExhausted | EventKind::CursorStopped => {
                println!("[{label}] cursor={:?} handed={:?}", e.cursor, e.jobs);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[{label}] info={}",
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
