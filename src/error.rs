//! Error types raised by the execution runtime.
//!
//! This module defines [`RuntimeError`]: failures of the machinery that runs
//! sequences on background threads (the worker pool, the parallel executor and
//! the pull cursor). Payload errors carried by a [`ResultSeq`](crate::ResultSeq)
//! never use this type; they travel through the sequence as `Err` envelopes.
//!
//! Like every error in the crate it provides `as_label`/`as_message` helpers
//! for logs and events.

use std::io;

use thiserror::Error;

/// # Errors produced by the lazyseq runtime.
///
/// These represent failures of the background execution resources themselves,
/// such as an OS refusing to spawn a worker thread or a submission racing with
/// cancellation.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Submission was abandoned because the pool's cancellation token fired.
    #[error("submission cancelled")]
    Cancelled,

    /// The pool no longer accepts jobs (its queue or semaphore was closed).
    #[error("worker pool closed")]
    Closed,

    /// A background thread could not be spawned.
    #[error("failed to spawn {role} thread: {source}")]
    Spawn {
        /// Which thread failed ("driver", "worker", "cursor", "stream").
        role: &'static str,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use lazyseq::RuntimeError;
    ///
    /// assert_eq!(RuntimeError::Cancelled.as_label(), "runtime_cancelled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Cancelled => "runtime_cancelled",
            RuntimeError::Closed => "runtime_closed",
            RuntimeError::Spawn { .. } => "runtime_spawn_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Cancelled => "submission cancelled".to_string(),
            RuntimeError::Closed => "pool closed".to_string(),
            RuntimeError::Spawn { role, source } => format!("spawn {role}: {source}"),
        }
    }

    /// True when the error only reflects cooperative shutdown, not a fault.
    ///
    /// # Example
    /// ```
    /// use lazyseq::RuntimeError;
    ///
    /// assert!(RuntimeError::Cancelled.is_shutdown());
    /// assert!(RuntimeError::Closed.is_shutdown());
    /// ```
    pub fn is_shutdown(&self) -> bool {
        matches!(self, RuntimeError::Cancelled | RuntimeError::Closed)
    }

    pub(crate) fn spawn(role: &'static str, source: io::Error) -> Self {
        RuntimeError::Spawn { role, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let spawn = RuntimeError::spawn("worker", io::Error::new(io::ErrorKind::Other, "nope"));
        assert_eq!(spawn.as_label(), "runtime_spawn_failed");
        assert_eq!(spawn.as_message(), "spawn worker: nope");
        assert!(!spawn.is_shutdown());
        assert_eq!(RuntimeError::Closed.as_label(), "runtime_closed");
    }

    #[test]
    fn test_display_includes_source() {
        let spawn = RuntimeError::spawn("cursor", io::Error::new(io::ErrorKind::Other, "limit"));
        assert_eq!(spawn.to_string(), "failed to spawn cursor thread: limit");
    }
}
