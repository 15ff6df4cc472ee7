//! # Result sequences: fallible pipelines that stop at the first error.
//!
//! A [`ResultSeq`] wraps any sequence of `Result<T, E>` envelopes. Payload
//! errors travel through the pipeline as `Err` values and are never raised
//! across the sequence boundary.
//!
//! ## Flow
//! ```text
//! Ok(1) ─► map ─► filter ─► take ─► collect  →  Partial { ok: [..], err: None }
//! Err(e) ─► (passed through, everything stops after it) ─► Partial { err: Some(e) }
//! ```
//!
//! ## Terminals
//! | terminal        | on error                          |
//! |-----------------|-----------------------------------|
//! | `collect`       | successes so far + the error      |
//! | `try_collect`   | `Err(first error)`                |
//! | `first_err`     | `Some(first error)`               |
//! | `try_fold`      | `Err(first error)`                |
//! | `partition`     | every success and every error     |

mod partial;
mod seq;

pub use partial::Partial;
pub use seq::{ResultSeq, SkipOk};

use crate::seq::{iter, Iter, Sequence};

/// Lifts any sequence of envelopes into a [`ResultSeq`].
pub trait TrySequenceExt<T, E>: Sequence<Item = Result<T, E>> + Sized {
    /// Wraps `self` so that it stops after the first `Err`.
    fn try_seq(self) -> ResultSeq<Self> {
        ResultSeq::new(self)
    }
}

impl<S, T, E> TrySequenceExt<T, E> for S where S: Sequence<Item = Result<T, E>> {}

/// Creates a re-runnable result sequence from a clonable collection of envelopes.
pub fn from_results<I, T, E>(items: I) -> ResultSeq<Iter<I>>
where
    I: IntoIterator<Item = Result<T, E>> + Clone,
{
    ResultSeq::new(iter(items))
}
