//! # Sequences: lazy push-style producers and their combinators.
//!
//! A [`Sequence`] is a value-level description of a computation that pushes
//! elements into a caller-supplied sink. The sink returns `true` to ask for
//! more and `false` to stop; a well-behaved producer never calls the sink again
//! after it returned `false`.
//!
//! ## Architecture
//! ```text
//!   source ──► Map ──► Filter ──► Take ──► terminal (collect / fold / find ...)
//!     ▲          │        │         │
//!     └──────────┴────────┴─────────┘  nested sink closures, built per run()
//! ```
//!
//! ## Rules
//! - `run(&self)` re-runs production from the start on every call, except for
//!   one-shot sources ([`drain`], [`from_channel`](crate::from_channel)) that resume.
//! - Stateful adapters (`dedup`, `unique`, `enumerate`, `scan`, ...) create their
//!   state inside `run`; no other component observes it.
//! - `run` returns `true` when the sequence reached its natural end and `false`
//!   when the sink (or a bound cancellation token) stopped it. `chain` relies on
//!   this to skip later segments.
//!
//! ## Example
//! ```rust
//! use lazyseq::{iter, SequenceExt};
//!
//! let evens: Vec<i32> = iter(1..=10).filter(|x| x % 2 == 0).map(|x| x * 10).collect();
//! assert_eq!(evens, vec![20, 40, 60, 80, 100]);
//! ```

mod adapters;
mod collect;
mod ext;
mod source;

use std::sync::Arc;

pub use adapters::*;
pub use collect::{FromSequence, FromSequenceWith};
pub use ext::SequenceExt;
pub(crate) use source::push_all;
pub use source::{
    concat, drain, empty, from_fn, iter, once, repeat, successors, Concat, Drain, Empty, FromFn,
    Iter, Iterate, Once, Repeat, Source, Successors,
};

/// Lazy push-style producer of elements.
///
/// Implementations MUST stop producing as soon as `sink` returns `false` and
/// MUST NOT invoke it again afterward.
pub trait Sequence {
    /// Element type.
    type Item;

    /// Drives `sink` over the produced elements.
    ///
    /// Returns `true` if the sequence reached its end, `false` if it was stopped.
    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool;
}

/// Type-erased sequence.
pub type BoxSeq<'a, T> = Box<dyn Sequence<Item = T> + 'a>;

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        (**self).run(sink)
    }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        (**self).run(sink)
    }
}

impl<S: Sequence + ?Sized> Sequence for Arc<S> {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        (**self).run(sink)
    }
}
