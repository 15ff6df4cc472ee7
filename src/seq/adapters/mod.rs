//! Sequence combinators.
//!
//! Every adapter wraps one parent sequence (two for `chain`) and is itself a
//! [`Sequence`](crate::Sequence). Composition is by value; nothing is
//! materialized unless the adapter says so (`rev`, `combinations`,
//! `permutations`, `cycle`).

mod basic;
mod chain;
mod combinatorics;
mod counting;
mod dedup;
mod stateful;

pub use basic::{Exclude, Filter, FilterMap, FlatMap, Inspect, Map};
pub use chain::{Chain, WithCancel};
pub use combinatorics::{Combinations, Cycle, Permutations};
pub use counting::{Skip, SkipWhile, StepBy, Take, TakeWhile};
pub use dedup::{Dedup, DedupByKey, Unique, UniqueByKey};
pub use stateful::{Chunk, Enumerate, GroupBy, Intersperse, Rev, Scan, Window};
