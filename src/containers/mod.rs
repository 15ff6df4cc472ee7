//! # Containers plugged into the sequence engine.
//!
//! Standard collections take part through [`Iterate`](crate::Iterate) and the
//! blanket [`FromSequence`](crate::FromSequence). This module adds the one
//! shape the standard library cannot express: a priority container whose
//! order comes from a runtime rule, rebuilt through
//! [`FromSequenceWith`](crate::FromSequenceWith).

mod priority;

pub use priority::{Comparator, PriorityQueue};
