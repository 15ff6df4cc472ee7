//! Rebuild side of the container contract.
//!
//! [`FromSequence`] is blanket-implemented for every `Default + Extend<T>`
//! container, which covers the standard collections. Containers whose shape
//! depends on an ordering rule (priority queues) implement
//! [`FromSequenceWith`] as well.

use super::Sequence;

/// Rebuilds a container from a finished sequence.
pub trait FromSequence<T>: Sized {
    /// Consumes every element of `seq` into a new container.
    fn from_sequence<S: Sequence<Item = T>>(seq: S) -> Self;
}

impl<T, C> FromSequence<T> for C
where
    C: Default + Extend<T>,
{
    fn from_sequence<S: Sequence<Item = T>>(seq: S) -> Self {
        let mut out = C::default();
        seq.run(&mut |x| {
            out.extend(std::iter::once(x));
            true
        });
        out
    }
}

/// Rebuilds a container from a finished sequence under an explicit rule
/// (for example a priority comparator).
pub trait FromSequenceWith<T, R>: Sized {
    /// Consumes every element of `seq` into a new container shaped by `rule`.
    fn from_sequence_with<S: Sequence<Item = T>>(seq: S, rule: R) -> Self;
}
