//! Concatenation and cancellation binding.

use tokio_util::sync::CancellationToken;

use crate::seq::Sequence;

/// Runs `first` to completion, then `second`. Created by [`SequenceExt::chain`](crate::SequenceExt::chain).
///
/// An early stop during the first segment prevents the second from running.
#[derive(Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Sequence for Chain<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;

    fn run(&self, sink: &mut dyn FnMut(A::Item) -> bool) -> bool {
        self.first.run(sink) && self.second.run(sink)
    }
}

/// Sequence bound to a cancellation token. Created by [`SequenceExt::with_cancel`](crate::SequenceExt::with_cancel).
///
/// The token is checked before the run starts and at every production point;
/// once it fires no further element is delivered and `run` reports a stop.
#[derive(Clone)]
pub struct WithCancel<S> {
    inner: S,
    token: CancellationToken,
}

impl<S> WithCancel<S> {
    pub(crate) fn new(inner: S, token: CancellationToken) -> Self {
        Self { inner, token }
    }

    /// Returns the bound token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl<S: Sequence> Sequence for WithCancel<S> {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.inner.run(&mut |x| !self.token.is_cancelled() && sink(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{iter, repeat, SequenceExt};
    use std::cell::Cell;

    #[test]
    fn test_chain_order() {
        let out = iter(vec![1, 2]).chain(iter(vec![3])).chain(iter(4..6)).to_vec();
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_chain_early_stop_skips_later_segments() {
        let second_ran = Cell::new(false);
        let second = iter(0..3).inspect(|_| second_ran.set(true));
        let out = iter(vec![9, 9, 9]).chain(second).take(2).to_vec();
        assert_eq!(out, vec![9, 9]);
        assert!(!second_ran.get());
    }

    #[test]
    fn test_cancel_stops_infinite_source() {
        let token = CancellationToken::new();
        let seen = Cell::new(0);
        let out = repeat(1)
            .inspect(|_| {
                seen.set(seen.get() + 1);
                if seen.get() == 4 {
                    token.cancel();
                }
            })
            .with_cancel(token.clone())
            .to_vec();
        assert_eq!(out, vec![1, 1, 1]);
    }

    #[test]
    fn test_cancelled_before_run_yields_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let s = iter(0..5).with_cancel(token);
        assert_eq!(s.count(), 0);
        assert!(s.token().is_cancelled());
    }
}
