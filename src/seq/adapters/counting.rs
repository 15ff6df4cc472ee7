//! Counting and prefix adapters.
//!
//! Reaching a count (or the end of a prefix) is a natural end of the adapted
//! sequence, so `run` returns `true` in that case; only a stop coming from the
//! downstream sink reports `false`.

use crate::seq::Sequence;

/// First `n` elements. Created by [`SequenceExt::take`](crate::SequenceExt::take).
#[derive(Clone)]
pub struct Take<S> {
    inner: S,
    n: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(inner: S, n: usize) -> Self {
        Self { inner, n }
    }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        if self.n == 0 {
            return true;
        }
        let mut left = self.n;
        let mut open = true;
        self.inner.run(&mut |x| {
            left -= 1;
            open = sink(x);
            open && left > 0
        });
        open
    }
}

/// All but the first `n` elements. Created by [`SequenceExt::skip`](crate::SequenceExt::skip).
#[derive(Clone)]
pub struct Skip<S> {
    inner: S,
    n: usize,
}

impl<S> Skip<S> {
    pub(crate) fn new(inner: S, n: usize) -> Self {
        Self { inner, n }
    }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut skipped = 0;
        self.inner.run(&mut |x| {
            if skipped < self.n {
                skipped += 1;
                return true;
            }
            sink(x)
        })
    }
}

/// Elements at indices `0, n, 2n, ...`. Created by [`SequenceExt::step_by`](crate::SequenceExt::step_by).
#[derive(Clone)]
pub struct StepBy<S> {
    inner: S,
    step: usize,
}

impl<S> StepBy<S> {
    pub(crate) fn new(inner: S, step: usize) -> Self {
        Self { inner, step }
    }
}

impl<S: Sequence> Sequence for StepBy<S> {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        if self.step == 0 {
            return true;
        }
        let mut idx = 0usize;
        self.inner.run(&mut |x| {
            let hit = idx % self.step == 0;
            idx = idx.wrapping_add(1);
            if hit {
                sink(x)
            } else {
                true
            }
        })
    }
}

/// Longest prefix matching a predicate. Created by [`SequenceExt::take_while`](crate::SequenceExt::take_while).
#[derive(Clone)]
pub struct TakeWhile<S, P> {
    inner: S,
    pred: P,
}

impl<S, P> TakeWhile<S, P> {
    pub(crate) fn new(inner: S, pred: P) -> Self {
        Self { inner, pred }
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut open = true;
        self.inner.run(&mut |x| {
            if !(self.pred)(&x) {
                return false;
            }
            open = sink(x);
            open
        });
        open
    }
}

/// Everything after the longest prefix matching a predicate.
/// Created by [`SequenceExt::skip_while`](crate::SequenceExt::skip_while).
#[derive(Clone)]
pub struct SkipWhile<S, P> {
    inner: S,
    pred: P,
}

impl<S, P> SkipWhile<S, P> {
    pub(crate) fn new(inner: S, pred: P) -> Self {
        Self { inner, pred }
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut skipping = true;
        self.inner.run(&mut |x| {
            if skipping && (self.pred)(&x) {
                return true;
            }
            skipping = false;
            sink(x)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{from_fn, iter, repeat, SequenceExt};
    use std::cell::Cell;

    #[test]
    fn test_take_zero_never_touches_parent() {
        let touched = Cell::new(false);
        let s = from_fn(|y: &mut dyn FnMut(i32) -> bool| {
            touched.set(true);
            y(1);
        });
        assert!(s.take(0).to_vec().is_empty());
        assert!(!touched.get());
        assert_eq!(repeat(1).take(0).count(), 0);
    }

    #[test]
    fn test_take_stops_infinite_source() {
        assert_eq!(repeat(5).take(3).to_vec(), vec![5, 5, 5]);
    }

    #[test]
    fn test_take_does_not_pull_extra_elements() {
        let pulled = Cell::new(0);
        let n = iter(0..100).inspect(|_| pulled.set(pulled.get() + 1)).take(3).count();
        assert_eq!(n, 3);
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn test_skip_past_end_is_empty() {
        assert_eq!(iter(0..5).skip(2).to_vec(), vec![2, 3, 4]);
        assert!(iter(0..5).skip(9).to_vec().is_empty());
    }

    #[test]
    fn test_step_by() {
        assert_eq!(iter(0..10).step_by(3).to_vec(), vec![0, 3, 6, 9]);
        assert_eq!(iter(0..3).step_by(1).to_vec(), vec![0, 1, 2]);
        assert!(iter(0..3).step_by(0).to_vec().is_empty());
    }

    #[test]
    fn test_take_while_and_skip_while() {
        let s = iter(vec![1, 2, 5, 1, 7]);
        assert_eq!(s.clone().take_while(|x| *x < 3).to_vec(), vec![1, 2]);
        assert_eq!(s.skip_while(|x| *x < 3).to_vec(), vec![5, 1, 7]);
    }

    #[test]
    fn test_take_inside_chain_lets_next_segment_run() {
        let out = iter(0..10).take(2).chain(iter(20..22)).to_vec();
        assert_eq!(out, vec![0, 1, 20, 21]);
    }
}
