//! Per-element, stateless adapters. All preserve order and forward early stop.

use crate::seq::Sequence;

/// Transforms every element. Created by [`SequenceExt::map`](crate::SequenceExt::map).
#[derive(Clone)]
pub struct Map<S, F> {
    inner: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F, U> Sequence for Map<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;

    fn run(&self, sink: &mut dyn FnMut(U) -> bool) -> bool {
        self.inner.run(&mut |x| sink((self.f)(x)))
    }
}

/// Keeps elements matching a predicate. Created by [`SequenceExt::filter`](crate::SequenceExt::filter).
#[derive(Clone)]
pub struct Filter<S, P> {
    inner: S,
    pred: P,
}

impl<S, P> Filter<S, P> {
    pub(crate) fn new(inner: S, pred: P) -> Self {
        Self { inner, pred }
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        self.inner.run(&mut |x| if (self.pred)(&x) { sink(x) } else { true })
    }
}

/// Drops elements matching a predicate. Created by [`SequenceExt::exclude`](crate::SequenceExt::exclude).
#[derive(Clone)]
pub struct Exclude<S, P> {
    inner: S,
    pred: P,
}

impl<S, P> Exclude<S, P> {
    pub(crate) fn new(inner: S, pred: P) -> Self {
        Self { inner, pred }
    }
}

impl<S, P> Sequence for Exclude<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        self.inner.run(&mut |x| if (self.pred)(&x) { true } else { sink(x) })
    }
}

/// Maps and filters in one step. Created by [`SequenceExt::filter_map`](crate::SequenceExt::filter_map).
#[derive(Clone)]
pub struct FilterMap<S, F> {
    inner: S,
    f: F,
}

impl<S, F> FilterMap<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F, U> Sequence for FilterMap<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> Option<U>,
{
    type Item = U;

    fn run(&self, sink: &mut dyn FnMut(U) -> bool) -> bool {
        self.inner.run(&mut |x| match (self.f)(x) {
            Some(y) => sink(y),
            None => true,
        })
    }
}

/// Expands every element into a sub-sequence. Created by [`SequenceExt::flat_map`](crate::SequenceExt::flat_map).
#[derive(Clone)]
pub struct FlatMap<S, F> {
    inner: S,
    f: F,
}

impl<S, F> FlatMap<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F, U> Sequence for FlatMap<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
    U: Sequence,
{
    type Item = U::Item;

    fn run(&self, sink: &mut dyn FnMut(U::Item) -> bool) -> bool {
        self.inner.run(&mut |x| (self.f)(x).run(&mut *sink))
    }
}

/// Observes every element without changing it. Created by [`SequenceExt::inspect`](crate::SequenceExt::inspect).
#[derive(Clone)]
pub struct Inspect<S, F> {
    inner: S,
    f: F,
}

impl<S, F> Inspect<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Self { inner, f }
    }
}

impl<S, F> Sequence for Inspect<S, F>
where
    S: Sequence,
    F: Fn(&S::Item),
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        self.inner.run(&mut |x| {
            (self.f)(&x);
            sink(x)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{iter, SequenceExt};
    use std::cell::Cell;

    #[test]
    fn test_map_filter_preserve_order() {
        let out = iter(1..=6).map(|x| x * 2).filter(|x| x % 3 != 0).to_vec();
        assert_eq!(out, vec![2, 4, 8, 10]);
    }

    #[test]
    fn test_exclude_is_negated_filter() {
        let s = iter(1..=6);
        let kept = s.clone().filter(|x| x % 2 == 0).to_vec();
        let dropped = s.exclude(|x| x % 2 == 0).to_vec();
        assert_eq!(kept, vec![2, 4, 6]);
        assert_eq!(dropped, vec![1, 3, 5]);
    }

    #[test]
    fn test_filter_map_parses() {
        let out = iter(vec!["1", "x", "3"]).filter_map(|s| s.parse::<i32>().ok()).to_vec();
        assert_eq!(out, vec![1, 3]);
    }

    #[test]
    fn test_flat_map_forwards_stop_into_inner() {
        let produced = Cell::new(0);
        let out = iter(0..3)
            .flat_map(|x| iter(0..3).map(move |y| x * 10 + y))
            .inspect(|_| produced.set(produced.get() + 1))
            .take(4)
            .to_vec();
        assert_eq!(out, vec![0, 1, 2, 10]);
        assert_eq!(produced.get(), 4);
    }

    #[test]
    fn test_inspect_sees_each_element_once() {
        let seen = Cell::new(0);
        let n = iter(0..5).inspect(|_| seen.set(seen.get() + 1)).count();
        assert_eq!(n, 5);
        assert_eq!(seen.get(), 5);
    }
}
