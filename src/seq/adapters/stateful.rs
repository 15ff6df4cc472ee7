//! Stateful single-pass adapters.
//!
//! Each adapter creates its private state inside `run`, so re-running the
//! sequence starts from scratch and no other stage can observe the state.

use std::collections::VecDeque;
use std::mem;

use crate::seq::Sequence;

/// Pairs every element with its index. Created by [`SequenceExt::enumerate`](crate::SequenceExt::enumerate).
#[derive(Clone)]
pub struct Enumerate<S> {
    inner: S,
}

impl<S> Enumerate<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Sequence> Sequence for Enumerate<S> {
    type Item = (usize, S::Item);

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        let mut idx = 0usize;
        self.inner.run(&mut |x| {
            let i = idx;
            idx += 1;
            sink((i, x))
        })
    }
}

/// Running left fold yielding every accumulator, starting with the initial one.
/// Created by [`SequenceExt::scan`](crate::SequenceExt::scan).
#[derive(Clone)]
pub struct Scan<S, A, F> {
    inner: S,
    init: A,
    f: F,
}

impl<S, A, F> Scan<S, A, F> {
    pub(crate) fn new(inner: S, init: A, f: F) -> Self {
        Self { inner, init, f }
    }
}

impl<S, A, F> Sequence for Scan<S, A, F>
where
    S: Sequence,
    A: Clone,
    F: Fn(&A, S::Item) -> A,
{
    type Item = A;

    fn run(&self, sink: &mut dyn FnMut(A) -> bool) -> bool {
        let mut acc = self.init.clone();
        if !sink(acc.clone()) {
            return false;
        }
        self.inner.run(&mut |x| {
            acc = (self.f)(&acc, x);
            sink(acc.clone())
        })
    }
}

/// Non-overlapping groups of `size` elements; the last one may be shorter.
/// Created by [`SequenceExt::chunk`](crate::SequenceExt::chunk).
#[derive(Clone)]
pub struct Chunk<S> {
    inner: S,
    size: usize,
}

impl<S> Chunk<S> {
    pub(crate) fn new(inner: S, size: usize) -> Self {
        Self { inner, size }
    }
}

impl<S: Sequence> Sequence for Chunk<S> {
    type Item = Vec<S::Item>;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        if self.size == 0 {
            return true;
        }
        let mut buf = Vec::with_capacity(self.size);
        let completed = self.inner.run(&mut |x| {
            buf.push(x);
            if buf.len() == self.size {
                let full = mem::replace(&mut buf, Vec::with_capacity(self.size));
                return sink(full);
            }
            true
        });
        if !completed {
            return false;
        }
        buf.is_empty() || sink(buf)
    }
}

/// Overlapping windows of `size` consecutive elements.
/// Created by [`SequenceExt::window`](crate::SequenceExt::window).
#[derive(Clone)]
pub struct Window<S> {
    inner: S,
    size: usize,
}

impl<S> Window<S> {
    pub(crate) fn new(inner: S, size: usize) -> Self {
        Self { inner, size }
    }
}

impl<S> Sequence for Window<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        if self.size == 0 {
            return true;
        }
        let mut buf = VecDeque::with_capacity(self.size);
        self.inner.run(&mut |x| {
            if buf.len() == self.size {
                buf.pop_front();
            }
            buf.push_back(x);
            if buf.len() == self.size {
                sink(buf.iter().cloned().collect())
            } else {
                true
            }
        })
    }
}

/// Places a separator between consecutive elements.
/// Created by [`SequenceExt::intersperse`](crate::SequenceExt::intersperse).
#[derive(Clone)]
pub struct Intersperse<S, T> {
    inner: S,
    sep: T,
}

impl<S, T> Intersperse<S, T> {
    pub(crate) fn new(inner: S, sep: T) -> Self {
        Self { inner, sep }
    }
}

impl<S, T> Sequence for Intersperse<S, T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Item = T;

    fn run(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        let mut first = true;
        self.inner.run(&mut |x| {
            if !first && !sink(self.sep.clone()) {
                return false;
            }
            first = false;
            sink(x)
        })
    }
}

/// Maximal runs where every consecutive pair satisfies a predicate.
/// Created by [`SequenceExt::group_by`](crate::SequenceExt::group_by).
#[derive(Clone)]
pub struct GroupBy<S, P> {
    inner: S,
    same_group: P,
}

impl<S, P> GroupBy<S, P> {
    pub(crate) fn new(inner: S, same_group: P) -> Self {
        Self { inner, same_group }
    }
}

impl<S, P> Sequence for GroupBy<S, P>
where
    S: Sequence,
    P: Fn(&S::Item, &S::Item) -> bool,
{
    type Item = Vec<S::Item>;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        let mut group: Vec<S::Item> = Vec::new();
        let completed = self.inner.run(&mut |x| {
            let split = match group.last() {
                Some(prev) => !(self.same_group)(prev, &x),
                None => false,
            };
            if split {
                let done = mem::replace(&mut group, vec![x]);
                return sink(done);
            }
            group.push(x);
            true
        });
        if !completed {
            return false;
        }
        group.is_empty() || sink(group)
    }
}

/// Materializes the source and replays it backwards.
/// Created by [`SequenceExt::rev`](crate::SequenceExt::rev).
#[derive(Clone)]
pub struct Rev<S> {
    inner: S,
}

impl<S> Rev<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: Sequence> Sequence for Rev<S> {
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut buf = Vec::new();
        if !self.inner.run(&mut |x| {
            buf.push(x);
            true
        }) {
            return false;
        }
        while let Some(x) = buf.pop() {
            if !sink(x) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::{empty, iter, SequenceExt};

    #[test]
    fn test_enumerate_counts_from_zero() {
        let out = iter(vec!['a', 'b']).enumerate().to_vec();
        assert_eq!(out, vec![(0, 'a'), (1, 'b')]);
    }

    #[test]
    fn test_scan_includes_initial_value() {
        let out = iter(1..=4).scan(0, |acc, x| acc + x).to_vec();
        assert_eq!(out, vec![0, 1, 3, 6, 10]);
        assert_eq!(empty::<i32>().scan(7, |a, x| a + x).to_vec(), vec![7]);
    }

    #[test]
    fn test_chunk_keeps_short_tail() {
        let out = iter(1..=7).chunk(3).to_vec();
        assert_eq!(out, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
        assert!(iter(1..=7).chunk(0).to_vec().is_empty());
    }

    #[test]
    fn test_chunk_early_stop_drops_tail() {
        let out = iter(1..=7).chunk(3).take(1).to_vec();
        assert_eq!(out, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_window_slides() {
        let out = iter(1..=4).window(2).to_vec();
        assert_eq!(out, vec![vec![1, 2], vec![2, 3], vec![3, 4]]);
        assert!(iter(1..=2).window(3).to_vec().is_empty());
    }

    #[test]
    fn test_intersperse() {
        let joined: String = iter(vec!['a', 'b', 'c']).intersperse('-').collect();
        assert_eq!(joined, "a-b-c");
        assert!(empty::<char>().intersperse(',').to_vec().is_empty());
    }

    #[test]
    fn test_group_by_adjacent_predicate() {
        let out = iter(vec![1, 2, 3, 7, 8, 12]).group_by(|a, b| b - a == 1).to_vec();
        assert_eq!(out, vec![vec![1, 2, 3], vec![7, 8], vec![12]]);
        assert!(empty::<i32>().group_by(|_, _| true).to_vec().is_empty());
    }

    #[test]
    fn test_rev() {
        assert_eq!(iter(1..4).rev().to_vec(), vec![3, 2, 1]);
    }
}
