//! Sequence sources and the container side of the engine.
//!
//! Containers plug in through [`Iterate`] (drive a callback over their elements
//! in a stable, container-defined order) and are rebuilt through
//! [`FromSequence`](super::FromSequence).

use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, VecDeque};
use std::marker::PhantomData;

use parking_lot::Mutex;

use super::{BoxSeq, Sequence};

/// Pushes every element of `items` into `sink`, honouring early stop.
#[inline]
pub(crate) fn push_all<I: IntoIterator>(items: I, sink: &mut dyn FnMut(I::Item) -> bool) -> bool {
    for x in items {
        if !sink(x) {
            return false;
        }
    }
    true
}

/// Container contract: drive `sink` over the elements in container order.
///
/// Order is container-defined and stable: front-to-back for a deque,
/// pop order for a priority queue, key order for ordered maps.
pub trait Iterate {
    /// Element type handed to the sink.
    type Item;

    /// Drives `sink`; returns `false` if the sink stopped early.
    fn iterate(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool;

    /// Turns the container into a re-runnable [`Sequence`].
    fn into_seq(self) -> Source<Self>
    where
        Self: Sized,
    {
        Source(self)
    }
}

/// Sequence over an owned container. Created by [`Iterate::into_seq`].
#[derive(Clone, Debug)]
pub struct Source<C>(C);

impl<C> Source<C> {
    /// Returns the wrapped container.
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C: Iterate> Sequence for Source<C> {
    type Item = C::Item;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        self.0.iterate(sink)
    }
}

impl<T: Clone> Iterate for Vec<T> {
    type Item = T;

    fn iterate(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        push_all(self.iter().cloned(), sink)
    }
}

impl<T: Clone> Iterate for VecDeque<T> {
    type Item = T;

    fn iterate(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        push_all(self.iter().cloned(), sink)
    }
}

impl<T: Ord + Clone> Iterate for BinaryHeap<T> {
    type Item = T;

    /// Heap pop order (greatest first).
    fn iterate(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        push_all(self.clone().into_sorted_vec().into_iter().rev(), sink)
    }
}

impl<K: Clone, V: Clone> Iterate for BTreeMap<K, V> {
    type Item = (K, V);

    fn iterate(&self, sink: &mut dyn FnMut((K, V)) -> bool) -> bool {
        push_all(self.iter().map(|(k, v)| (k.clone(), v.clone())), sink)
    }
}

impl<T: Clone> Iterate for BTreeSet<T> {
    type Item = T;

    fn iterate(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        push_all(self.iter().cloned(), sink)
    }
}

impl<K: Clone, V: Clone, H> Iterate for HashMap<K, V, H> {
    type Item = (K, V);

    fn iterate(&self, sink: &mut dyn FnMut((K, V)) -> bool) -> bool {
        push_all(self.iter().map(|(k, v)| (k.clone(), v.clone())), sink)
    }
}

impl<T: Clone, H> Iterate for HashSet<T, H> {
    type Item = T;

    fn iterate(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        push_all(self.iter().cloned(), sink)
    }
}

impl Iterate for String {
    type Item = char;

    fn iterate(&self, sink: &mut dyn FnMut(char) -> bool) -> bool {
        push_all(self.chars(), sink)
    }
}

/// Sequence that produces nothing. Created by [`empty`].
pub struct Empty<T>(PhantomData<fn() -> T>);

/// Creates a sequence that produces nothing.
pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Sequence for Empty<T> {
    type Item = T;

    fn run(&self, _sink: &mut dyn FnMut(T) -> bool) -> bool {
        true
    }
}

/// Sequence of exactly one element. Created by [`once`].
#[derive(Clone, Debug)]
pub struct Once<T>(T);

/// Creates a sequence yielding `value` once per run.
pub fn once<T: Clone>(value: T) -> Once<T> {
    Once(value)
}

impl<T: Clone> Sequence for Once<T> {
    type Item = T;

    fn run(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        sink(self.0.clone())
    }
}

/// Infinite repetition of one element. Created by [`repeat`].
#[derive(Clone, Debug)]
pub struct Repeat<T>(T);

/// Creates an infinite sequence of `value`; bound it with `take` or a token.
pub fn repeat<T: Clone>(value: T) -> Repeat<T> {
    Repeat(value)
}

impl<T: Clone> Sequence for Repeat<T> {
    type Item = T;

    fn run(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        loop {
            if !sink(self.0.clone()) {
                return false;
            }
        }
    }
}

/// Sequence over a clonable iterable. Created by [`iter`].
#[derive(Clone, Debug)]
pub struct Iter<I>(I);

/// Creates a re-runnable sequence from anything iterable and clonable
/// (ranges, vectors, slices' iterators, ...).
///
/// ```rust
/// use lazyseq::{iter, SequenceExt};
///
/// let s = iter(vec![3, 1, 2]);
/// assert_eq!(s.count(), 3);
/// assert_eq!(s.to_vec(), vec![3, 1, 2]);
/// ```
pub fn iter<I>(items: I) -> Iter<I>
where
    I: IntoIterator + Clone,
{
    Iter(items)
}

impl<I> Sequence for Iter<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;

    fn run(&self, sink: &mut dyn FnMut(I::Item) -> bool) -> bool {
        push_all(self.0.clone(), sink)
    }
}

/// Sequence backed by a generator closure. Created by [`from_fn`].
pub struct FromFn<F, T> {
    f: F,
    _item: PhantomData<fn() -> T>,
}

/// Creates a sequence from a generator receiving the yield callback.
///
/// The wrapper swallows any call made after the callback returned `false`,
/// so a careless generator cannot violate the stop contract.
///
/// ```rust
/// use lazyseq::{from_fn, SequenceExt};
///
/// let squares = from_fn(|y: &mut dyn FnMut(u32) -> bool| {
///     for i in 1.. {
///         if !y(i * i) {
///             return;
///         }
///     }
/// });
/// assert_eq!(squares.take(4).to_vec(), vec![1, 4, 9, 16]);
/// ```
pub fn from_fn<T, F>(f: F) -> FromFn<F, T>
where
    F: Fn(&mut dyn FnMut(T) -> bool),
{
    FromFn {
        f,
        _item: PhantomData,
    }
}

impl<F, T> Sequence for FromFn<F, T>
where
    F: Fn(&mut dyn FnMut(T) -> bool),
{
    type Item = T;

    fn run(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        let mut open = true;
        (self.f)(&mut |x| {
            if !open {
                return false;
            }
            open = sink(x);
            open
        });
        open
    }
}

/// Sequence of successive values. Created by [`successors`].
#[derive(Clone)]
pub struct Successors<T, F> {
    first: Option<T>,
    f: F,
}

/// Creates a sequence starting at `first` where each next value is computed
/// from the previous one until `f` returns `None`.
pub fn successors<T, F>(first: Option<T>, f: F) -> Successors<T, F>
where
    T: Clone,
    F: Fn(&T) -> Option<T>,
{
    Successors { first, f }
}

impl<T, F> Sequence for Successors<T, F>
where
    T: Clone,
    F: Fn(&T) -> Option<T>,
{
    type Item = T;

    fn run(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        let mut cur = self.first.clone();
        while let Some(x) = cur {
            let next = (self.f)(&x);
            if !sink(x) {
                return false;
            }
            cur = next;
        }
        true
    }
}

/// One-shot sequence over an iterator. Created by [`drain`].
///
/// A run that is stopped early keeps the remainder; the next run resumes
/// where the previous one stopped. Once exhausted every run is empty.
pub struct Drain<I>(Mutex<Option<I>>);

/// Creates a one-shot sequence over `items`.
///
/// ```rust
/// use lazyseq::{drain, SequenceExt};
///
/// let d = drain(vec![1, 2, 3, 4].into_iter());
/// assert_eq!(d.first(), Some(1));
/// assert_eq!(d.to_vec(), vec![2, 3, 4]);
/// assert_eq!(d.count(), 0);
/// ```
pub fn drain<I: IntoIterator>(items: I) -> Drain<I::IntoIter> {
    Drain(Mutex::new(Some(items.into_iter())))
}

impl<I: Iterator> Sequence for Drain<I> {
    type Item = I::Item;

    fn run(&self, sink: &mut dyn FnMut(I::Item) -> bool) -> bool {
        let taken = self.0.lock().take();
        let Some(mut it) = taken else {
            return true;
        };
        while let Some(x) = it.next() {
            if !sink(x) {
                *self.0.lock() = Some(it);
                return false;
            }
        }
        true
    }
}

/// Concatenation of several sequences. Created by [`concat`].
pub struct Concat<'a, T>(Vec<BoxSeq<'a, T>>);

/// Runs each sequence in argument order; an early stop skips the rest.
pub fn concat<'a, T>(parts: Vec<BoxSeq<'a, T>>) -> Concat<'a, T> {
    Concat(parts)
}

impl<'a, T> Sequence for Concat<'a, T> {
    type Item = T;

    fn run(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        for part in &self.0 {
            if !part.run(sink) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceExt;

    #[test]
    fn test_deque_iterates_front_to_back() {
        let mut d = VecDeque::new();
        d.push_back(2);
        d.push_front(1);
        d.push_back(3);
        assert_eq!(d.into_seq().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_heap_iterates_in_pop_order() {
        let heap: BinaryHeap<i32> = vec![3, 9, 1, 5].into_iter().collect();
        assert_eq!(heap.into_seq().to_vec(), vec![9, 5, 3, 1]);
    }

    #[test]
    fn test_btreemap_iterates_in_key_order() {
        let m: BTreeMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(m.into_seq().to_vec(), vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_from_fn_ignores_calls_after_stop() {
        let calls = std::cell::Cell::new(0);
        let s = from_fn(|y: &mut dyn FnMut(i32) -> bool| {
            // Deliberately ignores the stop signal.
            for i in 0..10 {
                calls.set(calls.get() + 1);
                y(i);
            }
        });
        assert_eq!(s.take(2).to_vec(), vec![0, 1]);
        assert_eq!(calls.get(), 10);
    }

    #[test]
    fn test_successors_stops_on_none() {
        let s = successors(Some(1u32), |x| if *x < 100 { Some(x * 3) } else { None });
        assert_eq!(s.to_vec(), vec![1, 3, 9, 27, 81, 243]);
    }

    #[test]
    fn test_concat_runs_in_order_and_stops_early() {
        let parts: Vec<BoxSeq<'_, i32>> = vec![
            Box::new(iter(vec![1, 2])),
            Box::new(empty()),
            Box::new(iter(3..5)),
        ];
        let all = concat(parts);
        assert_eq!(all.to_vec(), vec![1, 2, 3, 4]);
        assert_eq!(all.take(3).to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sources_are_rerunnable() {
        let s = iter(1..4);
        assert_eq!(s.to_vec(), s.to_vec());
        assert_eq!(once(7).to_vec(), vec![7]);
        assert_eq!(repeat('x').take(3).collect::<String>(), "xxx");
        assert_eq!("héllo".to_string().into_seq().count(), 5);
    }
}
