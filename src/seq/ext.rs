//! # SequenceExt: the combinator and terminal vocabulary.
//!
//! Blanket-implemented for every [`Sequence`]. Combinators consume `self` and
//! return a new sequence; terminals borrow `&self` and run the pipeline once.
//!
//! ## Rules
//! - Terminals that can answer early (`find`, `any`, `all`, `nth`, `first`)
//!   stop the producer as soon as they know the answer.
//! - `partition`/`partition_with` route each element to exactly one side in a
//!   single pass.
//! - Zero-size arguments (`take(0)`, `step_by(0)`, `chunk(0)`, ...) yield an
//!   empty sequence instead of failing.

use std::cmp::Ordering;

use tokio_util::sync::CancellationToken;

use super::adapters::*;
use super::source::drain;
use super::{BoxSeq, FromSequence, FromSequenceWith, Sequence};
use crate::config::ParallelConfig;
use crate::cursor::Cursor;
use crate::error::RuntimeError;
use crate::interop::SeqStream;
use crate::par::Par;

/// Combinators and terminal collectors for every [`Sequence`].
pub trait SequenceExt: Sequence {
    // ---- per-element ----

    /// Transforms every element.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        Map::new(self, f)
    }

    /// Keeps elements for which `pred` is true.
    fn filter<P>(self, pred: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Filter::new(self, pred)
    }

    /// Drops elements for which `pred` is true.
    fn exclude<P>(self, pred: P) -> Exclude<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Exclude::new(self, pred)
    }

    /// Transforms and filters in one step.
    fn filter_map<U, F>(self, f: F) -> FilterMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> Option<U>,
    {
        FilterMap::new(self, f)
    }

    /// Replaces every element with the elements of a sub-sequence.
    fn flat_map<U, F>(self, f: F) -> FlatMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
        U: Sequence,
    {
        FlatMap::new(self, f)
    }

    /// Calls `f` on every element as it passes.
    fn inspect<F>(self, f: F) -> Inspect<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item),
    {
        Inspect::new(self, f)
    }

    // ---- counting ----

    /// Yields at most `n` elements.
    fn take(self, n: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, n)
    }

    /// Drops the first `n` elements.
    fn skip(self, n: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        Skip::new(self, n)
    }

    /// Yields the elements at indices `0, step, 2*step, ...`.
    fn step_by(self, step: usize) -> StepBy<Self>
    where
        Self: Sized,
    {
        StepBy::new(self, step)
    }

    /// Yields elements while `pred` holds, then stops the producer.
    fn take_while<P>(self, pred: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        TakeWhile::new(self, pred)
    }

    /// Drops elements while `pred` holds, then yields the rest.
    fn skip_while<P>(self, pred: P) -> SkipWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        SkipWhile::new(self, pred)
    }

    // ---- composition ----

    /// Runs `self`, then `other`.
    fn chain<B>(self, other: B) -> Chain<Self, B>
    where
        Self: Sized,
        B: Sequence<Item = Self::Item>,
    {
        Chain::new(self, other)
    }

    /// Binds a cancellation token; no element is delivered once it fires.
    fn with_cancel(self, token: CancellationToken) -> WithCancel<Self>
    where
        Self: Sized,
    {
        WithCancel::new(self, token)
    }

    /// Erases the concrete type.
    fn boxed<'a>(self) -> BoxSeq<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    // ---- stateful ----

    /// Suppresses an element equal to the one just before it.
    fn dedup(self) -> Dedup<Self>
    where
        Self: Sized,
        Self::Item: PartialEq + Clone,
    {
        Dedup::new(self)
    }

    /// Suppresses an element whose key equals the previous element's key.
    fn dedup_by_key<K, F>(self, key: F) -> DedupByKey<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: PartialEq,
    {
        DedupByKey::new(self, key)
    }

    /// Suppresses every element seen before (first-seen order).
    fn unique(self) -> Unique<Self>
    where
        Self: Sized,
        Self::Item: Eq + std::hash::Hash + Clone,
    {
        Unique::new(self)
    }

    /// Suppresses every element whose key was seen before.
    fn unique_by_key<K, F>(self, key: F) -> UniqueByKey<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item) -> K,
        K: Eq + std::hash::Hash,
    {
        UniqueByKey::new(self, key)
    }

    /// Pairs every element with its zero-based index.
    fn enumerate(self) -> Enumerate<Self>
    where
        Self: Sized,
    {
        Enumerate::new(self)
    }

    /// Yields `init` and then every intermediate accumulator.
    fn scan<A, F>(self, init: A, f: F) -> Scan<Self, A, F>
    where
        Self: Sized,
        A: Clone,
        F: Fn(&A, Self::Item) -> A,
    {
        Scan::new(self, init, f)
    }

    /// Non-overlapping groups of `size`; the last group may be shorter.
    fn chunk(self, size: usize) -> Chunk<Self>
    where
        Self: Sized,
    {
        Chunk::new(self, size)
    }

    /// Overlapping windows of `size` consecutive elements.
    fn window(self, size: usize) -> Window<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Window::new(self, size)
    }

    /// Places `sep` between consecutive elements.
    fn intersperse(self, sep: Self::Item) -> Intersperse<Self, Self::Item>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Intersperse::new(self, sep)
    }

    /// Splits into maximal runs whose consecutive pairs satisfy `same_group`.
    fn group_by<P>(self, same_group: P) -> GroupBy<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item, &Self::Item) -> bool,
    {
        GroupBy::new(self, same_group)
    }

    /// All `k`-subsets in lexicographic index order (materializes the source).
    fn combinations(self, k: usize) -> Combinations<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Combinations::new(self, k)
    }

    /// All orderings in lexicographic index order (materializes the source).
    fn permutations(self) -> Permutations<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Permutations::new(self)
    }

    /// Repeats the source forever; bound it with `take` or `with_cancel`.
    fn cycle(self) -> Cycle<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Cycle::new(self)
    }

    /// Replays the source backwards (materializes the source).
    fn rev(self) -> Rev<Self>
    where
        Self: Sized,
    {
        Rev::new(self)
    }

    // ---- parallel ----

    /// Switches everything chained after this point into bounded-parallel mode
    /// with `workers` workers and default settings elsewhere.
    ///
    /// ```rust
    /// use lazyseq::{iter, SequenceExt};
    ///
    /// let mut out: Vec<u64> = iter(1..=8u64).parallel(4).map(|x: u64| x * x).to_vec();
    /// out.sort_unstable();
    /// assert_eq!(out, vec![1, 4, 9, 16, 25, 36, 49, 64]);
    /// ```
    fn parallel(self, workers: usize) -> Par<Self, Self::Item>
    where
        Self: Sized + Send + Sync + 'static,
        Self::Item: Send + 'static,
    {
        Par::new(self, ParallelConfig::new(workers))
    }

    /// Like [`parallel`](SequenceExt::parallel) with an explicit configuration.
    fn par_with(self, config: ParallelConfig) -> Par<Self, Self::Item>
    where
        Self: Sized + Send + Sync + 'static,
        Self::Item: Send + 'static,
    {
        Par::new(self, config)
    }

    // ---- terminals ----

    /// Rebuilds a container from every element.
    fn collect<C>(&self) -> C
    where
        C: FromSequence<Self::Item>,
    {
        C::from_sequence(self)
    }

    /// Rebuilds a container using an ordering rule (priority containers).
    fn collect_with<C, R>(&self, rule: R) -> C
    where
        C: FromSequenceWith<Self::Item, R>,
    {
        C::from_sequence_with(self, rule)
    }

    /// Collects every element into a `Vec`.
    fn to_vec(&self) -> Vec<Self::Item> {
        let mut out = Vec::new();
        self.run(&mut |x| {
            out.push(x);
            true
        });
        out
    }

    /// Calls `f` on every element.
    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Self::Item),
    {
        self.run(&mut |x| {
            f(x);
            true
        });
    }

    /// Combines elements left to right; `None` for an empty sequence.
    ///
    /// On a parallel sequence elements arrive in completion order, so `f`
    /// must be associative and commutative for a deterministic answer.
    fn reduce<F>(&self, mut f: F) -> Option<Self::Item>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        let mut acc: Option<Self::Item> = None;
        self.run(&mut |x| {
            acc = Some(match acc.take() {
                Some(a) => f(a, x),
                None => x,
            });
            true
        });
        acc
    }

    /// Folds every element into `init`; always returns a value.
    ///
    /// The same ordering caveat as [`reduce`](SequenceExt::reduce) applies to
    /// parallel sequences.
    fn fold<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, Self::Item) -> A,
    {
        let mut acc = Some(init);
        self.run(&mut |x| {
            acc = acc.take().map(|a| f(a, x));
            true
        });
        match acc {
            Some(a) => a,
            None => unreachable!("accumulator is restored after every step"),
        }
    }

    /// Number of elements.
    fn count(&self) -> usize {
        let mut n = 0usize;
        self.run(&mut |_| {
            n += 1;
            true
        });
        n
    }

    /// True if `pred` holds for every element (true for an empty sequence).
    fn all<P>(&self, mut pred: P) -> bool
    where
        P: FnMut(Self::Item) -> bool,
    {
        let mut ok = true;
        self.run(&mut |x| {
            ok = pred(x);
            ok
        });
        ok
    }

    /// True if `pred` holds for some element (false for an empty sequence).
    fn any<P>(&self, mut pred: P) -> bool
    where
        P: FnMut(Self::Item) -> bool,
    {
        let mut hit = false;
        self.run(&mut |x| {
            hit = pred(x);
            !hit
        });
        hit
    }

    /// First element satisfying `pred` (any matching element when parallel).
    fn find<P>(&self, mut pred: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        let mut found = None;
        self.run(&mut |x| {
            if pred(&x) {
                found = Some(x);
                return false;
            }
            true
        });
        found
    }

    /// Element at index `k`; `None` when out of range.
    fn nth(&self, k: usize) -> Option<Self::Item> {
        let mut idx = 0usize;
        let mut found = None;
        self.run(&mut |x| {
            if idx == k {
                found = Some(x);
                return false;
            }
            idx += 1;
            true
        });
        found
    }

    /// First element.
    fn first(&self) -> Option<Self::Item> {
        self.nth(0)
    }

    /// Last element (runs the sequence to the end).
    fn last(&self) -> Option<Self::Item> {
        let mut last = None;
        self.run(&mut |x| {
            last = Some(x);
            true
        });
        last
    }

    /// Smallest element; the first one wins on ties.
    fn min(&self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.min_by(Ord::cmp)
    }

    /// Largest element; the last one wins on ties.
    fn max(&self) -> Option<Self::Item>
    where
        Self::Item: Ord,
    {
        self.max_by(Ord::cmp)
    }

    /// Smallest element under `cmp`.
    fn min_by<F>(&self, mut cmp: F) -> Option<Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.reduce(|a, b| if cmp(&b, &a) == Ordering::Less { b } else { a })
    }

    /// Largest element under `cmp`.
    fn max_by<F>(&self, mut cmp: F) -> Option<Self::Item>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.reduce(|a, b| if cmp(&b, &a) == Ordering::Less { a } else { b })
    }

    /// Routes each element to the left container (`pred` true) or the right one.
    ///
    /// ```rust
    /// use lazyseq::{iter, SequenceExt};
    ///
    /// let (even, odd): (Vec<i32>, Vec<i32>) = iter(1..=6).partition(|x| x % 2 == 0);
    /// assert_eq!(even, vec![2, 4, 6]);
    /// assert_eq!(odd, vec![1, 3, 5]);
    /// ```
    fn partition<C, P>(&self, pred: P) -> (C, C)
    where
        C: FromSequence<Self::Item>,
        P: FnMut(&Self::Item) -> bool,
    {
        let (left, right) = split(self, pred);
        (C::from_sequence(drain(left)), C::from_sequence(drain(right)))
    }

    /// Like [`partition`](SequenceExt::partition), rebuilding each side under
    /// its own ordering rule.
    ///
    /// ```rust
    /// use lazyseq::{iter, Iterate, PriorityQueue, SequenceExt};
    ///
    /// let (small, big): (PriorityQueue<i32>, PriorityQueue<i32>) = iter(vec![5, 1, 8, 3, 9])
    ///     .partition_with(|x| *x < 5, |a: &i32, b: &i32| b.cmp(a), |a: &i32, b: &i32| a.cmp(b));
    /// assert_eq!(small.into_seq().to_vec(), vec![1, 3]);
    /// assert_eq!(big.into_seq().to_vec(), vec![9, 8, 5]);
    /// ```
    fn partition_with<C, L, R, P>(&self, pred: P, left_rule: L, right_rule: R) -> (C, C)
    where
        C: FromSequenceWith<Self::Item, L> + FromSequenceWith<Self::Item, R>,
        P: FnMut(&Self::Item) -> bool,
    {
        let (left, right) = split(self, pred);
        (
            C::from_sequence_with(drain(left), left_rule),
            C::from_sequence_with(drain(right), right_rule),
        )
    }

    // ---- pull & interop ----

    /// Converts into a pull [`Cursor`] backed by one background thread.
    ///
    /// Production starts on the first `next()`.
    fn cursor(self) -> Result<Cursor<Self::Item>, RuntimeError>
    where
        Self: Sized + Send + 'static,
        Self::Item: Send + 'static,
    {
        Cursor::new(self)
    }

    /// Feeds the sequence into a bounded async stream from a background thread.
    ///
    /// Production stops when `token` fires or the stream is dropped.
    fn into_stream(
        self,
        capacity: usize,
        token: CancellationToken,
    ) -> Result<SeqStream<Self::Item>, RuntimeError>
    where
        Self: Sized + Send + 'static,
        Self::Item: Send + 'static,
    {
        SeqStream::spawn(self, capacity, token)
    }
}

impl<S: Sequence + ?Sized> SequenceExt for S {}

fn split<S, P>(seq: &S, mut pred: P) -> (Vec<S::Item>, Vec<S::Item>)
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Item) -> bool,
{
    let mut left = Vec::new();
    let mut right = Vec::new();
    seq.run(&mut |x| {
        if pred(&x) {
            left.push(x);
        } else {
            right.push(x);
        }
        true
    });
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{empty, iter, repeat};
    use std::cell::Cell;
    use std::collections::{BTreeSet, VecDeque};

    #[test]
    fn test_reduce_and_fold() {
        assert_eq!(iter(1..=4).reduce(|a, b| a + b), Some(10));
        assert_eq!(empty::<i32>().reduce(|a, b| a + b), None);
        assert_eq!(empty::<i32>().fold(5, |a, b| a + b), 5);
        assert_eq!(iter(vec!["a", "b"]).fold(String::new(), |s, x| s + x), "ab");
    }

    #[test]
    fn test_all_any_short_circuit() {
        let calls = Cell::new(0);
        let s = iter(1..100).inspect(|_| calls.set(calls.get() + 1));
        assert!(s.any(|x| x == 3));
        assert_eq!(calls.get(), 3);

        calls.set(0);
        assert!(!s.all(|x| x < 5));
        assert_eq!(calls.get(), 5);

        assert!(empty::<i32>().all(|_| false));
        assert!(!empty::<i32>().any(|_| true));
    }

    #[test]
    fn test_find_nth_first_last() {
        assert_eq!(iter(1..10).find(|x| x % 4 == 0), Some(4));
        assert_eq!(empty::<i32>().find(|_| true), None);
        assert_eq!(iter(10..20).nth(3), Some(13));
        assert_eq!(iter(10..12).nth(5), None);
        assert_eq!(repeat(7).first(), Some(7));
        assert_eq!(iter(1..4).last(), Some(3));
        assert_eq!(empty::<u8>().last(), None);
    }

    #[test]
    fn test_min_max_ties() {
        let pairs = iter(vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')]);
        assert_eq!(pairs.min_by(|a, b| a.0.cmp(&b.0)), Some((0, 'b')));
        assert_eq!(pairs.max_by(|a, b| a.0.cmp(&b.0)), Some((1, 'c')));
        assert_eq!(iter(vec![3, 9, 2]).max(), Some(9));
        assert_eq!(empty::<i32>().min(), None);
    }

    #[test]
    fn test_collect_into_origin_shapes() {
        let d: VecDeque<i32> = iter(1..4).map(|x| x * 2).collect();
        assert_eq!(d, VecDeque::from(vec![2, 4, 6]));
        let s: BTreeSet<i32> = iter(vec![3, 1, 3]).collect();
        assert_eq!(s.into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let (small, big): (Vec<i32>, Vec<i32>) = iter(0..10).partition(|x| *x < 3);
        assert_eq!(small, vec![0, 1, 2]);
        assert_eq!(big, vec![3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_for_each_and_count() {
        let mut sum = 0;
        iter(1..=3).for_each(|x| sum += x);
        assert_eq!(sum, 6);
        assert_eq!(iter(0..0).count(), 0);
        assert_eq!(repeat(()).take(0).count(), 0);
    }

    #[test]
    fn test_boxed_pipeline() {
        let stages: Vec<BoxSeq<'_, i32>> = vec![iter(1..3).boxed(), iter(5..6).map(|x| -x).boxed()];
        assert_eq!(crate::concat(stages).to_vec(), vec![1, 2, -5]);
    }
}
