//! Duplicate suppression.
//!
//! - `dedup` compares with the immediately preceding element only.
//! - `unique` remembers every element seen so far (unbounded membership set).

use std::collections::HashSet;
use std::hash::Hash;

use crate::seq::Sequence;

/// Suppresses consecutive duplicates. Created by [`SequenceExt::dedup`](crate::SequenceExt::dedup).
#[derive(Clone)]
pub struct Dedup<S> {
    inner: S,
}

impl<S> Dedup<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> Sequence for Dedup<S>
where
    S: Sequence,
    S::Item: PartialEq + Clone,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut last: Option<S::Item> = None;
        self.inner.run(&mut |x| {
            if last.as_ref() == Some(&x) {
                return true;
            }
            last = Some(x.clone());
            sink(x)
        })
    }
}

/// Suppresses consecutive elements with equal keys.
/// Created by [`SequenceExt::dedup_by_key`](crate::SequenceExt::dedup_by_key).
#[derive(Clone)]
pub struct DedupByKey<S, F> {
    inner: S,
    key: F,
}

impl<S, F> DedupByKey<S, F> {
    pub(crate) fn new(inner: S, key: F) -> Self {
        Self { inner, key }
    }
}

impl<S, F, K> Sequence for DedupByKey<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    K: PartialEq,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut last: Option<K> = None;
        self.inner.run(&mut |x| {
            let k = (self.key)(&x);
            if last.as_ref() == Some(&k) {
                return true;
            }
            last = Some(k);
            sink(x)
        })
    }
}

/// Suppresses every element seen before, keeping first-seen order.
/// Created by [`SequenceExt::unique`](crate::SequenceExt::unique).
#[derive(Clone)]
pub struct Unique<S> {
    inner: S,
}

impl<S> Unique<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> Sequence for Unique<S>
where
    S: Sequence,
    S::Item: Eq + Hash + Clone,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut seen = HashSet::new();
        self.inner.run(&mut |x| {
            if seen.insert(x.clone()) {
                sink(x)
            } else {
                true
            }
        })
    }
}

/// Suppresses every element whose key was seen before.
/// Created by [`SequenceExt::unique_by_key`](crate::SequenceExt::unique_by_key).
#[derive(Clone)]
pub struct UniqueByKey<S, F> {
    inner: S,
    key: F,
}

impl<S, F> UniqueByKey<S, F> {
    pub(crate) fn new(inner: S, key: F) -> Self {
        Self { inner, key }
    }
}

impl<S, F, K> Sequence for UniqueByKey<S, F>
where
    S: Sequence,
    F: Fn(&S::Item) -> K,
    K: Eq + Hash,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut seen = HashSet::new();
        self.inner.run(&mut |x| {
            if seen.insert((self.key)(&x)) {
                sink(x)
            } else {
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Iterate, SequenceExt};
    use std::collections::VecDeque;

    #[test]
    fn test_dedup_only_adjacent() {
        let d: VecDeque<i32> = VecDeque::from(vec![1, 1, 2, 2, 3]);
        assert_eq!(d.into_seq().dedup().to_vec(), vec![1, 2, 3]);

        let d: VecDeque<i32> = VecDeque::from(vec![1, 2, 1, 1]);
        assert_eq!(d.into_seq().dedup().to_vec(), vec![1, 2, 1]);
    }

    #[test]
    fn test_unique_first_seen_order() {
        let d: VecDeque<i32> = VecDeque::from(vec![1, 2, 1, 3, 2]);
        assert_eq!(d.into_seq().unique().to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_by_key_variants() {
        let words = vec!["apple", "avocado", "banana", "blueberry", "apricot"].into_seq();
        let first_letter = |w: &&str| w.as_bytes()[0];
        assert_eq!(
            words.clone().dedup_by_key(first_letter).to_vec(),
            vec!["apple", "banana", "apricot"]
        );
        assert_eq!(
            words.unique_by_key(first_letter).to_vec(),
            vec!["apple", "banana"]
        );
    }

    #[test]
    fn test_state_is_fresh_per_run() {
        let s = vec![1, 1, 2].into_seq().unique();
        assert_eq!(s.to_vec(), vec![1, 2]);
        assert_eq!(s.to_vec(), vec![1, 2]);
    }
}
