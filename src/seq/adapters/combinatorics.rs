//! Materializing adapters: combinations, permutations and cycles.
//!
//! These read the whole source (order preserved) before producing anything,
//! so they must not sit on top of an unbounded source. Enumeration itself is
//! lazy: a stop from downstream ends it immediately.

use crate::seq::Sequence;

fn materialize<S: Sequence>(seq: &S) -> Option<Vec<S::Item>> {
    let mut items = Vec::new();
    let completed = seq.run(&mut |x| {
        items.push(x);
        true
    });
    completed.then_some(items)
}

fn pick<T: Clone>(items: &[T], idx: &[usize]) -> Vec<T> {
    idx.iter().map(|&i| items[i].clone()).collect()
}

/// All `k`-subsets in lexicographic index order.
/// Created by [`SequenceExt::combinations`](crate::SequenceExt::combinations).
#[derive(Clone)]
pub struct Combinations<S> {
    inner: S,
    k: usize,
}

impl<S> Combinations<S> {
    pub(crate) fn new(inner: S, k: usize) -> Self {
        Self { inner, k }
    }
}

impl<S> Sequence for Combinations<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        let k = self.k;
        if k == 0 {
            return true;
        }
        let Some(items) = materialize(&self.inner) else {
            return false;
        };
        let n = items.len();
        if k > n {
            return true;
        }

        let mut idx: Vec<usize> = (0..k).collect();
        loop {
            if !sink(pick(&items, &idx)) {
                return false;
            }
            // Rightmost position that can still move forward.
            let mut i = k;
            while i > 0 && idx[i - 1] == n - k + i - 1 {
                i -= 1;
            }
            if i == 0 {
                return true;
            }
            idx[i - 1] += 1;
            for j in i..k {
                idx[j] = idx[j - 1] + 1;
            }
        }
    }
}

/// All orderings in lexicographic index order.
/// Created by [`SequenceExt::permutations`](crate::SequenceExt::permutations).
#[derive(Clone)]
pub struct Permutations<S> {
    inner: S,
}

impl<S> Permutations<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> Sequence for Permutations<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;

    fn run(&self, sink: &mut dyn FnMut(Self::Item) -> bool) -> bool {
        let Some(items) = materialize(&self.inner) else {
            return false;
        };
        let n = items.len();
        if n == 0 {
            return true;
        }

        let mut p: Vec<usize> = (0..n).collect();
        loop {
            if !sink(pick(&items, &p)) {
                return false;
            }
            let mut i = n - 1;
            while i > 0 && p[i - 1] >= p[i] {
                i -= 1;
            }
            if i == 0 {
                return true;
            }
            let mut j = n - 1;
            while p[j] <= p[i - 1] {
                j -= 1;
            }
            p.swap(i - 1, j);
            p[i..].reverse();
        }
    }
}

/// Endless repetition of the source.
/// Created by [`SequenceExt::cycle`](crate::SequenceExt::cycle).
///
/// The first pass streams straight from the source while recording it; later
/// passes replay the recording. Pair it with `take` or `with_cancel`.
///
/// A cancellation token must be bound downstream of `cycle()`: one bound
/// upstream only ends the recorded pass, and the replay never consults it.
#[derive(Clone)]
pub struct Cycle<S> {
    inner: S,
}

impl<S> Cycle<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> Sequence for Cycle<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    fn run(&self, sink: &mut dyn FnMut(S::Item) -> bool) -> bool {
        let mut recorded = Vec::new();
        let completed = self.inner.run(&mut |x| {
            recorded.push(x.clone());
            sink(x)
        });
        if !completed {
            return false;
        }
        if recorded.is_empty() {
            return true;
        }
        loop {
            for x in &recorded {
                if !sink(x.clone()) {
                    return false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{empty, iter, SequenceExt};
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_combinations_lexicographic() {
        let out = iter(vec!['a', 'b', 'c', 'd']).combinations(2).to_vec();
        let expect: Vec<Vec<char>> = vec![
            vec!['a', 'b'],
            vec!['a', 'c'],
            vec!['a', 'd'],
            vec!['b', 'c'],
            vec!['b', 'd'],
            vec!['c', 'd'],
        ];
        assert_eq!(out, expect);
    }

    #[test]
    fn test_combinations_edge_cases() {
        assert!(iter(1..3).combinations(3).to_vec().is_empty());
        assert!(empty::<i32>().combinations(1).to_vec().is_empty());
        assert!(iter(1..3).combinations(0).to_vec().is_empty());
        assert_eq!(iter(1..4).combinations(3).to_vec(), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_permutations_lexicographic() {
        let out = iter(vec![1, 2, 3]).permutations().to_vec();
        assert_eq!(
            out,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
        assert_eq!(iter(vec![9]).permutations().to_vec(), vec![vec![9]]);
        assert!(empty::<i32>().permutations().to_vec().is_empty());
    }

    #[test]
    fn test_permutations_use_positions_not_values() {
        assert_eq!(iter(vec![1, 1]).permutations().count(), 2);
    }

    #[test]
    fn test_cycle_needs_a_bound() {
        assert_eq!(iter(1..=3).cycle().take(7).to_vec(), vec![1, 2, 3, 1, 2, 3, 1]);
        assert!(iter(1..=3).cycle().take(0).to_vec().is_empty());
        assert_eq!(empty::<i32>().cycle().count(), 0);
    }

    #[test]
    fn test_cycle_with_cancel() {
        let token = CancellationToken::new();
        let seen = std::cell::Cell::new(0);
        let n = iter(0..2)
            .cycle()
            .inspect(|_| {
                seen.set(seen.get() + 1);
                if seen.get() == 5 {
                    token.cancel();
                }
            })
            .with_cancel(token.clone())
            .count();
        assert_eq!(n, 4);
    }
}
