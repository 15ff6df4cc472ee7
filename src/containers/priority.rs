//! [`PriorityQueue`]: a priority container ordered by a comparator rule.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Rev;
use std::mem;
use std::sync::Arc;
use std::vec;

use crate::seq::{drain, push_all, Drain, FromSequenceWith, Iterate, Sequence};

/// Ordering rule: the element that compares greatest is served first.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Priority queue serving the greatest element (under its comparator) first.
///
/// Elements of equal priority are served in insertion order.
///
/// ```rust
/// use lazyseq::{iter, Iterate, PriorityQueue, SequenceExt};
///
/// // Natural order: largest first.
/// let q: PriorityQueue<u32> = iter(vec![4, 9, 1]).collect();
/// assert_eq!(q.peek(), Some(&9));
///
/// // Explicit rule: smallest first.
/// let q: PriorityQueue<u32> = iter(vec![4, 9, 1]).collect_with(|a: &u32, b: &u32| b.cmp(a));
/// assert_eq!(q.into_seq().to_vec(), vec![1, 4, 9]);
/// ```
pub struct PriorityQueue<T> {
    /// Sorted ascending by `cmp`; the back is served first.
    items: Vec<T>,
    cmp: Comparator<T>,
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue ordered by `cmp`.
    pub fn with_comparator<F>(cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            items: Vec::new(),
            cmp: Arc::new(cmp),
        }
    }

    /// Inserts an element.
    pub fn push(&mut self, value: T) {
        let cmp = &self.cmp;
        let idx = self
            .items
            .partition_point(|e| cmp(e, &value) == Ordering::Less);
        self.items.insert(idx, value);
    }

    /// Removes and returns the highest-priority element.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the highest-priority element without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the queue holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empties the queue into a one-shot sequence in pop order.
    pub fn drain(&mut self) -> Drain<Rev<vec::IntoIter<T>>> {
        drain(mem::take(&mut self.items).into_iter().rev())
    }
}

impl<T: Ord + 'static> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T: Clone> Clone for PriorityQueue<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            cmp: Arc::clone(&self.cmp),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter().rev()).finish()
    }
}

impl<T> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl<T: Clone> Iterate for PriorityQueue<T> {
    type Item = T;

    /// Pop order (highest priority first).
    fn iterate(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        push_all(self.items.iter().rev().cloned(), sink)
    }
}

impl<T, F> FromSequenceWith<T, F> for PriorityQueue<T>
where
    F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
{
    fn from_sequence_with<S: Sequence<Item = T>>(seq: S, rule: F) -> Self {
        let mut q = Self::with_comparator(rule);
        seq.run(&mut |x| {
            q.push(x);
            true
        });
        q
    }
}
