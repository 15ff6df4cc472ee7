//! [`ResultSeq`]: sequences of value-or-error envelopes.

use crate::config::ParallelConfig;
use crate::par::Par;
use crate::seq::{
    drain, Chain, Filter, FilterMap, FromSequence, Inspect, Map, Sequence, SequenceExt, Take,
};

use super::Partial;

/// Sequence of `Result` envelopes that stops after the first `Err`.
///
/// Running a `ResultSeq` forwards envelopes up to and including the first
/// `Err`, then stops its source. Structural combinators extend the wrapped
/// pipeline and leave the stop to the outermost `ResultSeq`, so the guarantee
/// holds however many stages are chained.
///
/// ### Rules
/// - Structural combinators (`map`, `filter`, `take`, ...) act on `Ok` payloads
///   and pass the `Err` through unchanged.
/// - `ok()`, `err()` and `partition()` see every envelope the pipeline produces,
///   errors included, whatever was chained before them.
/// - No terminal silently drops an error.
#[derive(Clone)]
pub struct ResultSeq<S> {
    inner: S,
}

impl<S> ResultSeq<S> {
    /// Wraps a sequence of envelopes.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped sequence.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, T, E> Sequence for ResultSeq<S>
where
    S: Sequence<Item = Result<T, E>>,
{
    type Item = Result<T, E>;

    fn run(&self, sink: &mut dyn FnMut(Result<T, E>) -> bool) -> bool {
        let mut failed = false;
        let completed = self.inner.run(&mut |r| {
            failed = r.is_err();
            sink(r) && !failed
        });
        completed && !failed
    }
}

impl<S, T, E> ResultSeq<S>
where
    S: Sequence<Item = Result<T, E>>,
{
    // ---- projections ----

    /// Successful payloads of every envelope.
    pub fn ok(self) -> FilterMap<S, fn(Result<T, E>) -> Option<T>> {
        FilterMap::new(self.inner, Result::ok as fn(Result<T, E>) -> Option<T>)
    }

    /// Errors of every envelope.
    pub fn err(self) -> FilterMap<S, fn(Result<T, E>) -> Option<E>> {
        FilterMap::new(self.inner, Result::err as fn(Result<T, E>) -> Option<E>)
    }

    // ---- structural ----

    /// Transforms successful payloads.
    pub fn map<U, F>(self, f: F) -> ResultSeq<Map<S, impl Fn(Result<T, E>) -> Result<U, E>>>
    where
        F: Fn(T) -> U,
    {
        ResultSeq::new(Map::new(self.inner, move |r: Result<T, E>| r.map(&f)))
    }

    /// Chains a fallible step; an `Err` it returns stops the sequence.
    pub fn and_then<U, F>(
        self,
        f: F,
    ) -> ResultSeq<Map<S, impl Fn(Result<T, E>) -> Result<U, E>>>
    where
        F: Fn(T) -> Result<U, E>,
    {
        ResultSeq::new(Map::new(self.inner, move |r: Result<T, E>| r.and_then(&f)))
    }

    /// Transforms the error.
    pub fn map_err<E2, F>(
        self,
        f: F,
    ) -> ResultSeq<Map<S, impl Fn(Result<T, E>) -> Result<T, E2>>>
    where
        F: Fn(E) -> E2,
    {
        ResultSeq::new(Map::new(self.inner, move |r: Result<T, E>| r.map_err(&f)))
    }

    /// Keeps successes matching `pred`; errors always pass.
    pub fn filter<P>(self, pred: P) -> ResultSeq<Filter<S, impl Fn(&Result<T, E>) -> bool>>
    where
        P: Fn(&T) -> bool,
    {
        ResultSeq::new(Filter::new(self.inner, move |r: &Result<T, E>| match r {
            Ok(v) => pred(v),
            Err(_) => true,
        }))
    }

    /// Observes successful payloads.
    pub fn inspect<F>(self, f: F) -> ResultSeq<Inspect<S, impl Fn(&Result<T, E>)>>
    where
        F: Fn(&T),
    {
        ResultSeq::new(Inspect::new(self.inner, move |r: &Result<T, E>| {
            if let Ok(v) = r {
                f(v);
            }
        }))
    }

    /// Yields at most `n` envelopes.
    pub fn take(self, n: usize) -> ResultSeq<Take<S>> {
        ResultSeq::new(Take::new(self.inner, n))
    }

    /// Drops the first `n` successes; an error is never skipped.
    pub fn skip(self, n: usize) -> ResultSeq<SkipOk<S>> {
        ResultSeq::new(SkipOk { inner: self.inner, n })
    }

    /// Runs `other` after `self`, unless `self` ended with an error.
    pub fn chain<B>(self, other: B) -> ResultSeq<Chain<S, B>>
    where
        B: Sequence<Item = Result<T, E>>,
    {
        ResultSeq::new(Chain::new(self.inner, other))
    }

    /// Maps successful payloads on a bounded worker pool (completion order).
    ///
    /// The first error to arrive at the fan-in stops distribution.
    pub fn par_map<U, F>(self, config: ParallelConfig, f: F) -> ResultSeq<Par<S, Result<U, E>>>
    where
        S: Send + Sync + 'static,
        T: Send + 'static,
        E: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        ResultSeq::new(Par::new(self.inner, config).map(move |r: Result<T, E>| r.map(&f)))
    }

    // ---- terminals ----

    /// Collects successes until the first error.
    ///
    /// ```rust
    /// use lazyseq::from_results;
    ///
    /// let got = from_results(vec![Ok(1), Err("e"), Ok(2)]).collect::<Vec<i32>>();
    /// assert_eq!(got.ok(), &vec![1]);
    /// assert_eq!(got.err(), Some(&"e"));
    /// ```
    pub fn collect<C>(&self) -> Partial<C, E>
    where
        C: FromSequence<T>,
    {
        let mut values = Vec::new();
        let mut error = None;
        self.run(&mut |r| {
            match r {
                Ok(v) => values.push(v),
                Err(e) => error = Some(e),
            }
            true
        });
        Partial::new(C::from_sequence(drain(values)), error)
    }

    /// All successes, or the first error.
    pub fn try_collect<C>(&self) -> Result<C, E>
    where
        C: FromSequence<T>,
    {
        self.collect().into_result()
    }

    /// Earliest error, without keeping any success.
    pub fn first_err(&self) -> Option<E> {
        let mut found = None;
        self.run(&mut |r| match r {
            Ok(_) => true,
            Err(e) => {
                found = Some(e);
                false
            }
        });
        found
    }

    /// Folds successes; returns the first error instead if one occurs.
    pub fn try_fold<A, F>(&self, init: A, mut f: F) -> Result<A, E>
    where
        F: FnMut(A, T) -> A,
    {
        SequenceExt::fold(self, Ok(init), |acc, r| match (acc, r) {
            (Ok(a), Ok(v)) => Ok(f(a, v)),
            (Ok(_), Err(e)) | (Err(e), _) => Err(e),
        })
    }

    /// Calls `f` on successes until the first error, which is returned.
    pub fn try_for_each<F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(T),
    {
        self.try_fold((), |(), v| f(v))
    }

    /// Splits every envelope of the pipeline into successes and errors.
    pub fn partition<C, D>(&self) -> (C, D)
    where
        C: FromSequence<T>,
        D: FromSequence<E>,
    {
        let mut oks = Vec::new();
        let mut errs = Vec::new();
        self.inner.run(&mut |r| {
            match r {
                Ok(v) => oks.push(v),
                Err(e) => errs.push(e),
            }
            true
        });
        (C::from_sequence(drain(oks)), D::from_sequence(drain(errs)))
    }

    /// Number of envelopes up to and including the first error.
    pub fn len_until_err(&self) -> usize {
        SequenceExt::count(self)
    }
}

/// Skips successes only. Created by [`ResultSeq::skip`].
#[derive(Clone)]
pub struct SkipOk<S> {
    inner: S,
    n: usize,
}

impl<S, T, E> Sequence for SkipOk<S>
where
    S: Sequence<Item = Result<T, E>>,
{
    type Item = Result<T, E>;

    fn run(&self, sink: &mut dyn FnMut(Result<T, E>) -> bool) -> bool {
        let mut left = self.n;
        self.inner.run(&mut |r| {
            if r.is_ok() && left > 0 {
                left -= 1;
                return true;
            }
            sink(r)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{empty, from_results, iter, ParallelConfig, SequenceExt, TrySequenceExt};
    use std::cell::Cell;

    fn sample() -> Vec<Result<i32, &'static str>> {
        vec![Ok(1), Err("e"), Ok(2)]
    }

    #[test]
    fn test_short_circuit_through_any_chain() {
        let plain = from_results(sample());
        assert_eq!(plain.collect::<Vec<_>>().ok(), &vec![1]);
        assert_eq!(plain.first_err(), Some("e"));

        let chained = from_results(sample())
            .map(|x| x * 10)
            .filter(|x| *x > 0)
            .inspect(|_| {})
            .take(5)
            .skip(0);
        let got = chained.collect::<Vec<_>>();
        assert_eq!(got.ok(), &vec![10]);
        assert_eq!(got.err(), Some(&"e"));
        assert_eq!(chained.first_err(), Some("e"));
    }

    #[test]
    fn test_source_stops_after_first_error() {
        let pulled = Cell::new(0);
        let s = iter(0..10)
            .inspect(|_| pulled.set(pulled.get() + 1))
            .map(|x| if x == 3 { Err(x) } else { Ok(x) })
            .try_seq();
        assert_eq!(s.try_collect::<Vec<i32>>(), Err(3));
        assert_eq!(pulled.get(), 4);
    }

    #[test]
    fn test_projections_see_every_envelope() {
        assert_eq!(from_results(sample()).ok().to_vec(), vec![1, 2]);
        assert_eq!(from_results(sample()).err().to_vec(), vec!["e"]);
        let (oks, errs): (Vec<i32>, Vec<&str>) = from_results(sample()).partition();
        assert_eq!(oks, vec![1, 2]);
        assert_eq!(errs, vec!["e"]);
    }

    #[test]
    fn test_projections_ignore_chained_stages() {
        assert_eq!(from_results(sample()).map(|x| x).ok().to_vec(), vec![1, 2]);
        assert_eq!(from_results(sample()).inspect(|_| {}).err().to_vec(), vec!["e"]);

        let (oks, errs): (Vec<i32>, Vec<&str>) = from_results(sample()).map(|x| x).partition();
        assert_eq!(oks, vec![1, 2]);
        assert_eq!(errs, vec!["e"]);

        let mapped = from_results(sample()).map(|x| x).filter(|_| true);
        assert_eq!(mapped.collect::<Vec<_>>().ok(), &vec![1]);
        assert_eq!(mapped.first_err(), Some("e"));
    }

    #[test]
    fn test_and_then_and_map_err() {
        let s = from_results(vec![Ok::<i32, String>(4), Ok(-1), Ok(9)])
            .and_then(|x| if x < 0 { Err(format!("negative {x}")) } else { Ok(x) })
            .map_err(|e| e.len());
        let got = s.collect::<Vec<i32>>();
        assert_eq!(got.ok(), &vec![4]);
        assert_eq!(got.err(), Some(&11));
        assert_eq!(s.len_until_err(), 2);
    }

    #[test]
    fn test_chain_skips_after_error() {
        let first = from_results(vec![Ok(1), Err('x')]);
        let later = iter(vec![Ok(2), Ok(3)]);
        assert_eq!(first.chain(later).try_collect::<Vec<i32>>(), Err('x'));

        let clean = from_results(vec![Ok::<i32, char>(1)]).chain(iter(vec![Ok(2)]));
        assert_eq!(clean.try_collect::<Vec<i32>>(), Ok(vec![1, 2]));
    }

    #[test]
    fn test_skip_never_drops_an_error() {
        let s = from_results(vec![Err::<i32, &str>("early"), Ok(1), Ok(2)]).skip(5);
        assert_eq!(s.first_err(), Some("early"));
    }

    #[test]
    fn test_try_fold_and_for_each() {
        let ok = from_results(vec![Ok::<i32, ()>(1), Ok(2), Ok(3)]);
        assert_eq!(ok.try_fold(0, |a, x| a + x), Ok(6));
        let mut seen = Vec::new();
        assert_eq!(ok.try_for_each(|x| seen.push(x)), Ok(()));
        assert_eq!(seen, vec![1, 2, 3]);

        let bad = from_results(sample());
        assert_eq!(bad.try_fold(0, |a, x| a + x), Err("e"));
        assert_eq!(empty::<Result<u8, ()>>().try_seq().try_fold(7u8, |a, x| a + x), Ok(7));
    }

    #[test]
    fn test_par_map_keeps_membership() {
        let ok = from_results((0..30).map(Ok::<i32, String>).collect::<Vec<_>>())
            .par_map(ParallelConfig::new(3), |x| x * 2);
        let mut got = ok.try_collect::<Vec<i32>>().unwrap();
        got.sort_unstable();
        assert_eq!(got, (0..30).map(|x| x * 2).collect::<Vec<_>>());

        let bad = from_results(vec![Ok(1), Err("stop".to_string()), Ok(3)])
            .par_map(ParallelConfig::new(2), |x: i32| x + 1);
        assert_eq!(bad.first_err(), Some("stop".to_string()));
    }
}
