use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lazyseq::{empty, from_results, iter, repeat, Backpressure, ParallelConfig, SequenceExt, WorkerPool};
use proptest::prelude::*;

fn sorted<T: Ord>(mut v: Vec<T>) -> Vec<T> {
    v.sort();
    v
}

proptest! {
    #[test]
    fn sequential_pipeline_preserves_source_order(items in proptest::collection::vec(any::<i32>(), 0..64)) {
        let got = iter(items.clone()).map(|x: i32| x.wrapping_mul(3)).filter(|x| x % 2 == 0).to_vec();
        let want: Vec<i32> = items.iter().map(|x| x.wrapping_mul(3)).filter(|x| x % 2 == 0).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn take_and_skip_split_the_source(items in proptest::collection::vec(any::<u8>(), 0..48), n in 0usize..64) {
        let head = iter(items.clone()).take(n).to_vec();
        let tail = iter(items.clone()).skip(n).to_vec();
        prop_assert_eq!(head.len(), n.min(items.len()));
        let mut joined = head;
        joined.extend(tail);
        prop_assert_eq!(joined, items);
    }

    #[test]
    fn partition_is_complete_and_disjoint(items in proptest::collection::vec(any::<u16>(), 0..64)) {
        let (even, odd): (Vec<u16>, Vec<u16>) = iter(items.clone()).partition(|x| x % 2 == 0);
        prop_assert!(even.iter().all(|x| x % 2 == 0));
        prop_assert!(odd.iter().all(|x| x % 2 == 1));
        prop_assert_eq!(even.len() + odd.len(), items.len());
        let mut all = even;
        all.extend(odd);
        prop_assert_eq!(sorted(all), sorted(items));
    }

    #[test]
    fn dedup_drops_runs_and_unique_drops_repeats(items in proptest::collection::vec(0u8..4, 0..48)) {
        let deduped = iter(items.clone()).dedup().to_vec();
        prop_assert!(deduped.windows(2).all(|w| w[0] != w[1]));

        let uniq = iter(items.clone()).unique().to_vec();
        let distinct: HashSet<u8> = items.iter().copied().collect();
        prop_assert_eq!(uniq.len(), distinct.len());
        let mut seen = HashSet::new();
        let first_occurrences: Vec<u8> = items.iter().copied().filter(|x| seen.insert(*x)).collect();
        prop_assert_eq!(uniq, first_occurrences);
    }

    #[test]
    fn results_stop_after_first_error(items in proptest::collection::vec(prop_oneof![
        (0u32..100).prop_map(Ok::<u32, &'static str>),
        Just(Err::<u32, &'static str>("bad")),
    ], 0..32)) {
        let got = from_results(items.clone()).collect::<Vec<u32>>();
        let cut = items.iter().position(|r| r.is_err());
        match cut {
            Some(i) => {
                prop_assert_eq!(got.err(), Some(&"bad"));
                prop_assert_eq!(got.ok().len(), i);
            }
            None => {
                prop_assert!(got.is_ok());
                prop_assert_eq!(got.ok().len(), items.len());
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn parallel_yields_same_multiset(items in proptest::collection::vec(any::<i64>(), 0..80), workers in 1usize..6) {
        let seq = sorted(iter(items.clone()).map(|x: i64| x.wrapping_add(1)).to_vec());
        let par = sorted(iter(items).parallel(workers).map(|x: i64| x.wrapping_add(1)).to_vec());
        prop_assert_eq!(seq, par);
    }

    #[test]
    fn pool_never_exceeds_its_limit(jobs in 1usize..24, limit in 1usize..5, queue in any::<bool>()) {
        let live = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let backpressure = if queue { Backpressure::Queue } else { Backpressure::Block };
        let pool = WorkerPool::new(ParallelConfig::new(limit).with_backpressure(backpressure));

        let (l, p) = (Arc::clone(&live), Arc::clone(&peak));
        let stream = pool
            .stream::<usize, (), _>(move |sub| {
                for i in 0..jobs {
                    let (l, p) = (Arc::clone(&l), Arc::clone(&p));
                    let submitted = sub.submit(move || {
                        let now = l.fetch_add(1, Ordering::SeqCst) + 1;
                        p.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(1));
                        l.fetch_sub(1, Ordering::SeqCst);
                        Ok(i)
                    });
                    if submitted.is_err() {
                        break;
                    }
                }
            })
            .unwrap();

        let done: Vec<usize> = stream.map(|r| r.unwrap()).collect();
        prop_assert_eq!(sorted(done), (0..jobs).collect::<Vec<_>>());
        prop_assert!(peak.load(Ordering::SeqCst) <= limit);
    }

    #[test]
    fn partially_consumed_cursors_stop_cleanly(pulls in proptest::collection::vec(0usize..6, 1..12)) {
        let mut cursors: Vec<_> = pulls.iter().map(|_| repeat(7u8).enumerate().cursor().unwrap()).collect();
        for (cursor, n) in cursors.iter_mut().zip(&pulls) {
            for expect in 0..*n {
                prop_assert_eq!(cursor.next(), Some((expect, 7)));
            }
        }
        for cursor in cursors.iter_mut() {
            cursor.stop();
            cursor.stop();
            prop_assert_eq!(cursor.next(), None);
        }
    }
}

#[test]
fn take_zero_on_cycle_terminates() {
    assert!(iter(vec![1, 2, 3]).cycle().take(0).to_vec().is_empty());
    assert!(empty::<u8>().cycle().to_vec().is_empty());
}

#[test]
fn find_on_empty_is_none() {
    assert_eq!(empty::<u32>().find(|_| true), None);
    assert_eq!(empty::<u32>().first(), None);
    assert_eq!(empty::<u32>().reduce(|a, b| a + b), None);
}

#[test]
fn parallel_take_on_infinite_source_finishes() {
    let got = repeat(1u32).parallel(3).map(|x: u32| x + 1).take(10).to_vec();
    assert_eq!(got, vec![2; 10]);
}

#[test]
fn dedup_and_unique_reference_examples() {
    use std::collections::VecDeque;
    use lazyseq::Iterate;

    let runs: VecDeque<i32> = VecDeque::from(vec![1, 1, 2, 2, 3]);
    assert_eq!(runs.into_seq().dedup().to_vec(), vec![1, 2, 3]);

    let repeats: VecDeque<i32> = VecDeque::from(vec![1, 2, 1, 3, 2]);
    assert_eq!(repeats.into_seq().unique().to_vec(), vec![1, 2, 3]);
}

#[test]
fn first_error_survives_structural_combinators() {
    let src = from_results(vec![Ok(1), Err("e"), Ok(2)]);
    let got = src.clone().map(|x: i32| x * 10).take(5).collect::<Vec<i32>>();
    assert_eq!(got.ok(), &vec![10]);
    assert_eq!(got.err(), Some(&"e"));
    assert_eq!(src.first_err(), Some("e"));
}
