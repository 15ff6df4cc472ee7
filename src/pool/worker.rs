//! [`WorkerPool`]: configuration and thread start-up.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::config::ParallelConfig;
use crate::error::RuntimeError;
use crate::events::{next_resource_id, panic_message, Event, EventKind};
use crate::subscribers::SubscriberSet;

use super::stream::ResultStream;
use super::submit::{Job, Outcome, Submitter};

/// Bounded-concurrency job runner.
///
/// Cheap to build and reusable: every [`stream`](WorkerPool::stream) call
/// starts its own driver and worker threads and tears them down when the
/// returned [`ResultStream`] finishes or is closed.
#[derive(Clone, Debug, Default)]
pub struct WorkerPool {
    config: ParallelConfig,
}

impl WorkerPool {
    /// Creates a pool from an explicit configuration.
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    /// Sets the concurrency limit (`0` is clamped to 1).
    #[must_use]
    pub fn limit(mut self, n: usize) -> Self {
        self.config.workers = n;
        self
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Runs `producer` on a driver thread and returns the unordered result stream.
    ///
    /// Fails only when a thread cannot be spawned; in that case every thread
    /// already started is shut down before returning.
    pub fn stream<T, E, P>(&self, producer: P) -> Result<ResultStream<T, E>, RuntimeError>
    where
        T: Send + 'static,
        E: Send + 'static,
        P: FnOnce(&Submitter<T, E>) + Send + 'static,
    {
        let pool_id = next_resource_id();
        let limit = self.config.workers_clamped();
        let token = self.config.run_token();
        let permits = Arc::new(Semaphore::new(limit));
        let subscribers = self.config.subscribers.clone();
        let completed = Arc::new(AtomicU64::new(0));

        let (job_tx, job_rx) = unbounded::<Job<T, E>>();
        let (res_tx, res_rx) = unbounded::<Outcome<T, E>>();

        let mut threads: Vec<JoinHandle<()>> = Vec::with_capacity(limit + 1);
        for idx in 0..limit {
            let worker = Worker {
                pool_id,
                jobs: job_rx.clone(),
                results: res_tx.clone(),
                token: token.clone(),
                subscribers: subscribers.clone(),
                completed: Arc::clone(&completed),
            };
            let spawned = thread::Builder::new()
                .name(format!("lazyseq-pool-{pool_id}-w{idx}"))
                .spawn(move || worker.run());
            match spawned {
                Ok(handle) => threads.push(handle),
                Err(e) => {
                    abort_start(&token, job_tx, threads);
                    return Err(RuntimeError::spawn("worker", e));
                }
            }
        }
        drop(job_rx);

        let submitter = Submitter {
            jobs: job_tx,
            permits: Arc::clone(&permits),
            token: token.clone(),
            backpressure: self.config.backpressure,
            subscribers: subscribers.clone(),
            pool_id,
            next_job: AtomicU64::new(0),
        };
        subscribers.emit(
            &Event::new(EventKind::PoolStarted)
                .with_pool(pool_id)
                .with_workers(limit),
        );

        let driver_results = res_tx;
        let spawned = thread::Builder::new()
            .name(format!("lazyseq-pool-{pool_id}-driver"))
            .spawn(move || {
                let res = panic::catch_unwind(AssertUnwindSafe(|| producer(&submitter)));
                // Closing the job queue lets idle workers exit.
                drop(submitter);
                if let Err(payload) = res {
                    let _ = driver_results.send(Err(payload));
                }
            });
        match spawned {
            Ok(handle) => threads.push(handle),
            Err(e) => {
                token.cancel();
                for handle in threads {
                    let _ = handle.join();
                }
                return Err(RuntimeError::spawn("driver", e));
            }
        }

        Ok(ResultStream::new(
            res_rx,
            token,
            permits,
            threads,
            subscribers,
            pool_id,
            completed,
        ))
    }
}

/// Stops workers that were already started when a later spawn fails.
fn abort_start<T, E>(token: &CancellationToken, jobs: Sender<Job<T, E>>, threads: Vec<JoinHandle<()>>) {
    token.cancel();
    drop(jobs);
    for handle in threads {
        let _ = handle.join();
    }
}

/// One reusable worker thread.
struct Worker<T, E> {
    pool_id: u64,
    jobs: Receiver<Job<T, E>>,
    results: Sender<Outcome<T, E>>,
    token: CancellationToken,
    subscribers: SubscriberSet,
    completed: Arc<AtomicU64>,
}

impl<T, E> Worker<T, E> {
    /// Pulls jobs until the queue closes.
    ///
    /// Once the token fires queued jobs are dropped unstarted.
    fn run(self) {
        for job in self.jobs.iter() {
            if self.token.is_cancelled() {
                continue;
            }
            let Job { id, run, permit } = job;
            let outcome = panic::catch_unwind(AssertUnwindSafe(run));
            self.completed.fetch_add(1, Ordering::Relaxed);
            match &outcome {
                Ok(Ok(_)) => {}
                Ok(Err(_)) => self.subscribers.emit(
                    &Event::new(EventKind::JobFailed)
                        .with_pool(self.pool_id)
                        .with_job(id),
                ),
                Err(payload) => self.subscribers.emit(
                    &Event::new(EventKind::JobPanicked)
                        .with_pool(self.pool_id)
                        .with_job(id)
                        .with_reason(panic_message(payload.as_ref())),
                ),
            }
            drop(permit);
            if self.results.send(outcome).is_err() {
                // Stream is gone; nothing left to report to.
                self.token.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backpressure;
    use crate::subscribers::Subscribe;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        kinds: Mutex<Vec<EventKind>>,
    }

    impl Subscribe for Recorder {
        fn on_event(&self, e: &Event) {
            self.kinds.lock().push(e.kind);
        }
    }

    fn in_flight_peak(config: ParallelConfig, jobs: usize) -> usize {
        let live = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let (l, p) = (Arc::clone(&live), Arc::clone(&peak));
        let stream = WorkerPool::new(config)
            .stream::<(), (), _>(move |submit| {
                for _ in 0..jobs {
                    let (l, p) = (Arc::clone(&l), Arc::clone(&p));
                    let res = submit.submit(move || {
                        let now = l.fetch_add(1, Ordering::SeqCst) + 1;
                        p.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(10));
                        l.fetch_sub(1, Ordering::SeqCst);
                        Ok(())
                    });
                    if res.is_err() {
                        break;
                    }
                }
            })
            .unwrap();
        assert_eq!(stream.count(), jobs);
        peak.load(Ordering::SeqCst)
    }

    #[test]
    fn test_concurrency_never_exceeds_limit() {
        let peak = in_flight_peak(ParallelConfig::new(3), 12);
        assert!(peak <= 3, "peak {peak}");
        assert!(peak >= 2, "peak {peak}");
    }

    #[test]
    fn test_queue_mode_still_bounded() {
        let cfg = ParallelConfig::new(2).with_backpressure(Backpressure::Queue);
        let peak = in_flight_peak(cfg, 8);
        assert!(peak <= 2, "peak {peak}");
    }

    #[test]
    fn test_errors_do_not_cancel_siblings() {
        let stream = WorkerPool::default()
            .limit(4)
            .stream(|submit| {
                for i in 0..20i32 {
                    let _ = submit.submit(move || if i % 5 == 0 { Err(i) } else { Ok(i) });
                }
            })
            .unwrap();
        let mut all: Vec<i32> = stream.map(|r| r.unwrap_or_else(|e| -e)).collect();
        all.sort_unstable();
        assert_eq!(all.len(), 20);
        assert_eq!(all.iter().filter(|x| **x <= 0).count(), 4);
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let stream = WorkerPool::default()
            .limit(0)
            .stream::<u8, (), _>(|submit| {
                let _ = submit.submit(|| Ok(1));
            })
            .unwrap();
        assert_eq!(stream.collect::<Vec<_>>(), vec![Ok(1)]);
    }

    #[test]
    fn test_events_started_failed_drained() {
        let rec = Arc::new(Recorder::default());
        let cfg = ParallelConfig::new(2).with_subscriber(rec.clone() as Arc<dyn Subscribe>);
        let stream = WorkerPool::new(cfg)
            .stream::<(), &'static str, _>(|submit| {
                let _ = submit.submit(|| Err("boom"));
            })
            .unwrap();
        assert_eq!(stream.count(), 1);

        let kinds = rec.kinds.lock().clone();
        assert_eq!(kinds.first(), Some(&EventKind::PoolStarted));
        assert!(kinds.contains(&EventKind::JobFailed));
        assert_eq!(kinds.last(), Some(&EventKind::PoolDrained));
    }

    #[test]
    fn test_job_panic_is_reraised_on_consumer() {
        let stream = WorkerPool::default()
            .limit(2)
            .stream::<(), (), _>(|submit| {
                let _ = submit.submit(|| panic!("job exploded"));
            })
            .unwrap();
        let caught = panic::catch_unwind(AssertUnwindSafe(move || stream.count()));
        let payload = caught.unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "job exploded");
    }
}
