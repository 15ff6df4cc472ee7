//! # Worker pool: bounded-concurrency fan-out with an unordered result stream.
//!
//! [`WorkerPool`] runs unit-of-work closures (`FnOnce() -> Result<T, E>`) on a
//! fixed set of reusable worker threads and hands every result back through a
//! [`ResultStream`] in completion order.
//!
//! ## Architecture
//! ```text
//! WorkerPool::stream(producer)
//!   │
//!   ├─► driver thread ──► producer(&Submitter)
//!   │                        └─► submit(job) ──► [permit] ──► job queue
//!   │                                                            │
//!   ├─► worker 1 ◄──────────────────────────────────────────────┤
//!   ├─► worker 2 ◄──────────────────────────────────────────────┤
//!   └─► worker N ◄──────────────────────────────────────────────┘
//!          │ run job (panic caught), release permit
//!          ▼
//!     result queue ──► ResultStream (Iterator, completion order)
//! ```
//!
//! ## Rules
//! - At most `limit` jobs execute at once (there are exactly `limit` workers).
//! - Under [`Backpressure::Block`](crate::Backpressure::Block) `submit` also
//!   blocks while `limit` jobs are queued or running.
//! - A job returning `Err` never cancels its siblings; every result is delivered.
//! - The stream ends once the producer has returned and every job has drained.
//! - Closing (or dropping) the stream cancels submission, skips queued jobs,
//!   waits for running ones and joins every thread.
//! - A panic inside a job or the producer is re-raised on the consuming thread.
//!
//! ## Example
//! ```rust
//! use lazyseq::WorkerPool;
//!
//! let pool = WorkerPool::default().limit(3);
//! let stream = pool
//!     .stream(|submit| {
//!         for i in 0..10u32 {
//!             if submit.submit(move || if i == 4 { Err("four") } else { Ok(i) }).is_err() {
//!                 break;
//!             }
//!         }
//!     })
//!     .unwrap();
//!
//! let (ok, err): (Vec<_>, Vec<_>) = stream.partition(|r| r.is_ok());
//! assert_eq!(ok.len(), 9);
//! assert_eq!(err.len(), 1);
//! ```

mod stream;
mod submit;
mod worker;

pub use stream::ResultStream;
pub use submit::Submitter;
pub use worker::WorkerPool;
