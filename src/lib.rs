//! # lazyseq
//!
//! **lazyseq** is a lazy sequence engine for Rust.
//!
//! It provides push-style sequences with a rich combinator vocabulary, a
//! bounded worker pool, a parallel executor that fans a per-element pipeline
//! out across that pool, and a pull cursor for step-by-step consumption.
//! Containers plug in through a two-method contract: drive a callback over
//! their elements, and rebuild themselves from a finished sequence.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  container   │   │  generator   │   │ mpsc channel │
//!     │ (Iterate)    │   │ (from_fn)    │   │(from_channel)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Sequence (push contract: run(sink) ; sink returns false to stop) │
//! │  Combinators: map filter take skip chain dedup unique scan chunk  │
//! │               window group_by combinations permutations cycle ... │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               ▼
//!  ┌────────────┐   ┌──────────────────┐  ┌────────────┐  ┌──────────────┐
//!  │ terminals  │   │ Par (parallel N) │  │   Cursor   │  │  ResultSeq   │
//!  │ collect    │   │  driver thread   │  │ 1 thread + │  │ stops after  │
//!  │ fold find  │   │  WorkerPool × N  │  │ rendezvous │  │ first Err    │
//!  │ partition  │   │  fan-in unordered│  │ next/stop  │  │              │
//!  └────────────┘   └────────┬─────────┘  └─────┬──────┘  └──────────────┘
//!                            ▼                  ▼
//!                    ┌───────────────────────────────┐
//!                    │ SubscriberSet (Event stream)  │
//!                    └───────────────────────────────┘
//! ```
//!
//! ### Execution models
//! ```text
//! sequential:  source ─► stage ─► stage ─► sink          (one thread, source order)
//! parallel:    source ─► driver ─► [job × N] ─► fan-in   (completion order)
//! pull:        consumer next() ◄─► rendezvous ◄─► producer thread
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                          |
//! |-------------------|---------------------------------------------------------------|---------------------------------------------|
//! | **Sequences**     | Lazy push producers, sources, combinators, terminals.         | [`Sequence`], [`SequenceExt`]               |
//! | **Containers**    | Iterate/rebuild contract, priority container.                 | [`Iterate`], [`FromSequence`], [`PriorityQueue`] |
//! | **Worker pool**   | Bounded-concurrency jobs with an unordered result stream.     | [`WorkerPool`], [`ResultStream`]            |
//! | **Parallel**      | Per-element pipeline fanned out over N workers.               | [`Par`], [`ParallelConfig`]                 |
//! | **Pull cursor**   | `next`/`stop` over any sequence.                              | [`Cursor`]                                  |
//! | **Results**       | Fallible pipelines that stop at the first error.              | [`ResultSeq`], [`Partial`]                  |
//! | **Interop**       | tokio channels in, `futures::Stream` out.                     | [`SeqStream`], [`from_channel`]             |
//! | **Subscriber API**| Hook into pool and cursor lifecycle events.                   | [`Subscribe`], [`Event`]                    |
//! | **Errors**        | Typed errors for the background runtime.                      | [`RuntimeError`]                            |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use lazyseq::{iter, ParallelConfig, SequenceExt, TrySequenceExt};
//!
//! // Build subscribers (optional)
//! #[cfg(feature = "logging")]
//! let cfg = ParallelConfig::new(4).with_subscriber(Arc::new(lazyseq::LogWriter::default()));
//! #[cfg(not(feature = "logging"))]
//! let cfg = ParallelConfig::new(4);
//!
//! // Sequential pipeline: source order is preserved.
//! let firsts: Vec<u32> = iter(1..).filter(|x| x % 7 == 0).take(3).collect();
//! assert_eq!(firsts, vec![7, 14, 21]);
//!
//! // Parallel pipeline: same elements, completion order.
//! let mut squares: Vec<u32> = iter(1..=6u32).par_with(cfg).map(|x: u32| x * x).to_vec();
//! squares.sort_unstable();
//! assert_eq!(squares, vec![1, 4, 9, 16, 25, 36]);
//!
//! // Fallible pipeline: stops at the first error.
//! let parsed = iter(vec!["1", "2", "x", "4"])
//!     .map(|s| s.parse::<u32>())
//!     .try_seq()
//!     .collect::<Vec<u32>>();
//! assert_eq!(parsed.ok(), &vec![1, 2]);
//! assert!(parsed.err().is_some());
//! ```
mod config;
mod containers;
mod cursor;
mod error;
mod events;
mod interop;
mod par;
mod pool;
mod result;
mod seq;
mod subscribers;

// ---- Public re-exports ----

pub use config::{Backpressure, ParallelConfig};
pub use containers::{Comparator, PriorityQueue};
pub use cursor::Cursor;
pub use error::RuntimeError;
pub use events::{Event, EventKind};
pub use interop::{from_channel, from_result_channel, ChannelSource, SeqStream};
pub use par::Par;
pub use pool::{ResultStream, Submitter, WorkerPool};
pub use result::{from_results, Partial, ResultSeq, SkipOk, TrySequenceExt};
pub use seq::*;
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
