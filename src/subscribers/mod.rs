//! # Event subscribers for the lazyseq runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and an optional built-in stdout logger.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   WorkerPool / Cursor ── emit(Event) ──► SubscriberSet
//!                                              │
//!                                         ┌────┴────┬─────────┐
//!                                         ▼         ▼         ▼
//!                                     LogWriter  Metrics   Custom
//! ```
//!
//! The set rides along inside [`ParallelConfig`](crate::ParallelConfig), so
//! every pool, parallel pipeline and cursor built from a config reports to the
//! same subscribers.

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
