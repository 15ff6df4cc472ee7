//! Runtime events: data model.
//!
//! This module groups the event **data model** published by the background
//! machinery: worker pools (driver and workers), the parallel executor and
//! pull cursors.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//!
//! ## Quick reference
//! - **Publishers**: `WorkerPool` driver and worker threads, `ResultStream::close`,
//!   `Par` (inline fallback), `Cursor`.
//! - **Consumers**: the [`SubscriberSet`](crate::SubscriberSet) carried by
//!   [`ParallelConfig`](crate::ParallelConfig).

mod event;

pub(crate) use event::{next_resource_id, panic_message};
pub use event::{Event, EventKind};
