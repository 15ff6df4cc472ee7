//! # Interop with asynchronous code.
//!
//! Bridges between push sequences and tokio channels:
//! - [`SeqStream`]: a sequence driven on a background thread into a bounded
//!   channel, consumed as a [`futures::Stream`].
//! - [`from_channel`] / [`from_result_channel`]: one-shot sequences fed by an
//!   external producer through a tokio `mpsc` channel.
//!
//! ## Rules
//! - Channel-backed sequences block the calling thread while waiting; run them
//!   from a plain thread or `spawn_blocking`, never directly on an async worker.
//! - A channel-backed sequence is one-shot: a run stopped early keeps the
//!   remaining elements for the next run.
//! - `SeqStream` stops production when its token fires or when it is dropped;
//!   elements already buffered are still delivered.

mod channel;
mod stream;

pub use channel::{from_channel, from_result_channel, ChannelSource};
pub use stream::SeqStream;
