//! Sequence → async stream.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::thread;

use futures::Stream;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::RuntimeError;
use crate::seq::Sequence;

/// Async stream fed by a sequence running on a background thread.
///
/// Created by [`SequenceExt::into_stream`](crate::SequenceExt::into_stream).
/// The producer blocks once `capacity` elements are buffered.
pub struct SeqStream<T> {
    rx: mpsc::Receiver<T>,
    token: CancellationToken,
}

impl<T: Send + 'static> SeqStream<T> {
    pub(crate) fn spawn<S>(
        seq: S,
        capacity: usize,
        token: CancellationToken,
    ) -> Result<Self, RuntimeError>
    where
        S: Sequence<Item = T> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let token = token.child_token();
        let producer_token = token.clone();

        thread::Builder::new()
            .name("lazyseq-stream".to_string())
            .spawn(move || {
                seq.run(&mut |x| !producer_token.is_cancelled() && tx.blocking_send(x).is_ok());
            })
            .map_err(|e| RuntimeError::spawn("stream", e))?;

        Ok(Self { rx, token })
    }
}

impl<T> SeqStream<T> {
    /// Stops production; buffered elements remain readable.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.rx.close();
    }

    /// True once production was cancelled (by the caller's token or [`cancel`](SeqStream::cancel)).
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl<T> Stream for SeqStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        if self.token.is_cancelled() {
            // Unblocks a producer waiting for capacity.
            self.rx.close();
        }
        self.rx.poll_recv(cx)
    }
}

impl<T> Drop for SeqStream<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
