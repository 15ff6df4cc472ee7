//! Channel → sequence.

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::result::ResultSeq;
use crate::seq::Sequence;

/// One-shot sequence over a tokio `mpsc` receiver. Created by [`from_channel`].
pub struct ChannelSource<T> {
    rx: Mutex<mpsc::Receiver<T>>,
}

/// Builds a sequence that yields whatever an external producer sends, until
/// every sender is dropped.
///
/// ```rust
/// use lazyseq::{from_channel, SequenceExt};
/// use tokio::sync::mpsc;
///
/// let (tx, rx) = mpsc::channel(4);
/// std::thread::spawn(move || {
///     for i in 0..3 {
///         tx.blocking_send(i).unwrap();
///     }
/// });
/// assert_eq!(from_channel(rx).to_vec(), vec![0, 1, 2]);
/// ```
pub fn from_channel<T>(rx: mpsc::Receiver<T>) -> ChannelSource<T> {
    ChannelSource { rx: Mutex::new(rx) }
}

/// Like [`from_channel`] for envelopes, stopping after the first `Err`.
pub fn from_result_channel<T, E>(rx: mpsc::Receiver<Result<T, E>>) -> ResultSeq<ChannelSource<Result<T, E>>> {
    ResultSeq::new(from_channel(rx))
}

impl<T> Sequence for ChannelSource<T> {
    type Item = T;

    fn run(&self, sink: &mut dyn FnMut(T) -> bool) -> bool {
        let mut rx = self.rx.lock();
        while let Some(x) = rx.blocking_recv() {
            if !sink(x) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceExt;

    #[test]
    fn test_resumes_after_early_stop() {
        let (tx, rx) = mpsc::channel(8);
        for i in 1..=5 {
            tx.try_send(i).unwrap();
        }
        drop(tx);

        let src = from_channel(rx);
        assert_eq!((&src).take(2).to_vec(), vec![1, 2]);
        assert_eq!(src.to_vec(), vec![3, 4, 5]);
        assert!(src.to_vec().is_empty());
    }

    #[test]
    fn test_result_channel_short_circuits() {
        let (tx, rx) = mpsc::channel(8);
        tx.try_send(Ok(1)).unwrap();
        tx.try_send(Err("broken")).unwrap();
        tx.try_send(Ok(2)).unwrap();
        drop(tx);

        let src = from_result_channel(rx);
        let got = src.collect::<Vec<i32>>();
        assert_eq!(got.ok(), &vec![1]);
        assert_eq!(got.err(), Some(&"broken"));
    }

    #[test]
    fn test_fed_from_another_thread() {
        let (tx, rx) = mpsc::channel(1);
        let feeder = std::thread::spawn(move || {
            for i in 0..100u32 {
                if tx.blocking_send(i).is_err() {
                    break;
                }
            }
        });
        let sum = from_channel(rx).fold(0u32, |a, x| a + x);
        feeder.join().unwrap();
        assert_eq!(sum, 4950);
    }
}
