use obs_core::Predicate;
use tokio::sync::mpsc::{Receiver, UnboundedReceiver};

/// Channel receivers that can report how many messages are queued.
pub trait Buffered {
    /// Number of messages currently waiting in the channel.
    fn buffered(&self) -> usize;
}

impl<T> Buffered for Receiver<T> {
    fn buffered(&self) -> usize {
        self.len()
    }
}

impl<T> Buffered for UnboundedReceiver<T> {
    fn buffered(&self) -> usize {
        self.len()
    }
}

/// Holds when `channel` has exactly `want` messages queued.
///
/// The queue length is sampled when the builder is called; nothing is
/// received from the channel.
pub fn channel_length<C>(channel: &C, want: usize) -> Predicate
where
    C: Buffered + ?Sized,
{
    let got = channel.buffered();
    Predicate::new(
        move || got == want,
        move || format!("expected channel buffer length {want}, got {got}"),
    )
}
