//! Typed publish/subscribe fan-out backing `on`/`once`/`off` (spec §2, §9).
//!
//! Each of [`crate::connection::Connection`], [`crate::session::Session`] and
//! [`crate::handle::Handle`] owns one `EventBus<E>` where `E` is its closed
//! event enum (`ConnectionEvent`, `SessionEvent`, `HandleEvent`). Subscribers
//! observe events in frame-dispatch order because `broadcast::Sender::send`
//! is a synchronous enqueue, not a spawn.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct EventBus<E> {
    sender: broadcast::Sender<E>,
}

impl<E: Clone + Send + 'static> EventBus<E> {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publishes `event` to every current subscriber. Never blocks; a
    /// subscriber with no room left in its buffer misses the oldest entry
    /// rather than stalling the dispatch loop.
    pub(crate) fn emit(&self, event: E) {
        let _ = self.sender.send(event);
    }

    /// Raw subscription, for callers that want to `.await` on a stream of
    /// events themselves instead of registering a callback.
    pub fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }

    /// Registers `callback` for every future event until the returned
    /// [`Subscription`] is dropped or `.off()`'d.
    pub fn on<F>(&self, mut callback: F) -> Subscription
    where
        F: FnMut(E) + Send + 'static,
    {
        let mut rx = self.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => callback(event),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Subscription { handle }
    }

    /// Registers `callback` for exactly the next event, then unsubscribes.
    pub fn once<F>(&self, callback: F) -> Subscription
    where
        F: FnOnce(E) + Send + 'static,
    {
        let mut rx = self.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        callback(event);
                        break;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Subscription { handle }
    }
}

impl<E: Clone + Send + 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered `on`/`once` callback. Dropping it is equivalent to
/// calling [`Subscription::off`].
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Unsubscribes; the callback will not be invoked again.
    pub fn off(self) {
        self.handle.abort();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn on_receives_every_event() {
        let bus: EventBus<u32> = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let _sub = bus.on(move |event| seen_clone.lock().unwrap().push(event));

        bus.emit(1);
        bus.emit(2);
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn once_fires_a_single_time() {
        let bus: EventBus<u32> = EventBus::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        let _sub = bus.once(move |_| *count_clone.lock().unwrap() += 1);

        bus.emit(1);
        bus.emit(2);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn off_stops_delivery() {
        let bus: EventBus<u32> = EventBus::new();
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        let sub = bus.on(move |_| *count_clone.lock().unwrap() += 1);
        sub.off();

        bus.emit(1);
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        assert_eq!(*count.lock().unwrap(), 0);
    }
}
