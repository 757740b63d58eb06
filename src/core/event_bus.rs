//! Event bus for playback lifecycle notifications
//!
//! A single-producer, multicast event stream: any number of listeners may
//! subscribe, none can publish. Delivery is synchronous, in subscription
//! order, with no buffering: listeners attached after an event was
//! published never see it. The subscriber list is snapshotted before each
//! delivery round, so unsubscribing mid-round is not observed by handlers
//! still pending in that round.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Event handler trait
///
/// Implemented for free by any `Fn(&E)` closure.
pub trait EventHandler<E>: Send + Sync {
    /// Handle the event
    fn handle(&self, event: &E);

    /// Handler name for identification
    fn handler_name(&self) -> &'static str {
        "anonymous"
    }
}

impl<E, F> EventHandler<E> for F
where
    F: Fn(&E) + Send + Sync,
{
    fn handle(&self, event: &E) {
        self(event)
    }
}

/// Subscription ID, returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription<E> {
    id: SubscriptionId,
    handler: Arc<dyn EventHandler<E>>,
}

/// Publish statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishStats {
    /// Handlers invoked by the last publish
    pub delivered: usize,
    /// Currently attached subscribers
    pub subscriber_count: usize,
}

/// Multicast event bus
pub struct EventBus<E> {
    subscribers: RwLock<Vec<Subscription<E>>>,
    next_id: AtomicU64,
    event_count: AtomicU64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    /// Create a new event bus with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
            event_count: AtomicU64::new(0),
        }
    }

    /// Subscribe a handler; handlers are invoked in subscription order
    pub fn subscribe(&self, handler: Arc<dyn EventHandler<E>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap()
            .push(Subscription { id, handler });
        id
    }

    /// Subscribe a closure
    pub fn subscribe_fn<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(f))
    }

    /// Detach a subscriber; returns false if the id is unknown
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write().unwrap();
        let before = subscribers.len();
        subscribers.retain(|s| s.id != id);
        subscribers.len() != before
    }

    /// Publish an event to every currently attached subscriber
    pub fn publish(&self, event: &E) -> PublishStats {
        // Snapshot under the read lock, deliver outside it. A handler that
        // unsubscribes (itself or another) during delivery still sees the
        // full round it was part of.
        let snapshot: Vec<Arc<dyn EventHandler<E>>> = {
            let subscribers = self.subscribers.read().unwrap();
            subscribers.iter().map(|s| Arc::clone(&s.handler)).collect()
        };

        for handler in &snapshot {
            handler.handle(event);
        }

        self.event_count.fetch_add(1, Ordering::Relaxed);

        PublishStats {
            delivered: snapshot.len(),
            subscriber_count: self.subscribers.read().unwrap().len(),
        }
    }

    /// Number of currently attached subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().unwrap().len()
    }

    /// Total events published over the bus lifetime
    pub fn event_count(&self) -> u64 {
        self.event_count.load(Ordering::Relaxed)
    }
}
