//! Change notification streams.
//!
//! Every applied write publishes one `ChangeEvent` to each subscriber using a
//! bounded channel and a non-blocking send, so a slow subscriber never stalls
//! a write.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::Value;

/// Unique identifier for a change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One applied selection change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// Monotonic per-store sequence number, starting at 1.
    pub sequence: u64,
    /// Decision that changed.
    pub id: String,
    /// Value before the write (`None` while populating defaults).
    pub previous: Option<Value>,
    /// Value after the write.
    pub current: Value,
    pub at: DateTime<Utc>,
}

/// A subscription stream for change events.
///
/// Dropping the stream detaches it; the store prunes it on the next publish.
#[derive(Debug)]
pub struct ChangeStream {
    subscription_id: SubscriptionId,
    rx: Receiver<ChangeEvent>,
}

impl ChangeStream {
    /// The subscription id backing this stream.
    #[must_use]
    pub const fn subscription_id(&self) -> SubscriptionId {
        self.subscription_id
    }

    /// Next buffered event, without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<ChangeEvent> {
        self.rx.try_recv().ok()
    }

    /// Next event, waiting at most `timeout`.
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ChangeEvent> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// All buffered events, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.rx.try_iter().collect()
    }
}

#[derive(Debug)]
pub(crate) struct ChangeNotifier {
    capacity: usize,
    subscribers: Vec<(SubscriptionId, Sender<ChangeEvent>)>,
    sequence: u64,
    dropped_events: u64,
}

impl ChangeNotifier {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            subscribers: Vec::new(),
            sequence: 0,
            dropped_events: 0,
        }
    }

    pub(crate) fn subscribe(&mut self) -> ChangeStream {
        let subscription_id = SubscriptionId::new();
        let (tx, rx) = bounded::<ChangeEvent>(self.capacity);
        self.subscribers.push((subscription_id, tx));
        ChangeStream { subscription_id, rx }
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub(crate) fn publish(&mut self, id: &str, previous: Option<Value>, current: Value) {
        self.sequence += 1;
        let event = ChangeEvent {
            sequence: self.sequence,
            id: id.to_string(),
            previous,
            current,
            at: Utc::now(),
        };

        let mut dropped = 0u64;
        self.subscribers.retain(|(sub, tx)| match tx.try_send(event.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                dropped += 1;
                tracing::debug!(subscription = %sub, sequence = event.sequence, "change stream full, event dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        });
        self.dropped_events += dropped;
    }

    pub(crate) const fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) const fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
