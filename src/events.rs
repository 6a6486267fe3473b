use crate::models::cart::Cart;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Default capacity of the broadcast channel backing an [`EventSender`].
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Events broadcast to interested UI regions (cart badge, checkout banner).
///
/// Cart mutations always carry the full updated cart so subscribers never
/// have to re-read storage. Subscribers must tolerate a `CartUpdated` with
/// an empty cart after checkout completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CartUpdated(Cart),
    CartCleared,
    CheckoutStarted { item_count: i32 },
    CheckoutCompleted { order_id: i64 },
    PaymentVerificationFailed { order_id: i64 },
}

/// Publish handle for storefront events.
///
/// Components receive a clone of the sender and subscribe explicitly via
/// [`EventSender::subscribe`]; there is no ambient global channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: broadcast::Sender<Event>,
}

impl EventSender {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Creates a new subscription. Every subscriber sees every event sent
    /// after the call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Sends an event, failing if there are no live subscribers.
    pub fn send(&self, event: Event) -> Result<usize, String> {
        self.sender
            .send(event)
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event; a missing audience is not an error.
    pub fn send_or_log(&self, event: Event) {
        if self.sender.send(event).is_err() {
            debug!("event dropped: no active subscribers");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventSender {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
