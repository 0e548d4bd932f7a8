//! Typed publish/subscribe bus for panel signals.
//!
//! Replaces the string-keyed notification-center pattern: publishers send
//! [`PanelEvent`] values, subscribers hold an [`EventSubscription`] whose
//! drop is the deregistration. There is no separate remove call to forget.

use tokio::sync::broadcast;

use crate::types::events::PanelEvent;

const DEFAULT_BUS_CAPACITY: usize = 32;

/// Broadcast bus carrying [`PanelEvent`] values to any number of subscribers.
///
/// Cloning the bus clones the sending side; all clones feed the same
/// subscribers.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PanelEvent>,
}

impl EventBus {
    /// Creates a bus with the default buffer capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    /// Creates a bus buffering up to `capacity` undelivered events per
    /// subscriber before older ones are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Returns the number of subscribers the event was delivered to.
    /// An event published with no subscribers is silently dropped.
    pub fn publish(&self, event: PanelEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Registers a new subscriber. Events published before this call are
    /// not delivered to it.
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered subscription. Dropping it deregisters the subscriber.
pub struct EventSubscription {
    rx: broadcast::Receiver<PanelEvent>,
}

impl EventSubscription {
    /// Waits for the next event.
    ///
    /// Returns `None` once every sender is gone. A subscriber that fell
    /// behind the buffer skips the lost events and keeps receiving.
    pub async fn next(&mut self) -> Option<PanelEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    log::debug!("event subscriber lagged, skipped {} events", missed);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
