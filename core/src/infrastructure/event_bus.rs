// Event Bus Implementation - Pub/Sub for Domain Events
//
// Provides in-memory event streaming using tokio broadcast channels.
// Use cases publish after their state transition persisted; subscribers
// (the email notifier, SSE endpoints in the outer layer) react without
// being part of the transition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::events::{AccountEvent, EngagementEvent, OnboardingEvent};

/// Unified domain event type for the event bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    Account(AccountEvent),
    Onboarding(OnboardingEvent),
    Engagement(EngagementEvent),
}

/// Event bus for publishing and subscribing to domain events
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity. Capacity
    /// bounds how many events buffer before old ones are dropped.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender: Arc::new(sender) }
    }

    /// Create event bus with default capacity (1000)
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    pub fn publish_account_event(&self, event: AccountEvent) {
        self.publish(DomainEvent::Account(event));
    }

    pub fn publish_onboarding_event(&self, event: OnboardingEvent) {
        self.publish(DomainEvent::Onboarding(event));
    }

    pub fn publish_engagement_event(&self, event: EngagementEvent) {
        self.publish(DomainEvent::Engagement(event));
    }

    fn publish(&self, event: DomainEvent) {
        debug!("Publishing event: {:?}", event);

        // send() returns the number of receivers that got the message.
        let receiver_count = self.sender.send(event).unwrap_or(0);
        if receiver_count == 0 {
            debug!("No subscribers listening to event");
        }
    }

    /// Subscribe to all domain events
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver { receiver: self.sender.subscribe() }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Receiver for all domain events
pub struct EventReceiver {
    receiver: broadcast::Receiver<DomainEvent>,
}

impl EventReceiver {
    /// Receive the next event (blocks until one is available)
    pub async fn recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => EventBusError::Closed,
            broadcast::error::RecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }
}

/// Errors that can occur when receiving events
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::restaurant::RestaurantId;
    use crate::domain::user::UserId;
    use chrono::Utc;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = EventBus::new(10);
        let mut receiver = bus.subscribe();

        let client_id = UserId::new();
        bus.publish_engagement_event(EngagementEvent::FavoriteAdded {
            client_id,
            restaurant_id: RestaurantId::new(),
            likes_count: 1,
            at: Utc::now(),
        });

        match receiver.recv().await.unwrap() {
            DomainEvent::Engagement(EngagementEvent::FavoriteAdded { client_id: id, .. }) => {
                assert_eq!(id, client_id);
            }
            other => panic!("wrong event type received: {other:?}"),
        }
    }

    #[tokio::test]
    async fn multiple_subscribers_each_receive() {
        let bus = EventBus::new(10);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish_account_event(AccountEvent::UserDeleted {
            user_id: UserId::new(),
            deleted_by: UserId::new(),
            deleted_at: Utc::now(),
        });

        first.recv().await.unwrap();
        second.recv().await.unwrap();
    }

    #[test]
    fn try_recv_reports_empty() {
        let bus = EventBus::new(4);
        let mut receiver = bus.subscribe();
        assert!(matches!(receiver.try_recv(), Err(EventBusError::Empty)));
    }
}
