use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::CmsEvent;

/// In-process event bus backed by `tokio::broadcast`.
/// Single-node; admin clients subscribe in-process.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<CmsEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event. Having no subscribers is not an error; the event is
    /// simply dropped.
    pub fn publish(&self, event: CmsEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CmsEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::MutationAction;
    use uuid::Uuid;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        let id = Uuid::new_v4();
        bus.publish(CmsEvent::created("blogPosts", id));

        let CmsEvent::Mutation(event) = rx.recv().await.unwrap();
        assert_eq!(event.collection, "blogPosts");
        assert_eq!(event.document_id, id.to_string());
        assert_eq!(event.action, MutationAction::Created);
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        let id = Uuid::new_v4();
        bus.publish(CmsEvent::deleted("media", id));

        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(CmsEvent::updated("team", Uuid::new_v4())), 0);
    }
}
