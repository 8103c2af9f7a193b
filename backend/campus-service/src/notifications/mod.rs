use event_schema::{DomainEvent, EventEnvelope};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    RwLock,
};
use uuid::Uuid;

pub mod topic;

pub use topic::Topic;

pub type Notification = EventEnvelope<DomainEvent>;

const SOURCE: &str = "campus-service";

/// Unique identifier for a subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

struct Subscriber {
    id: SubscriberId,
    sender: UnboundedSender<Notification>,
}

/// Change notification hub
///
/// Stores publish a [`DomainEvent`] after every mutation. Presentation layers
/// either subscribe to a [`Topic`] or poll [`NotificationHub::version`], which
/// increases by one per published event.
#[derive(Default, Clone)]
pub struct NotificationHub {
    // topic -> list of subscribers
    inner: Arc<RwLock<HashMap<Topic, Vec<Subscriber>>>>,
    version: Arc<AtomicU64>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current change version; 0 until the first event is published
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Add a subscriber to a topic
    ///
    /// Returns the id used for [`NotificationHub::remove_subscriber`] and the
    /// channel that receives notifications.
    pub async fn add_subscriber(
        &self,
        topic: Topic,
    ) -> (SubscriberId, UnboundedReceiver<Notification>) {
        let (tx, rx) = unbounded_channel();
        let subscriber_id = SubscriberId::new();

        let mut guard = self.inner.write().await;
        guard.entry(topic).or_default().push(Subscriber {
            id: subscriber_id,
            sender: tx,
        });

        tracing::debug!(
            ?topic,
            ?subscriber_id,
            total = guard.get(&topic).map(|v| v.len()).unwrap_or(0),
            "added subscriber"
        );

        (subscriber_id, rx)
    }

    /// Remove a specific subscriber from a topic
    pub async fn remove_subscriber(&self, topic: Topic, subscriber_id: SubscriberId) {
        let mut guard = self.inner.write().await;

        if let Some(subscribers) = guard.get_mut(&topic) {
            subscribers.retain(|s| s.id != subscriber_id);
            if subscribers.is_empty() {
                guard.remove(&topic);
            }
        }
    }

    /// Publish an event to every interested topic
    ///
    /// Dead subscribers (dropped receivers) are cleaned up on the way.
    /// Returns the new version.
    pub async fn publish(&self, event: DomainEvent) -> u64 {
        let topics = Topic::for_event(&event);

        // Versions are assigned under the write lock so delivery order matches them
        let mut guard = self.inner.write().await;
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let envelope = EventEnvelope::new(SOURCE, event).with_sequence(version);

        for topic in topics {
            let Some(subscribers) = guard.get_mut(&topic) else {
                continue;
            };

            let before = subscribers.len();
            subscribers.retain(|subscriber| subscriber.sender.send(envelope.clone()).is_ok());
            let after = subscribers.len();

            if before != after {
                tracing::debug!(
                    ?topic,
                    dead = before - after,
                    active = after,
                    "cleaned up dead subscribers"
                );
            }
            if subscribers.is_empty() {
                guard.remove(&topic);
            }
        }

        tracing::trace!(
            version,
            event_type = envelope.data.event_type(),
            aggregate_id = %envelope.data.aggregate_id(),
            priority = envelope.data.priority(),
            "published change"
        );
        version
    }

    /// Get subscriber count for a topic (for debugging/metrics)
    pub async fn subscriber_count(&self, topic: Topic) -> usize {
        let guard = self.inner.read().await;
        guard.get(&topic).map(|v| v.len()).unwrap_or(0)
    }
}
