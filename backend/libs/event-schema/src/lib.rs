//! Event schema for every change published by the campus services
//!
//! Store mutations are announced as versioned envelopes so presentation layers
//! and other consumers can react without coupling to a UI framework.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Domain events enumeration
pub mod events;

pub use events::DomainEvent;

/// Current schema version for all events
pub const SCHEMA_VERSION: u32 = 1;

/// Delivery priority buckets
pub mod priority {
    /// User-facing realtime traffic (new messages)
    pub const CRITICAL: u8 = 0;
    /// Direct user actions (connections, chats, posts)
    pub const HIGH: u8 = 1;
    /// Updates and modifications
    pub const NORMAL: u8 = 2;
    /// Housekeeping that can be eventual
    pub const LOW: u8 = 3;
}

/// Base event envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope<T> {
    /// Unique event ID for idempotency and tracing
    pub event_id: Uuid,
    /// Event timestamp
    pub timestamp: DateTime<Utc>,
    /// Schema version for compatibility checking
    pub schema_version: u32,
    /// Source service that generated the event
    pub source: String,
    /// Monotonic version of the publishing hub at the time of the event
    pub sequence: u64,
    /// Actual event payload
    pub data: T,
}

impl<T> EventEnvelope<T> {
    pub fn new(source: impl Into<String>, data: T) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            schema_version: SCHEMA_VERSION,
            source: source.into(),
            sequence: 0,
            data,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_envelope_creation() {
        let event = DomainEvent::UserRegistered {
            user_id: Uuid::new_v4(),
            email: "test@mylaurier.ca".to_string(),
            display_name: "Test User".to_string(),
            registered_at: Utc::now(),
        };

        let envelope = EventEnvelope::new("campus-service", event).with_sequence(7);
        assert_eq!(envelope.schema_version, SCHEMA_VERSION);
        assert_eq!(envelope.source, "campus-service");
        assert_eq!(envelope.sequence, 7);
    }

    #[test]
    fn test_envelope_json_carries_event_tag() {
        let envelope = EventEnvelope::new(
            "campus-service",
            DomainEvent::ConnectionRemoved {
                user_a: Uuid::new_v4(),
                user_b: Uuid::new_v4(),
                removed_at: Utc::now(),
            },
        );

        let json = serde_json::to_string(&envelope).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"]["type"], "ConnectionRemoved");
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
    }
}
