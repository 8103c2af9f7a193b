use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::priority;

/// Domain events enumeration covering every store mutation
///
/// This enum provides a type-safe way to work with change notifications,
/// ensuring consistent event handling and priority assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    // ============================================================================
    // DIRECTORY EVENTS
    // ============================================================================
    UserRegistered {
        user_id: Uuid,
        email: String,
        display_name: String,
        registered_at: DateTime<Utc>,
    },

    ProfileUpdated {
        user_id: Uuid,
        display_name: String,
        major: String,
        updated_at: DateTime<Utc>,
    },

    // ============================================================================
    // CONNECTION EVENTS
    // ============================================================================
    ConnectionAdded {
        user_a: Uuid,
        user_b: Uuid,
        created_at: DateTime<Utc>,
    },

    ConnectionRemoved {
        user_a: Uuid,
        user_b: Uuid,
        removed_at: DateTime<Utc>,
    },

    // ============================================================================
    // MESSAGING EVENTS
    // ============================================================================
    ChatCreated {
        chat_id: Uuid,
        participant_ids: Vec<Uuid>,
        is_group: bool,
        group_name: Option<String>,
        created_at: DateTime<Utc>,
    },

    MessageAppended {
        message_id: Uuid,
        chat_id: Uuid,
        sender_id: Uuid,
        sequence_number: u64,
        content: String,
        created_at: DateTime<Utc>,
    },

    // ============================================================================
    // FEED EVENTS
    // ============================================================================
    PostCreated {
        post_id: Uuid,
        author_id: Uuid,
        content: String,
        created_at: DateTime<Utc>,
    },

    CommentAdded {
        comment_id: Uuid,
        post_id: Uuid,
        author_id: Uuid,
        content: String,
        created_at: DateTime<Utc>,
    },

    // ============================================================================
    // EVENT STORE EVENTS
    // ============================================================================
    EventCreated {
        event_id: Uuid,
        creator_id: Uuid,
        title: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    },

    AttendeeJoined {
        event_id: Uuid,
        user_id: Uuid,
        joined_at: DateTime<Utc>,
    },

    AttendeeLeft {
        event_id: Uuid,
        user_id: Uuid,
        left_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Get the aggregate ID for this event
    pub fn aggregate_id(&self) -> Uuid {
        match self {
            DomainEvent::UserRegistered { user_id, .. }
            | DomainEvent::ProfileUpdated { user_id, .. } => *user_id,

            // Connection events - keyed by the initiating side
            DomainEvent::ConnectionAdded { user_a, .. }
            | DomainEvent::ConnectionRemoved { user_a, .. } => *user_a,

            // Messaging events - keyed by chat for ordering
            DomainEvent::ChatCreated { chat_id, .. }
            | DomainEvent::MessageAppended { chat_id, .. } => *chat_id,

            // Comments share the post key so a thread stays ordered
            DomainEvent::PostCreated { post_id, .. }
            | DomainEvent::CommentAdded { post_id, .. } => *post_id,

            DomainEvent::EventCreated { event_id, .. }
            | DomainEvent::AttendeeJoined { event_id, .. }
            | DomainEvent::AttendeeLeft { event_id, .. } => *event_id,
        }
    }

    /// Get the event type string for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::UserRegistered { .. } => "UserRegistered",
            DomainEvent::ProfileUpdated { .. } => "ProfileUpdated",
            DomainEvent::ConnectionAdded { .. } => "ConnectionAdded",
            DomainEvent::ConnectionRemoved { .. } => "ConnectionRemoved",
            DomainEvent::ChatCreated { .. } => "ChatCreated",
            DomainEvent::MessageAppended { .. } => "MessageAppended",
            DomainEvent::PostCreated { .. } => "PostCreated",
            DomainEvent::CommentAdded { .. } => "CommentAdded",
            DomainEvent::EventCreated { .. } => "EventCreated",
            DomainEvent::AttendeeJoined { .. } => "AttendeeJoined",
            DomainEvent::AttendeeLeft { .. } => "AttendeeLeft",
        }
    }

    /// Get the priority for this event
    pub fn priority(&self) -> u8 {
        match self {
            DomainEvent::MessageAppended { .. } => priority::CRITICAL,

            DomainEvent::ChatCreated { .. }
            | DomainEvent::ConnectionAdded { .. }
            | DomainEvent::PostCreated { .. }
            | DomainEvent::CommentAdded { .. }
            | DomainEvent::EventCreated { .. } => priority::HIGH,

            DomainEvent::ProfileUpdated { .. }
            | DomainEvent::ConnectionRemoved { .. }
            | DomainEvent::AttendeeJoined { .. }
            | DomainEvent::AttendeeLeft { .. } => priority::NORMAL,

            DomainEvent::UserRegistered { .. } => priority::LOW,
        }
    }

    /// Check if this event changes what the feed tab shows
    pub fn affects_feed(&self) -> bool {
        matches!(
            self,
            DomainEvent::PostCreated { .. } | DomainEvent::CommentAdded { .. }
        )
    }

    /// Users whose own views (chat list, connections) change because of this event
    pub fn affected_users(&self) -> Vec<Uuid> {
        match self {
            DomainEvent::UserRegistered { user_id, .. }
            | DomainEvent::ProfileUpdated { user_id, .. } => vec![*user_id],
            DomainEvent::ConnectionAdded { user_a, user_b, .. }
            | DomainEvent::ConnectionRemoved { user_a, user_b, .. } => vec![*user_a, *user_b],
            DomainEvent::ChatCreated {
                participant_ids, ..
            } => participant_ids.clone(),
            DomainEvent::AttendeeJoined { user_id, .. }
            | DomainEvent::AttendeeLeft { user_id, .. } => vec![*user_id],
            DomainEvent::EventCreated { creator_id, .. } => vec![*creator_id],
            DomainEvent::MessageAppended { .. }
            | DomainEvent::PostCreated { .. }
            | DomainEvent::CommentAdded { .. } => Vec::new(),
        }
    }
}
