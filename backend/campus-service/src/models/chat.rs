use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A conversation with a fixed participant list and an append-only history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: Uuid,
    pub participants: Vec<Uuid>,
    pub is_group: bool,
    pub group_name: Option<String>,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    /// Timestamp of the latest message, or creation time for an empty chat
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }

    /// The other side of a direct chat
    pub fn counterpart(&self, user_id: Uuid) -> Option<Uuid> {
        if self.is_group {
            return None;
        }
        self.participants.iter().copied().find(|p| *p != user_id)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn summary(&self) -> ChatSummary {
        ChatSummary {
            id: self.id,
            participants: self.participants.clone(),
            is_group: self.is_group,
            group_name: self.group_name.clone(),
            message_count: self.messages.len(),
            last_message: self.last_message().cloned(),
            updated_at: self.updated_at,
        }
    }
}

/// Immutable message; `sequence_number` starts at 1 within each chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub sequence_number: u64,
    pub created_at: DateTime<Utc>,
    pub is_group_message: bool,
    pub group_id: Option<Uuid>,
}

/// Chat list row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSummary {
    pub id: Uuid,
    pub participants: Vec<Uuid>,
    pub is_group: bool,
    pub group_name: Option<String>,
    pub message_count: usize,
    pub last_message: Option<Message>,
    pub updated_at: DateTime<Utc>,
}
