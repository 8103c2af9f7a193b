//! Conversation store
//!
//! Locking discipline:
//! - `index` guards chat lookup and creation. Direct chats are keyed by their
//!   sorted participant pair, so two users messaging each other for the first
//!   time at once still end up with a single chat.
//! - every chat has its own lock; appends to one chat are serialised there and
//!   never block other chats.
//! - readers clone a snapshot under the chat's read lock.
//!
//! The index lock is never held while waiting on a chat lock.

use chrono::{DateTime, Utc};
use event_schema::DomainEvent;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Chat, ChatSummary, Message};
use crate::notifications::NotificationHub;
use crate::validators;

/// Lookup key for a one-to-one chat, independent of who started it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectKey(Uuid, Uuid);

impl DirectKey {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

#[derive(Default)]
struct ChatIndex {
    chats: HashMap<Uuid, Arc<RwLock<Chat>>>,
    direct: HashMap<DirectKey, Uuid>,
}

pub struct ConversationStore {
    index: RwLock<ChatIndex>,
    notifications: NotificationHub,
    max_message_chars: usize,
}

impl ConversationStore {
    pub fn new(notifications: NotificationHub, max_message_chars: usize) -> Self {
        Self {
            index: RwLock::new(ChatIndex::default()),
            notifications,
            max_message_chars,
        }
    }

    /// Find the direct chat between `current_user` and `with_user`, creating it
    /// when absent, and append `message` when one is given
    pub async fn create_or_append(
        &self,
        with_user: Uuid,
        current_user: Uuid,
        message: Option<&str>,
    ) -> ServiceResult<Chat> {
        if with_user == current_user {
            return Err(ServiceError::InvalidInput(
                "cannot open a chat with yourself".to_string(),
            ));
        }
        let content = message
            .map(|m| self.validate_content(m))
            .transpose()?;

        let key = DirectKey::new(current_user, with_user);
        let existing = {
            let index = self.index.read().await;
            index
                .direct
                .get(&key)
                .and_then(|id| index.chats.get(id))
                .cloned()
        };

        let chat = match existing {
            Some(chat) => chat,
            None => {
                let (chat, created) = self.get_or_create_direct(key, current_user, with_user).await;
                if let Some(created) = created {
                    self.announce_created(&created).await;
                }
                chat
            }
        };

        match content {
            Some(content) => {
                let mut guard = chat.write().await;
                let message = push_message(&mut guard, current_user, content);
                self.announce_message(&message).await;
                Ok(guard.clone())
            }
            None => Ok(chat.read().await.clone()),
        }
    }

    /// Double-checked creation under the index write lock
    ///
    /// The second tuple element is a snapshot of the chat when this call
    /// created it.
    async fn get_or_create_direct(
        &self,
        key: DirectKey,
        current_user: Uuid,
        with_user: Uuid,
    ) -> (Arc<RwLock<Chat>>, Option<Chat>) {
        let mut index = self.index.write().await;
        if let Some(chat) = index.direct.get(&key).and_then(|id| index.chats.get(id)) {
            return (chat.clone(), None);
        }

        let now = Utc::now();
        let chat = Chat {
            id: Uuid::new_v4(),
            participants: vec![current_user, with_user],
            is_group: false,
            group_name: None,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let snapshot = chat.clone();
        let handle = Arc::new(RwLock::new(chat));
        index.direct.insert(key, snapshot.id);
        index.chats.insert(snapshot.id, handle.clone());

        tracing::info!(chat_id = %snapshot.id, user_id = %current_user, with_user = %with_user, "direct chat created");
        (handle, Some(snapshot))
    }

    /// Create a named group chat
    ///
    /// Participants are deduplicated by id, keeping first-seen order.
    pub async fn create_group(&self, participants: &[Uuid], name: &str) -> ServiceResult<Chat> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidGroup(
                "group name must not be empty".to_string(),
            ));
        }

        let mut members: Vec<Uuid> = Vec::with_capacity(participants.len());
        for id in participants {
            if !members.contains(id) {
                members.push(*id);
            }
        }
        if members.len() < 2 {
            return Err(ServiceError::InvalidGroup(format!(
                "a group needs at least 2 participants, got {}",
                members.len()
            )));
        }

        let now = Utc::now();
        let chat = Chat {
            id: Uuid::new_v4(),
            participants: members,
            is_group: true,
            group_name: Some(name.to_string()),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.index
            .write()
            .await
            .chats
            .insert(chat.id, Arc::new(RwLock::new(chat.clone())));

        tracing::info!(
            chat_id = %chat.id,
            participants = chat.participants.len(),
            "group chat created"
        );
        self.announce_created(&chat).await;

        Ok(chat)
    }

    /// Append a message to an existing chat
    pub async fn send(&self, chat_id: Uuid, sender: Uuid, content: &str) -> ServiceResult<Message> {
        let content = self.validate_content(content)?;
        let chat = self.handle(chat_id).await?;

        let mut guard = chat.write().await;
        if !guard.has_participant(sender) {
            return Err(ServiceError::NotParticipant(sender));
        }
        let message = push_message(&mut guard, sender, content);
        self.announce_message(&message).await;

        tracing::debug!(
            chat_id = %chat_id,
            sender_id = %sender,
            sequence_number = message.sequence_number,
            "message appended"
        );
        Ok(message)
    }

    pub async fn get(&self, chat_id: Uuid) -> ServiceResult<Chat> {
        let chat = self.handle(chat_id).await?;
        let snapshot = chat.read().await.clone();
        Ok(snapshot)
    }

    /// Message history in append order
    pub async fn messages(&self, chat_id: Uuid) -> ServiceResult<Vec<Message>> {
        let chat = self.handle(chat_id).await?;
        let messages = chat.read().await.messages.clone();
        Ok(messages)
    }

    /// Chats the user takes part in, most recently active first
    pub async fn chats_for(&self, user_id: Uuid) -> Vec<ChatSummary> {
        let handles: Vec<Arc<RwLock<Chat>>> =
            self.index.read().await.chats.values().cloned().collect();

        let mut summaries = Vec::new();
        for handle in handles {
            let chat = handle.read().await;
            if chat.has_participant(user_id) {
                summaries.push(chat.summary());
            }
        }

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        summaries
    }

    pub async fn chat_count(&self) -> usize {
        self.index.read().await.chats.len()
    }

    async fn handle(&self, chat_id: Uuid) -> ServiceResult<Arc<RwLock<Chat>>> {
        self.index
            .read()
            .await
            .chats
            .get(&chat_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("chat", chat_id))
    }

    fn validate_content(&self, content: &str) -> ServiceResult<String> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::EmptyContent);
        }
        validators::require_max_chars("message", trimmed, self.max_message_chars)?;
        Ok(trimmed.to_string())
    }

    async fn announce_created(&self, chat: &Chat) {
        self.notifications
            .publish(DomainEvent::ChatCreated {
                chat_id: chat.id,
                participant_ids: chat.participants.clone(),
                is_group: chat.is_group,
                group_name: chat.group_name.clone(),
                created_at: chat.created_at,
            })
            .await;
    }

    async fn announce_message(&self, message: &Message) {
        self.notifications
            .publish(DomainEvent::MessageAppended {
                message_id: message.id,
                chat_id: message.chat_id,
                sender_id: message.sender_id,
                sequence_number: message.sequence_number,
                content: message.content.clone(),
                created_at: message.created_at,
            })
            .await;
    }
}

/// Append under the caller's chat write guard
///
/// Timestamps never go backwards within a chat, so timestamp order always
/// equals append order even if the wall clock steps back.
fn push_message(chat: &mut Chat, sender: Uuid, content: String) -> Message {
    let now = Utc::now();
    let created_at: DateTime<Utc> = match chat.messages.last() {
        Some(last) if last.created_at > now => last.created_at,
        _ => now,
    };

    let message = Message {
        id: Uuid::new_v4(),
        chat_id: chat.id,
        sender_id: sender,
        content,
        sequence_number: chat.messages.len() as u64 + 1,
        created_at,
        is_group_message: chat.is_group,
        group_id: chat.is_group.then_some(chat.id),
    };

    chat.messages.push(message.clone());
    chat.updated_at = created_at;
    message
}
