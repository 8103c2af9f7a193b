//! Messaging boundary
//!
//! Every path into the conversation store that a user can trigger goes
//! through here. Direct chats require the two users to be connected; group
//! creation requires the creator to be connected to every other member.
//!
//! A graph read guard is held from the connection check until the chat write
//! finishes, so a concurrent disconnect lands either before the check or
//! after the write.

use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Chat, ChatSummary, Message, User};
use crate::services::connection_graph::{ConnectionGraph, GraphReadGuard};
use crate::services::conversation_store::ConversationStore;
use crate::services::directory::Directory;

#[derive(Clone)]
pub struct MessagingService {
    directory: Arc<Directory>,
    graph: Arc<ConnectionGraph>,
    conversations: Arc<ConversationStore>,
}

impl MessagingService {
    pub fn new(
        directory: Arc<Directory>,
        graph: Arc<ConnectionGraph>,
        conversations: Arc<ConversationStore>,
    ) -> Self {
        Self {
            directory,
            graph,
            conversations,
        }
    }

    pub async fn connect(&self, user_id: Uuid, other_id: Uuid) -> ServiceResult<bool> {
        self.directory.ensure_exist(&[user_id, other_id]).await?;
        self.graph.connect(user_id, other_id).await
    }

    pub async fn disconnect(&self, user_id: Uuid, other_id: Uuid) -> ServiceResult<bool> {
        self.directory.ensure_exist(&[user_id, other_id]).await?;
        Ok(self.graph.disconnect(user_id, other_id).await)
    }

    pub async fn is_connected(&self, user_id: Uuid, other_id: Uuid) -> ServiceResult<bool> {
        self.directory.ensure_exist(&[user_id, other_id]).await?;
        Ok(self.graph.is_connected(user_id, other_id).await)
    }

    /// Directory record with its connection set filled from the graph
    pub async fn profile(&self, user_id: Uuid) -> ServiceResult<User> {
        let mut user = self.directory.get(user_id).await?;
        user.connections = self.graph.connections_of(user_id).await;
        Ok(user)
    }

    /// Send a direct message, creating the chat on first contact
    pub async fn message_user(
        &self,
        sender: Uuid,
        recipient: Uuid,
        content: &str,
    ) -> ServiceResult<Chat> {
        let _graph = self.gate_direct(sender, recipient).await?;
        self.conversations
            .create_or_append(recipient, sender, Some(content))
            .await
    }

    /// Open (or reopen) the direct chat without sending anything
    pub async fn open_chat(&self, current_user: Uuid, with_user: Uuid) -> ServiceResult<Chat> {
        let _graph = self.gate_direct(current_user, with_user).await?;
        self.conversations
            .create_or_append(with_user, current_user, None)
            .await
    }

    /// Create a group of the creator plus `members`
    pub async fn create_group(
        &self,
        creator: Uuid,
        members: &[Uuid],
        name: &str,
    ) -> ServiceResult<Chat> {
        let mut participants = Vec::with_capacity(members.len() + 1);
        participants.push(creator);
        participants.extend(members.iter().copied().filter(|id| *id != creator));

        self.directory.ensure_exist(&participants).await?;
        let graph = self.graph.read().await;
        if let Some(member) = participants[1..]
            .iter()
            .find(|member| !graph.is_connected(creator, **member))
        {
            return Err(ServiceError::NotConnected(*member));
        }

        self.conversations.create_group(&participants, name).await
    }

    /// Post into an existing chat
    ///
    /// A direct chat whose two users have since disconnected is closed for
    /// new messages; its history stays readable.
    pub async fn send(&self, chat_id: Uuid, sender: Uuid, content: &str) -> ServiceResult<Message> {
        let chat = self.conversations.get(chat_id).await?;
        if !chat.has_participant(sender) {
            return Err(ServiceError::NotParticipant(sender));
        }
        let graph = self.graph.read().await;
        if let Some(counterpart) = chat.counterpart(sender) {
            if !graph.is_connected(sender, counterpart) {
                return Err(ServiceError::NotConnected(counterpart));
            }
        }
        self.conversations.send(chat_id, sender, content).await
    }

    pub async fn chats_for(&self, user_id: Uuid) -> ServiceResult<Vec<ChatSummary>> {
        self.directory.ensure_exist(&[user_id]).await?;
        Ok(self.conversations.chats_for(user_id).await)
    }

    /// Message history, visible to participants only
    pub async fn history(&self, chat_id: Uuid, reader: Uuid) -> ServiceResult<Vec<Message>> {
        let chat = self.conversations.get(chat_id).await?;
        if !chat.has_participant(reader) {
            return Err(ServiceError::NotParticipant(reader));
        }
        Ok(chat.messages)
    }

    async fn gate_direct(
        &self,
        sender: Uuid,
        recipient: Uuid,
    ) -> ServiceResult<GraphReadGuard<'_>> {
        self.directory.ensure_exist(&[sender, recipient]).await?;
        if sender == recipient {
            return Err(ServiceError::InvalidInput(
                "cannot open a chat with yourself".to_string(),
            ));
        }
        let graph = self.graph.read().await;
        if !graph.is_connected(sender, recipient) {
            tracing::debug!(sender = %sender, recipient = %recipient, "message rejected: not connected");
            return Err(ServiceError::NotConnected(recipient));
        }
        Ok(graph)
    }
}
