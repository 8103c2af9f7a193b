//! Chat endpoints
//!
//! Everything goes through `MessagingService`, which enforces the connection
//! gate and participant checks.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ServiceError,
    middleware::guards::ActingUser,
    models::{ChatSummary, Message},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct DirectChatRequest {
    pub with_user: Uuid,
    /// Omit to open the chat without sending anything
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    /// Other members; the caller is always added
    pub member_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatsResponse {
    pub chats: Vec<ChatSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub chat_id: Uuid,
    pub messages: Vec<Message>,
}

/// GET /chats
#[get("/chats")]
pub async fn list_chats(
    state: web::Data<AppState>,
    user: ActingUser,
) -> Result<HttpResponse, ServiceError> {
    let chats = state.messaging.chats_for(user.id).await?;
    Ok(HttpResponse::Ok().json(ChatsResponse {
        total: chats.len(),
        chats,
    }))
}

/// POST /chats/direct
/// Open the direct chat with a connection, optionally sending a message
#[post("/chats/direct")]
pub async fn direct(
    state: web::Data<AppState>,
    user: ActingUser,
    body: web::Json<DirectChatRequest>,
) -> Result<HttpResponse, ServiceError> {
    let body = body.into_inner();
    let chat = match body.message.as_deref() {
        Some(content) => {
            state
                .messaging
                .message_user(user.id, body.with_user, content)
                .await?
        }
        None => state.messaging.open_chat(user.id, body.with_user).await?,
    };
    Ok(HttpResponse::Ok().json(chat))
}

/// POST /chats/groups
#[post("/chats/groups")]
pub async fn create_group(
    state: web::Data<AppState>,
    user: ActingUser,
    body: web::Json<CreateGroupRequest>,
) -> Result<HttpResponse, ServiceError> {
    let chat = state
        .messaging
        .create_group(user.id, &body.member_ids, &body.name)
        .await?;
    Ok(HttpResponse::Created().json(chat))
}

/// GET /chats/{id}/messages
#[get("/chats/{id}/messages")]
pub async fn get_messages(
    state: web::Data<AppState>,
    user: ActingUser,
    chat_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let chat_id = chat_id.into_inner();
    let messages = state.messaging.history(chat_id, user.id).await?;
    Ok(HttpResponse::Ok().json(MessagesResponse { chat_id, messages }))
}

/// POST /chats/{id}/messages
#[post("/chats/{id}/messages")]
pub async fn send_message(
    state: web::Data<AppState>,
    user: ActingUser,
    chat_id: web::Path<Uuid>,
    body: web::Json<SendMessageRequest>,
) -> Result<HttpResponse, ServiceError> {
    let message = state
        .messaging
        .send(chat_id.into_inner(), user.id, &body.content)
        .await?;
    Ok(HttpResponse::Created().json(message))
}
