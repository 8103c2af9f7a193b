use actix_web::{delete, get, put, web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ServiceError, middleware::guards::ActingUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct ConnectionStatus {
    pub user_id: Uuid,
    pub other_id: Uuid,
    pub connected: bool,
    /// Whether this request changed anything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
}

/// PUT /connections/{other}
#[put("/connections/{other}")]
pub async fn connect(
    state: web::Data<AppState>,
    user: ActingUser,
    other: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let other_id = other.into_inner();
    let changed = state.messaging.connect(user.id, other_id).await?;
    Ok(HttpResponse::Ok().json(ConnectionStatus {
        user_id: user.id,
        other_id,
        connected: true,
        changed: Some(changed),
    }))
}

/// DELETE /connections/{other}
#[delete("/connections/{other}")]
pub async fn disconnect(
    state: web::Data<AppState>,
    user: ActingUser,
    other: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let other_id = other.into_inner();
    let changed = state.messaging.disconnect(user.id, other_id).await?;
    Ok(HttpResponse::Ok().json(ConnectionStatus {
        user_id: user.id,
        other_id,
        connected: false,
        changed: Some(changed),
    }))
}

/// GET /connections/{other}
#[get("/connections/{other}")]
pub async fn is_connected(
    state: web::Data<AppState>,
    user: ActingUser,
    other: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let other_id = other.into_inner();
    let connected = state.messaging.is_connected(user.id, other_id).await?;
    Ok(HttpResponse::Ok().json(ConnectionStatus {
        user_id: user.id,
        other_id,
        connected,
        changed: None,
    }))
}
