use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ServiceError,
    middleware::guards::ActingUser,
    models::{Event, NewEvent},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    /// Only events that have not ended yet, soonest first
    #[serde(default)]
    pub upcoming: bool,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
    pub total: usize,
}

/// GET /events?upcoming=true
#[get("/events")]
pub async fn list_events(
    state: web::Data<AppState>,
    _user: ActingUser,
    query: web::Query<EventsQuery>,
) -> Result<HttpResponse, ServiceError> {
    let events = if query.upcoming {
        state.events.upcoming(Utc::now()).await
    } else {
        state.events.list().await
    };
    Ok(HttpResponse::Ok().json(EventsResponse {
        total: events.len(),
        events,
    }))
}

/// POST /events
/// The caller becomes creator and first attendee
#[post("/events")]
pub async fn create_event(
    state: web::Data<AppState>,
    user: ActingUser,
    body: web::Json<NewEvent>,
) -> Result<HttpResponse, ServiceError> {
    let new_event = NewEvent {
        creator_id: user.id,
        ..body.into_inner()
    };
    let event = state.events.add_event(new_event).await?;
    Ok(HttpResponse::Created().json(event))
}

/// PUT /events/{id}/attendance
#[put("/events/{id}/attendance")]
pub async fn attend(
    state: web::Data<AppState>,
    user: ActingUser,
    event_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let event = state.events.attend(event_id.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(event))
}

/// DELETE /events/{id}/attendance
#[delete("/events/{id}/attendance")]
pub async fn leave(
    state: web::Data<AppState>,
    user: ActingUser,
    event_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let event = state.events.leave(event_id.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(event))
}
