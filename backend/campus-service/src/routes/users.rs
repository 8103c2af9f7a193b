//! Directory endpoints: signup, search and profiles

use actix_web::{get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::ServiceError,
    middleware::guards::ActingUser,
    models::{NewUser, ProfileUpdate, SearchField, User},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub field: SearchField,
    /// Omit to list the whole directory
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    pub total: usize,
}

/// POST /users
/// Sign up with an institutional email
#[post("/users")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<NewUser>,
) -> Result<HttpResponse, ServiceError> {
    let user = state.directory.register(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// GET /users?field=name&q=ada
#[get("/users")]
pub async fn search(
    state: web::Data<AppState>,
    _user: ActingUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ServiceError> {
    let users = match query.q.as_deref() {
        Some(q) => state.directory.search(query.field, q).await,
        None => state.directory.all().await,
    };
    Ok(HttpResponse::Ok().json(UsersResponse {
        total: users.len(),
        users,
    }))
}

/// GET /users/{id}
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    _user: ActingUser,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let profile = state.messaging.profile(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PATCH /users/me
#[patch("/users/me")]
pub async fn update_me(
    state: web::Data<AppState>,
    user: ActingUser,
    body: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, ServiceError> {
    state
        .directory
        .update_profile(user.id, body.into_inner())
        .await?;
    let profile = state.messaging.profile(user.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
