use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ServiceError, middleware::guards::ActingUser, models::Post, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ContentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Restrict to one author's posts
    pub author: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
    pub total: usize,
}

/// GET /feed
#[get("/feed")]
pub async fn get_feed(
    state: web::Data<AppState>,
    _user: ActingUser,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse, ServiceError> {
    let posts = match query.author {
        Some(author) => state.feed.posts_by(author).await,
        None => state.feed.feed().await,
    };
    Ok(HttpResponse::Ok().json(FeedResponse {
        total: posts.len(),
        posts,
    }))
}

/// POST /posts
#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: ActingUser,
    body: web::Json<ContentRequest>,
) -> Result<HttpResponse, ServiceError> {
    let post = state.feed.add_post(user.id, &body.content).await?;
    Ok(HttpResponse::Created().json(post))
}

/// POST /posts/{id}/comments
#[post("/posts/{id}/comments")]
pub async fn add_comment(
    state: web::Data<AppState>,
    user: ActingUser,
    post_id: web::Path<Uuid>,
    body: web::Json<ContentRequest>,
) -> Result<HttpResponse, ServiceError> {
    let comment = state
        .feed
        .add_comment(post_id.into_inner(), user.id, &body.content)
        .await?;
    Ok(HttpResponse::Created().json(comment))
}
