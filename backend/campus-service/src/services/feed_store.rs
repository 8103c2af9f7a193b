use chrono::Utc;
use event_schema::DomainEvent;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Comment, Post};
use crate::notifications::NotificationHub;
use crate::validators;

/// Posts newest-first; each post's comments oldest-first
pub struct FeedStore {
    posts: RwLock<VecDeque<Post>>,
    notifications: NotificationHub,
    max_post_chars: usize,
}

impl FeedStore {
    pub fn new(notifications: NotificationHub, max_post_chars: usize) -> Self {
        Self {
            posts: RwLock::new(VecDeque::new()),
            notifications,
            max_post_chars,
        }
    }

    pub async fn add_post(&self, author_id: Uuid, content: &str) -> ServiceResult<Post> {
        let content = validators::require_text("post content", content)?;
        validators::require_max_chars("post content", &content, self.max_post_chars)?;

        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            content,
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        self.posts.write().await.push_front(post.clone());

        tracing::info!(post_id = %post.id, author_id = %author_id, "post created");
        self.notifications
            .publish(DomainEvent::PostCreated {
                post_id: post.id,
                author_id,
                content: post.content.clone(),
                created_at: post.created_at,
            })
            .await;

        Ok(post)
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> ServiceResult<Comment> {
        let content = validators::require_text("comment content", content)?;
        validators::require_max_chars("comment content", &content, self.max_post_chars)?;

        let comment = {
            let mut posts = self.posts.write().await;
            let post = posts
                .iter_mut()
                .find(|p| p.id == post_id)
                .ok_or_else(|| ServiceError::not_found("post", post_id))?;

            let comment = Comment {
                id: Uuid::new_v4(),
                post_id,
                author_id,
                content,
                created_at: Utc::now(),
            };
            post.comments.push(comment.clone());
            comment
        };

        tracing::debug!(post_id = %post_id, comment_id = %comment.id, "comment added");
        self.notifications
            .publish(DomainEvent::CommentAdded {
                comment_id: comment.id,
                post_id,
                author_id,
                content: comment.content.clone(),
                created_at: comment.created_at,
            })
            .await;

        Ok(comment)
    }

    /// Whole feed, newest post first
    pub async fn feed(&self) -> Vec<Post> {
        self.posts.read().await.iter().cloned().collect()
    }

    pub async fn get(&self, post_id: Uuid) -> ServiceResult<Post> {
        self.posts
            .read()
            .await
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("post", post_id))
    }

    pub async fn posts_by(&self, author_id: Uuid) -> Vec<Post> {
        self.posts
            .read()
            .await
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect()
    }
}
