//! User directory
//!
//! Registration order is the directory order; every search returns matches in
//! that order.

use chrono::Utc;
use event_schema::DomainEvent;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{NewUser, ProfileUpdate, SearchField, User};
use crate::notifications::NotificationHub;
use crate::services::identity::IdentityVerifier;
use crate::validators;

#[derive(Default)]
struct DirectoryInner {
    users: Vec<User>,
    by_id: HashMap<Uuid, usize>,
    by_email: HashMap<String, Uuid>,
}

pub struct Directory {
    inner: RwLock<DirectoryInner>,
    verifier: Arc<dyn IdentityVerifier>,
    notifications: NotificationHub,
}

impl Directory {
    pub fn new(verifier: Arc<dyn IdentityVerifier>, notifications: NotificationHub) -> Self {
        Self {
            inner: RwLock::new(DirectoryInner::default()),
            verifier,
            notifications,
        }
    }

    /// Register a new user (signup)
    pub async fn register(&self, new_user: NewUser) -> ServiceResult<User> {
        let display_name = validators::require_text("display_name", &new_user.display_name)?;
        let major = validators::require_text("major", &new_user.major)?;
        let email = new_user.email.trim().to_ascii_lowercase();

        NewUser {
            display_name: display_name.clone(),
            email: email.clone(),
            major: major.clone(),
        }
        .validate()?;
        self.verifier.verify_email(&email).await?;

        let user = {
            let mut inner = self.inner.write().await;
            if inner.by_email.contains_key(&email) {
                return Err(ServiceError::Conflict(format!(
                    "email {} is already registered",
                    validators::mask_email(&email)
                )));
            }

            let user = User {
                id: Uuid::new_v4(),
                display_name,
                email: email.clone(),
                major,
                avatar: None,
                connections: BTreeSet::new(),
                created_at: Utc::now(),
            };

            let position = inner.users.len();
            inner.by_id.insert(user.id, position);
            inner.by_email.insert(email, user.id);
            inner.users.push(user.clone());
            user
        };

        tracing::info!(
            user_id = %user.id,
            email = %validators::mask_email(&user.email),
            "user registered"
        );

        self.notifications
            .publish(DomainEvent::UserRegistered {
                user_id: user.id,
                email: user.email.clone(),
                display_name: user.display_name.clone(),
                registered_at: user.created_at,
            })
            .await;

        Ok(user)
    }

    pub async fn get(&self, user_id: Uuid) -> ServiceResult<User> {
        let inner = self.inner.read().await;
        inner
            .by_id
            .get(&user_id)
            .map(|&i| inner.users[i].clone())
            .ok_or_else(|| ServiceError::not_found("user", user_id))
    }

    pub async fn exists(&self, user_id: Uuid) -> bool {
        self.inner.read().await.by_id.contains_key(&user_id)
    }

    /// Fail with `NotFound` naming the first unknown id
    pub async fn ensure_exist(&self, user_ids: &[Uuid]) -> ServiceResult<()> {
        let inner = self.inner.read().await;
        match user_ids.iter().find(|id| !inner.by_id.contains_key(id)) {
            Some(missing) => Err(ServiceError::not_found("user", missing)),
            None => Ok(()),
        }
    }

    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> ServiceResult<User> {
        update.validate()?;
        let display_name = update
            .display_name
            .as_deref()
            .map(|v| validators::require_text("display_name", v))
            .transpose()?;
        let major = update
            .major
            .as_deref()
            .map(|v| validators::require_text("major", v))
            .transpose()?;

        let user = {
            let mut inner = self.inner.write().await;
            let index = *inner
                .by_id
                .get(&user_id)
                .ok_or_else(|| ServiceError::not_found("user", user_id))?;
            let user = &mut inner.users[index];

            if let Some(display_name) = display_name {
                user.display_name = display_name;
            }
            if let Some(major) = major {
                user.major = major;
            }
            if let Some(avatar) = update.avatar {
                user.avatar = if avatar.is_empty() { None } else { Some(avatar) };
            }
            user.clone()
        };

        tracing::debug!(user_id = %user_id, "profile updated");

        self.notifications
            .publish(DomainEvent::ProfileUpdated {
                user_id,
                display_name: user.display_name.clone(),
                major: user.major.clone(),
                updated_at: Utc::now(),
            })
            .await;

        Ok(user)
    }

    /// Case-insensitive substring search over one field
    ///
    /// A blank query returns the whole directory.
    pub async fn search(&self, field: SearchField, query: &str) -> Vec<User> {
        let needle = query.trim().to_lowercase();
        let inner = self.inner.read().await;

        if needle.is_empty() {
            return inner.users.clone();
        }

        inner
            .users
            .iter()
            .filter(|user| {
                let haystack = match field {
                    SearchField::Name => user.display_name.to_lowercase(),
                    SearchField::Id => user.id.to_string(),
                    SearchField::Major => user.major.to_lowercase(),
                    SearchField::Email => user.email.to_lowercase(),
                };
                haystack.contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub async fn all(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
