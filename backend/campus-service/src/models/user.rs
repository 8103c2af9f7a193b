use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use uuid::Uuid;
use validator::Validate;

/// Directory entry for a registered student
///
/// Identity is the `id` alone: two records with the same id are the same
/// user even if their profile fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub major: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Vec<u8>>,
    /// Filled from the connection graph when a profile is read
    #[serde(default)]
    pub connections: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl User {
    pub fn is_connected_to(&self, other: Uuid) -> bool {
        self.connections.contains(&other)
    }
}

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub major: String,
}

/// Partial profile edit; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 64))]
    pub display_name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub major: Option<String>,
    pub avatar: Option<Vec<u8>>,
}

/// Field a directory search matches against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    #[default]
    Name,
    Id,
    Major,
    Email,
}
