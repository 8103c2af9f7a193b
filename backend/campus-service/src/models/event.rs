use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheduled campus event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub creator_id: Uuid,
    /// RSVP list in join order; the creator is always first
    pub attendees: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_attending(&self, user_id: Uuid) -> bool {
        self.attendees.contains(&user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Set from the acting user by the HTTP layer
    #[serde(default)]
    pub creator_id: Uuid,
}
