use chrono::{DateTime, Utc};
use event_schema::DomainEvent;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{Event, NewEvent};
use crate::notifications::NotificationHub;
use crate::validators;

/// Scheduled events in creation order
pub struct EventStore {
    events: RwLock<Vec<Event>>,
    notifications: NotificationHub,
}

impl EventStore {
    pub fn new(notifications: NotificationHub) -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            notifications,
        }
    }

    pub async fn add_event(&self, new_event: NewEvent) -> ServiceResult<Event> {
        if new_event.end_time <= new_event.start_time {
            return Err(ServiceError::InvalidRange(format!(
                "end time {} must be after start time {}",
                new_event.end_time.to_rfc3339(),
                new_event.start_time.to_rfc3339()
            )));
        }
        let title = validators::require_text("title", &new_event.title)?;

        let event = Event {
            id: Uuid::new_v4(),
            title,
            description: new_event.description.trim().to_string(),
            location: new_event.location.trim().to_string(),
            start_time: new_event.start_time,
            end_time: new_event.end_time,
            creator_id: new_event.creator_id,
            attendees: vec![new_event.creator_id],
            created_at: Utc::now(),
        };
        self.events.write().await.push(event.clone());

        tracing::info!(event_id = %event.id, creator_id = %event.creator_id, "event created");
        self.notifications
            .publish(DomainEvent::EventCreated {
                event_id: event.id,
                creator_id: event.creator_id,
                title: event.title.clone(),
                start_time: event.start_time,
                end_time: event.end_time,
            })
            .await;

        Ok(event)
    }

    /// RSVP; attending twice is a no-op
    pub async fn attend(&self, event_id: Uuid, user_id: Uuid) -> ServiceResult<Event> {
        let (event, joined) = {
            let mut events = self.events.write().await;
            let event = find_mut(&mut events, event_id)?;
            let joined = !event.is_attending(user_id);
            if joined {
                event.attendees.push(user_id);
            }
            (event.clone(), joined)
        };

        if joined {
            self.notifications
                .publish(DomainEvent::AttendeeJoined {
                    event_id,
                    user_id,
                    joined_at: Utc::now(),
                })
                .await;
        }
        Ok(event)
    }

    /// Withdraw an RSVP; leaving an event not attended is a no-op
    ///
    /// The creator hosts the event and cannot leave it.
    pub async fn leave(&self, event_id: Uuid, user_id: Uuid) -> ServiceResult<Event> {
        let (event, left) = {
            let mut events = self.events.write().await;
            let event = find_mut(&mut events, event_id)?;
            if event.creator_id == user_id {
                return Err(ServiceError::InvalidInput(
                    "the creator cannot leave their own event".to_string(),
                ));
            }
            let before = event.attendees.len();
            event.attendees.retain(|a| *a != user_id);
            (event.clone(), event.attendees.len() != before)
        };

        if left {
            self.notifications
                .publish(DomainEvent::AttendeeLeft {
                    event_id,
                    user_id,
                    left_at: Utc::now(),
                })
                .await;
        }
        Ok(event)
    }

    pub async fn get(&self, event_id: Uuid) -> ServiceResult<Event> {
        self.events
            .read()
            .await
            .iter()
            .find(|e| e.id == event_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("event", event_id))
    }

    /// All events in creation order
    pub async fn list(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    /// Events not yet over at `now`, soonest first
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.end_time > now)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.start_time);
        events
    }
}

fn find_mut(events: &mut [Event], event_id: Uuid) -> ServiceResult<&mut Event> {
    events
        .iter_mut()
        .find(|e| e.id == event_id)
        .ok_or_else(|| ServiceError::not_found("event", event_id))
}
