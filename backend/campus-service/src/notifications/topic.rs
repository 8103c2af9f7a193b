use event_schema::DomainEvent;
use uuid::Uuid;

/// What a subscriber is watching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Registrations and profile edits
    Directory,
    /// Posts and comments
    Feed,
    /// Event creation and attendance
    Events,
    /// One chat's history
    Chat(Uuid),
    /// Everything that changes a single user's own views
    User(Uuid),
}

impl Topic {
    /// Topics an event is delivered to
    pub fn for_event(event: &DomainEvent) -> Vec<Topic> {
        let mut topics = Vec::new();
        if event.affects_feed() {
            topics.push(Topic::Feed);
        }
        match event {
            DomainEvent::UserRegistered { .. } | DomainEvent::ProfileUpdated { .. } => {
                topics.push(Topic::Directory)
            }
            DomainEvent::ChatCreated { chat_id, .. }
            | DomainEvent::MessageAppended { chat_id, .. } => topics.push(Topic::Chat(*chat_id)),
            DomainEvent::EventCreated { .. }
            | DomainEvent::AttendeeJoined { .. }
            | DomainEvent::AttendeeLeft { .. } => topics.push(Topic::Events),
            DomainEvent::ConnectionAdded { .. }
            | DomainEvent::ConnectionRemoved { .. }
            | DomainEvent::PostCreated { .. }
            | DomainEvent::CommentAdded { .. } => {}
        }

        topics.extend(event.affected_users().into_iter().map(Topic::User));
        topics
    }
}
