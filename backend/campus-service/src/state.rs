use crate::{
    config::Config,
    notifications::NotificationHub,
    services::{
        ConnectionGraph, ConversationStore, Directory, EventStore, FeedStore, IdentityVerifier,
        InstitutionalDomainVerifier, MessagingService,
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub directory: Arc<Directory>,
    pub graph: Arc<ConnectionGraph>,
    pub conversations: Arc<ConversationStore>,
    /// Connection-gated entry point for everything chat related
    pub messaging: MessagingService,
    pub feed: Arc<FeedStore>,
    pub events: Arc<EventStore>,
    pub notifications: NotificationHub,
}

impl AppState {
    /// Wire every store against one notification hub, accepting signups on
    /// the configured institutional domain
    pub fn new(config: Config) -> Self {
        let verifier = Arc::new(InstitutionalDomainVerifier::new(
            config.directory.email_domain.clone(),
        ));
        Self::with_verifier(config, verifier)
    }

    pub fn with_verifier(config: Config, verifier: Arc<dyn IdentityVerifier>) -> Self {
        let notifications = NotificationHub::new();

        let directory = Arc::new(Directory::new(verifier, notifications.clone()));
        let graph = Arc::new(ConnectionGraph::new(notifications.clone()));
        let conversations = Arc::new(ConversationStore::new(
            notifications.clone(),
            config.limits.max_message_chars,
        ));
        let messaging =
            MessagingService::new(directory.clone(), graph.clone(), conversations.clone());
        let feed = Arc::new(FeedStore::new(
            notifications.clone(),
            config.limits.max_post_chars,
        ));
        let events = Arc::new(EventStore::new(notifications.clone()));

        Self {
            config: Arc::new(config),
            directory,
            graph,
            conversations,
            messaging,
            feed,
            events,
            notifications,
        }
    }
}
