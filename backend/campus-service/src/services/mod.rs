pub mod connection_graph;
pub mod conversation_store;
pub mod directory;
pub mod event_store;
pub mod feed_store;
pub mod identity;
pub mod messaging;

pub use connection_graph::ConnectionGraph;
pub use conversation_store::ConversationStore;
pub use directory::Directory;
pub use event_store::EventStore;
pub use feed_store::FeedStore;
pub use identity::{IdentityVerifier, InstitutionalDomainVerifier};
pub use messaging::MessagingService;
