pub mod chat;
pub mod event;
pub mod post;
pub mod user;

pub use chat::{Chat, ChatSummary, Message};
pub use event::{Event, NewEvent};
pub use post::{Comment, Post};
pub use user::{NewUser, ProfileUpdate, SearchField, User};
