//! Chat module
//!
//! Conversation models, reply generation and the per-widget session that
//! sequences one exchange at a time.

pub mod manager;
pub mod models;
pub mod responder;
pub mod session;

pub use manager::WidgetManager;
pub use models::{ConversationMessage, Notification, SendOutcome, Sender};
pub use responder::{Reply, Responder};
pub use session::ChatSession;
