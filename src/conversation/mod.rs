//! Conversation handling
//!
//! The state machine is independent of the chat transport: it reads and
//! writes sessions through a [`SessionStore`] and sends replies through a
//! [`ReplySink`].

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod command;
pub mod engine;
pub mod messages;
pub mod reply;
pub mod store;

pub use command::Command;
pub use engine::{ConversationEngine, parse_cities};
pub use reply::{Reply, ReplyKeyboard, ReplySink, day_choice_labels};
pub use store::{InMemorySessionStore, Session, SessionStore, Stage};

/// Identifier of one chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observable state of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    AwaitingCities,
    AwaitingDays,
}

impl From<Option<&Session>> for ConversationState {
    fn from(session: Option<&Session>) -> Self {
        match session.map(|s| s.stage) {
            None => Self::Idle,
            Some(Stage::AwaitingCities) => Self::AwaitingCities,
            Some(Stage::AwaitingDays) => Self::AwaitingDays,
        }
    }
}
