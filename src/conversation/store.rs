//! Per-conversation session storage

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::ConversationId;
use crate::Result;
use crate::models::ForecastDays;

/// Which slot the conversation is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    AwaitingCities,
    AwaitingDays,
}

/// Slot-filling state of one forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub stage: Stage,
    /// Trimmed, non-empty city names in the order the user gave them
    pub cities: Vec<String>,
    pub days: Option<ForecastDays>,
}

impl Session {
    /// A fresh session waiting for the city list
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: Stage::AwaitingCities,
            cities: Vec::new(),
            days: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Where sessions live between messages.
///
/// A conversation without a stored session is idle.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, conversation: ConversationId) -> Result<Option<Session>>;

    async fn save(&self, conversation: ConversationId, session: Session) -> Result<()>;

    /// Remove the session, returning it if there was one
    async fn clear(&self, conversation: ConversationId) -> Result<Option<Session>>;
}

/// Process-local store; sessions are lost on restart
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<ConversationId, Session>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conversations with a live session
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, conversation: ConversationId) -> Result<Option<Session>> {
        Ok(self.sessions.lock().await.get(&conversation).cloned())
    }

    async fn save(&self, conversation: ConversationId, session: Session) -> Result<()> {
        self.sessions.lock().await.insert(conversation, session);
        Ok(())
    }

    async fn clear(&self, conversation: ConversationId) -> Result<Option<Session>> {
        Ok(self.sessions.lock().await.remove(&conversation))
    }
}
