//! Outbound side of the chat transport

use async_trait::async_trait;

use super::ConversationId;
use crate::Result;
use crate::models::ForecastDays;

/// What the transport should do with the reply keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKeyboard {
    /// Leave whatever keyboard the user currently sees
    Unchanged,
    /// Hide the custom keyboard
    Remove,
    /// Show one row of day-count buttons
    DayChoice,
}

/// One message to send back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: ReplyKeyboard,
}

impl Reply {
    pub fn new(text: impl Into<String>, keyboard: ReplyKeyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, ReplyKeyboard::Unchanged)
    }

    pub fn removing_keyboard(text: impl Into<String>) -> Self {
        Self::new(text, ReplyKeyboard::Remove)
    }
}

/// Labels of the day-choice buttons, in display order
#[must_use]
pub fn day_choice_labels() -> Vec<String> {
    (ForecastDays::MIN..=ForecastDays::MAX)
        .map(|day| day.to_string())
        .collect()
}

/// Delivers replies to a conversation
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, conversation: ConversationId, reply: Reply) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_choice_labels() {
        assert_eq!(day_choice_labels(), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_reply_constructors() {
        assert_eq!(Reply::text("a").keyboard, ReplyKeyboard::Unchanged);
        assert_eq!(Reply::removing_keyboard("b").keyboard, ReplyKeyboard::Remove);
    }
}
