//! Error types and handling for the weather route bot

use thiserror::Error;

/// Main error type for the bot
#[derive(Error, Debug)]
pub enum WeatherBotError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors (recovered by re-prompting the user)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The provider had no location matching the query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// The provider answered with a non-success HTTP status
    #[error("Upstream error (HTTP {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response structure: {message}")]
    Structural { message: String },

    /// Delivering a reply through the chat transport failed
    #[error("Chat transport error: {message}")]
    Chat { message: String },
}

impl WeatherBotError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new upstream error from a status code and response body
    pub fn upstream<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Create a new structural error
    pub fn structural<S: Into<String>>(message: S) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// Create a new chat transport error
    pub fn chat<S: Into<String>>(message: S) -> Self {
        Self::Chat {
            message: message.into(),
        }
    }
}
