//! Weather route bot - forecasts for every city on a trip
//!
//! This library provides the conversation state machine, the AccuWeather
//! gateway and the Telegram transport of the bot.

pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod telegram;
pub mod units;
pub mod weather;

// Re-export core types for public API
pub use config::BotConfig;
pub use conversation::{
    ConversationEngine, ConversationId, ConversationState, InMemorySessionStore, Reply,
    ReplyKeyboard, ReplySink, Session, SessionStore,
};
pub use error::WeatherBotError;
pub use models::{ForecastDays, ForecastRecord, ForecastSeries, GeoPosition, LocationKey, ResolvedLocation};
pub use report::format_city_report;
pub use weather::{AccuWeatherClient, WeatherGateway};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherBotError>;
