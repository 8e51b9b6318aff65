//! Configuration management for the weather route bot
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherBotError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable teloxide itself reads the bot token from
const TELOXIDE_TOKEN_VAR: &str = "TELOXIDE_TOKEN";
const ACCUWEATHER_API_KEY_VAR: &str = "ACCUWEATHER_API_KEY";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Telegram transport configuration
    pub telegram: TelegramConfig,
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Telegram bot settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token issued by @BotFather
    pub token: Option<String>,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// AccuWeather API key
    pub api_key: Option<String>,
    /// Base URL for weather API
    pub base_url: String,
    /// Language of localized names in responses
    pub language: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "http://dataservice.accuweather.com".to_string()
}

fn default_weather_language() -> String {
    "ru-ru".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            language: default_weather_language(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl BotConfig {
    /// Load configuration from a file and environment variables.
    ///
    /// Without a path the file is looked up under the user config directory.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. WEATHERBOT_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("WEATHERBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: BotConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_credential_fallbacks(|name| env::var(name).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-route-bot").join("config.toml"))
    }

    /// Fill missing credentials from the conventional environment variables
    pub fn apply_credential_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.telegram.token.is_none() {
            self.telegram.token = lookup(TELOXIDE_TOKEN_VAR);
        }
        if self.weather.api_key.is_none() {
            self.weather.api_key = lookup(ACCUWEATHER_API_KEY_VAR);
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.language.is_empty() {
            self.weather.language = default_weather_language();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_credentials()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Both credentials are required to start
    pub fn validate_credentials(&self) -> Result<()> {
        match self.telegram.token.as_deref() {
            None | Some("") => {
                return Err(WeatherBotError::config(format!(
                    "Telegram bot token is missing. Set telegram.token, WEATHERBOT_TELEGRAM__TOKEN or {TELOXIDE_TOKEN_VAR}."
                ))
                .into());
            }
            Some(token) if !token.contains(':') => {
                return Err(WeatherBotError::config(
                    "Telegram bot token appears to be invalid (expected '<id>:<secret>').",
                )
                .into());
            }
            Some(_) => {}
        }

        match self.weather.api_key.as_deref() {
            None | Some("") => Err(WeatherBotError::config(format!(
                "AccuWeather API key is missing. Set weather.api_key, WEATHERBOT_WEATHER__API_KEY or {ACCUWEATHER_API_KEY_VAR}."
            ))
            .into()),
            Some(key) if key.len() < 8 => Err(WeatherBotError::config(
                "AccuWeather API key appears to be invalid (too short). Please check your API key.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                WeatherBotError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherBotError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherBotError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherBotError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}
