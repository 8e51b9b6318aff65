//! Data models for the weather route bot
//!
//! This module contains the core domain models organized by concern:
//! - Location: provider location keys and coordinates
//! - Forecast: daily records, series and the bad-weather rules

pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{ForecastDays, ForecastRecord, ForecastSeries, is_bad_weather};
pub use location::{GeoPosition, LocationKey, ResolvedLocation};
