//! Daily forecast records, series and the bad-weather rules

use super::LocationKey;
use crate::error::WeatherBotError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of forecast days a user may request, always within `1..=5`.
///
/// The five-day provider endpoint bounds the range, so an out-of-range count
/// cannot reach the gateway.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub struct ForecastDays(u8);

impl ForecastDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validate a day count
    pub fn new(days: u8) -> crate::Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(WeatherBotError::validation(format!(
                "Forecast days must be between {} and {}, got: {days}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn count(self) -> usize {
        usize::from(self.0)
    }
}

impl TryFrom<u8> for ForecastDays {
    type Error = WeatherBotError;

    fn try_from(days: u8) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<ForecastDays> for u8 {
    fn from(days: ForecastDays) -> Self {
        days.0
    }
}

impl FromStr for ForecastDays {
    type Err = WeatherBotError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let days = input
            .parse::<i64>()
            .map_err(|_| WeatherBotError::validation(format!("Not a whole number: '{input}'")))?;
        let days = u8::try_from(days).map_err(|_| {
            WeatherBotError::validation(format!(
                "Forecast days must be between {} and {}, got: {days}",
                Self::MIN,
                Self::MAX
            ))
        })?;
        Self::new(days)
    }
}

/// One day of normalized weather for one city
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ForecastRecord {
    /// Average wet-bulb temperature in Celsius
    pub temperature: f64,
    /// Average relative humidity in percent
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Precipitation probability in percent
    pub precipitation_probability: f64,
}

impl ForecastRecord {
    /// Check the record against the bad-weather rules, see [`is_bad_weather`]
    #[must_use]
    pub fn is_bad_weather(&self) -> bool {
        is_bad_weather(
            Some(self.temperature),
            Some(self.humidity),
            Some(self.wind_speed),
            Some(self.precipitation_probability),
        )
    }
}

/// Forecast for consecutive days at one location, index 0 is day 1
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSeries {
    pub location: LocationKey,
    pub days: Vec<ForecastRecord>,
}

impl ForecastSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Decide whether the readings describe bad weather.
///
/// Bad means any of: temperature outside `[0, 35]` °C, wind above 50 km/h,
/// precipitation probability above 70 %, humidity outside `[30, 80]` %.
/// A reading that is absent or exactly zero is not checked, so a day with
/// no readings at all is never bad. NaN readings never compare as bad.
#[must_use]
pub fn is_bad_weather(
    temperature: Option<f64>,
    humidity: Option<f64>,
    wind_speed: Option<f64>,
    precipitation_probability: Option<f64>,
) -> bool {
    // Zero counts as missing.
    let present = |reading: Option<f64>| reading.filter(|value| *value != 0.0);

    present(temperature).is_some_and(|t| !(0.0..=35.0).contains(&t) && !t.is_nan())
        || present(wind_speed).is_some_and(|w| w > 50.0)
        || present(precipitation_probability).is_some_and(|p| p > 70.0)
        || present(humidity).is_some_and(|h| !(30.0..=80.0).contains(&h) && !h.is_nan())
}
