//! Weather API client for AccuWeather
//!
//! Resolves city names and coordinates to AccuWeather location keys and
//! fetches daily forecasts. Readings arrive in imperial units and are
//! converted to Celsius and km/h before leaving this module.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

use super::WeatherGateway;
use crate::config::WeatherConfig;
use crate::models::{
    ForecastDays, ForecastRecord, ForecastSeries, GeoPosition, LocationKey, ResolvedLocation,
};
use crate::{Result, WeatherBotError};

const CITY_SEARCH_PATH: &str = "/locations/v1/cities/search";
const GEO_SEARCH_PATH: &str = "/locations/v1/cities/geoposition/search";
const ONE_DAY_FORECAST_PATH: &str = "/forecasts/v1/daily/1day";
const FIVE_DAY_FORECAST_PATH: &str = "/forecasts/v1/daily/5day";

/// Responses slower than this are logged as warnings
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// Longest response body excerpt kept in logs and errors
const BODY_EXCERPT_LEN: usize = 200;

/// HTTP client for the AccuWeather data service
pub struct AccuWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

/// Status and body of a finished request
struct RawResponse {
    status: reqwest::StatusCode,
    body: String,
}

impl AccuWeatherClient {
    /// Create a new client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| WeatherBotError::config("AccuWeather API key is not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("weather-route-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherBotError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
        })
    }

    /// Issue a GET against `path` with the key and language attached.
    ///
    /// Only transport failures are errors here; the caller decides what a
    /// non-success status means.
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);
        let mut params = vec![
            ("apikey", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        params.extend_from_slice(query);

        debug!("AccuWeather request: {}", path);
        let start_time = Instant::now();

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                let e = e.without_url();
                warn!("Network error calling {}: {}", path, e);
                WeatherBotError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| WeatherBotError::from(e.without_url()))?;

        let elapsed = start_time.elapsed();
        debug!(
            "AccuWeather response {} for {} in {:.3}s",
            status,
            path,
            elapsed.as_secs_f64()
        );
        if elapsed > SLOW_RESPONSE {
            warn!("Slow AccuWeather response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(RawResponse { status, body })
    }

    async fn fetch_daily(&self, base_path: &str, location: &LocationKey) -> Result<String> {
        let path = format!("{}/{}", base_path, urlencoding::encode(location.as_str()));
        let response = self.get(&path, &[("details", "true")]).await?;

        if !response.status.is_success() {
            error!(
                "Forecast request for location {} failed with {}: {}",
                location,
                response.status,
                excerpt(&response.body)
            );
            return Err(WeatherBotError::upstream(
                response.status.as_u16(),
                excerpt(&response.body),
            ));
        }

        Ok(response.body)
    }
}

#[async_trait]
impl WeatherGateway for AccuWeatherClient {
    #[instrument(skip(self))]
    async fn resolve_location(&self, city_name: &str) -> Result<ResolvedLocation> {
        let response = self.get(CITY_SEARCH_PATH, &[("q", city_name)]).await?;

        if !response.status.is_success() {
            warn!(
                "City search for '{}' failed with {}: {}",
                city_name,
                response.status,
                excerpt(&response.body)
            );
            return Err(WeatherBotError::location_not_found(city_name));
        }

        let location = parse_city_search(&response.body)?.ok_or_else(|| {
            warn!("No location key found for city '{}'", city_name);
            WeatherBotError::location_not_found(city_name)
        })?;

        info!("Resolved '{}' to location key {}", city_name, location.key);
        Ok(location)
    }

    #[instrument(skip(self))]
    async fn resolve_location_by_coordinates(&self, position: GeoPosition) -> Result<LocationKey> {
        let query = position.to_query();
        let response = self.get(GEO_SEARCH_PATH, &[("q", query.as_str())]).await?;

        if !response.status.is_success() {
            warn!(
                "Geoposition search for {} failed with {}: {}",
                query,
                response.status,
                excerpt(&response.body)
            );
            return Err(WeatherBotError::location_not_found(query));
        }

        let key = parse_geo_search(&response.body)?.ok_or_else(|| {
            warn!("No location key found for coordinates {}", query);
            WeatherBotError::location_not_found(query.clone())
        })?;

        info!("Resolved {} to location key {}", query, key);
        Ok(key)
    }

    #[instrument(skip_all, fields(location = %location))]
    async fn fetch_forecast(&self, location: &LocationKey) -> Result<ForecastRecord> {
        let body = self.fetch_daily(ONE_DAY_FORECAST_PATH, location).await?;
        let mut records = parse_daily_forecasts(&body, 1)?;
        // parse_daily_forecasts returns exactly the requested count
        records
            .pop()
            .ok_or_else(|| WeatherBotError::structural("DailyForecasts is empty"))
    }

    #[instrument(skip_all, fields(location = %location, days = days.get()))]
    async fn fetch_forecast_series(
        &self,
        location: &LocationKey,
        days: ForecastDays,
    ) -> Result<ForecastSeries> {
        let body = self.fetch_daily(FIVE_DAY_FORECAST_PATH, location).await?;
        let records = parse_daily_forecasts(&body, days.count())?;

        info!("Retrieved {} forecast days for location {}", records.len(), location);
        Ok(ForecastSeries {
            location: location.clone(),
            days: records,
        })
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_LEN).collect()
}

/// Parse a search body, `None` when the provider found nothing.
///
/// An empty body, `null`, `[]` and `{}` all mean "no match".
fn parse_search_body(body: &str, what: &str) -> Result<Option<serde_json::Value>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| WeatherBotError::structural(format!("Invalid {what} response: {e}")))?;

    let empty = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::Object(fields) => fields.is_empty(),
        _ => false,
    };
    Ok((!empty).then_some(value))
}

fn parse_city_search(body: &str) -> Result<Option<ResolvedLocation>> {
    let Some(value) = parse_search_body(body, "city search")? else {
        return Ok(None);
    };
    let results: Vec<accuweather_api::CitySearchResult> = serde_json::from_value(value)
        .map_err(|e| WeatherBotError::structural(format!("Invalid city search response: {e}")))?;

    Ok(results.into_iter().next().map(Into::into))
}

fn parse_geo_search(body: &str) -> Result<Option<LocationKey>> {
    let Some(value) = parse_search_body(body, "geoposition")? else {
        return Ok(None);
    };
    let result: accuweather_api::CitySearchResult = serde_json::from_value(value)
        .map_err(|e| WeatherBotError::structural(format!("Invalid geoposition response: {e}")))?;

    Ok(Some(LocationKey::new(result.key)))
}

/// Extract and convert the first `days` daily entries
fn parse_daily_forecasts(body: &str, days: usize) -> Result<Vec<ForecastRecord>> {
    let response: accuweather_api::DailyForecastResponse = serde_json::from_str(body)
        .map_err(|e| WeatherBotError::structural(format!("Invalid forecast response: {e}")))?;

    if response.daily_forecasts.len() < days {
        return Err(WeatherBotError::structural(format!(
            "Expected {days} daily forecasts, got {}",
            response.daily_forecasts.len()
        )));
    }

    response
        .daily_forecasts
        .iter()
        .take(days)
        .enumerate()
        .map(|(index, forecast)| forecast.to_record(index))
        .collect()
}

/// AccuWeather API response structures and conversion utilities
mod accuweather_api {
    use super::{ForecastRecord, GeoPosition, LocationKey, ResolvedLocation};
    use crate::units::{fahrenheit_to_celsius, miles_per_hour_to_km_per_hour};
    use crate::{Result, WeatherBotError};
    use serde::Deserialize;

    /// Entry of the city and geoposition searches
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct CitySearchResult {
        pub key: String,
        pub geo_position: Option<GeoPositionResult>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct GeoPositionResult {
        pub latitude: f64,
        pub longitude: f64,
    }

    impl From<CitySearchResult> for ResolvedLocation {
        fn from(result: CitySearchResult) -> Self {
            ResolvedLocation {
                key: LocationKey::new(result.key),
                geo_position: result
                    .geo_position
                    .map(|geo| GeoPosition::new(geo.latitude, geo.longitude)),
            }
        }
    }

    /// Body of the 1-day and 5-day daily forecast endpoints
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DailyForecastResponse {
        pub daily_forecasts: Vec<DailyForecast>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DailyForecast {
        pub day: Option<DayDetails>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct DayDetails {
        pub wet_bulb_temperature: Option<Summary<UnitValue>>,
        pub relative_humidity: Option<Summary<f64>>,
        pub wind: Option<Wind>,
        pub precipitation_probability: Option<f64>,
    }

    /// Minimum/maximum/average block, only the average is used
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Summary<T> {
        pub average: Option<T>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct UnitValue {
        pub value: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct Wind {
        pub speed: Option<UnitValue>,
    }

    fn required(value: Option<f64>, field: &str, index: usize) -> Result<f64> {
        value.ok_or_else(|| {
            WeatherBotError::structural(format!("DailyForecasts[{index}].Day.{field} is missing"))
        })
    }

    impl DailyForecast {
        /// Convert to a normalized record (°C, km/h)
        pub fn to_record(&self, index: usize) -> Result<ForecastRecord> {
            let day = self.day.as_ref().ok_or_else(|| {
                WeatherBotError::structural(format!("DailyForecasts[{index}].Day is missing"))
            })?;

            let temperature_f = required(
                day.wet_bulb_temperature
                    .as_ref()
                    .and_then(|t| t.average.as_ref())
                    .and_then(|v| v.value),
                "WetBulbTemperature.Average.Value",
                index,
            )?;
            let humidity = required(
                day.relative_humidity.as_ref().and_then(|h| h.average),
                "RelativeHumidity.Average",
                index,
            )?;
            let wind_mph = required(
                day.wind
                    .as_ref()
                    .and_then(|w| w.speed.as_ref())
                    .and_then(|s| s.value),
                "Wind.Speed.Value",
                index,
            )?;
            let precipitation_probability = required(
                day.precipitation_probability,
                "PrecipitationProbability",
                index,
            )?;

            Ok(ForecastRecord {
                temperature: fahrenheit_to_celsius(temperature_f),
                humidity,
                wind_speed: miles_per_hour_to_km_per_hour(wind_mph),
                precipitation_probability,
            })
        }
    }
}
