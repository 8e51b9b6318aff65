//! Weather gateway: location lookup and daily forecasts from the provider

use async_trait::async_trait;

use crate::Result;
use crate::models::{ForecastDays, ForecastRecord, ForecastSeries, GeoPosition, LocationKey, ResolvedLocation};

pub mod accuweather;

pub use accuweather::AccuWeatherClient;

/// Source of location keys and normalized forecasts.
///
/// Every failure is returned as a recoverable [`crate::WeatherBotError`]:
/// `LocationNotFound`, `Upstream`, `Network` or `Structural`.
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Resolve a free-text city name to the first matching location.
    async fn resolve_location(&self, city_name: &str) -> Result<ResolvedLocation>;

    /// Resolve a coordinate pair to the location that contains it.
    async fn resolve_location_by_coordinates(&self, position: GeoPosition) -> Result<LocationKey>;

    /// Fetch today's forecast.
    async fn fetch_forecast(&self, location: &LocationKey) -> Result<ForecastRecord>;

    /// Fetch the first `days` days of the five-day forecast, in order.
    async fn fetch_forecast_series(
        &self,
        location: &LocationKey,
        days: ForecastDays,
    ) -> Result<ForecastSeries>;
}
