//! Unit conversions for provider readings, which arrive in imperial units.

/// Kilometres per mile, as used for all wind speed conversions.
pub const KM_PER_MILE: f64 = 1.609;

/// Convert a temperature from Fahrenheit to Celsius.
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Convert a speed from miles per hour to kilometres per hour.
#[must_use]
pub fn miles_per_hour_to_km_per_hour(mph: f64) -> f64 {
    mph * KM_PER_MILE
}
