//! Integration tests for AccuWeatherClient using wiremock.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_route_bot::config::WeatherConfig;
use weather_route_bot::{
    AccuWeatherClient, ForecastDays, GeoPosition, LocationKey, WeatherBotError, WeatherGateway,
};

const API_KEY: &str = "test-api-key-123";

fn client_for(server: &MockServer) -> AccuWeatherClient {
    let config = WeatherConfig {
        api_key: Some(API_KEY.to_string()),
        base_url: server.uri(),
        ..Default::default()
    };
    AccuWeatherClient::new(&config).unwrap()
}

fn daily(temperature_f: f64, humidity: f64, wind_mph: f64, precipitation: f64) -> serde_json::Value {
    json!({
        "Date": "2024-05-01T07:00:00+03:00",
        "Day": {
            "WetBulbTemperature": {
                "Average": { "Value": temperature_f, "Unit": "F", "UnitType": 18 }
            },
            "RelativeHumidity": { "Average": humidity },
            "Wind": { "Speed": { "Value": wind_mph, "Unit": "mi/h", "UnitType": 9 } },
            "PrecipitationProbability": precipitation
        }
    })
}

fn five_days() -> serde_json::Value {
    json!({
        "Headline": { "Text": "Тепло" },
        "DailyForecasts": [
            daily(50.0, 60.0, 10.0, 20.0),
            daily(59.0, 65.0, 5.0, 30.0),
            daily(68.0, 70.0, 0.0, 40.0),
            daily(77.0, 75.0, 20.0, 50.0),
            daily(86.0, 80.0, 25.0, 60.0),
        ]
    })
}

#[tokio::test]
async fn test_resolve_location_returns_first_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations/v1/cities/search"))
        .and(query_param("q", "Москва"))
        .and(query_param("apikey", API_KEY))
        .and(query_param("language", "ru-ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "Key": "294021",
                "LocalizedName": "Москва",
                "GeoPosition": { "Latitude": 55.752, "Longitude": 37.619 }
            },
            { "Key": "1234", "LocalizedName": "Москва" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let location = client_for(&server).resolve_location("Москва").await.unwrap();

    assert_eq!(location.key, LocationKey::new("294021"));
    let geo = location.geo_position.unwrap();
    assert!((geo.latitude - 55.752).abs() < 1e-9);
    assert!((geo.longitude - 37.619).abs() < 1e-9);
}

#[tokio::test]
async fn test_resolve_location_empty_results_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations/v1/cities/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resolve_location("Atlantis")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherBotError::LocationNotFound { ref query } if query == "Atlantis"));
}

#[tokio::test]
async fn test_resolve_location_error_status_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations/v1/cities/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resolve_location("Москва")
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherBotError::LocationNotFound { .. }));
}

#[tokio::test]
async fn test_resolve_location_by_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations/v1/cities/geoposition/search"))
        .and(query_param("q", "55.75,37.62"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Key": "294021",
            "LocalizedName": "Москва"
        })))
        .mount(&server)
        .await;

    let key = client_for(&server)
        .resolve_location_by_coordinates(GeoPosition::new(55.75, 37.62))
        .await
        .unwrap();

    assert_eq!(key.as_str(), "294021");
}

#[tokio::test]
async fn test_resolve_location_by_coordinates_null_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations/v1/cities/geoposition/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resolve_location_by_coordinates(GeoPosition::new(0.0, -160.0))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherBotError::LocationNotFound { .. }));
}

#[tokio::test]
async fn test_resolve_location_by_coordinates_empty_answers_are_not_found() {
    for body in [json!([]), json!({})] {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/geoposition/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .resolve_location_by_coordinates(GeoPosition::new(0.0, -160.0))
            .await
            .unwrap_err();

        assert!(
            matches!(err, WeatherBotError::LocationNotFound { ref query } if query == "0,-160"),
            "body {body} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_fetch_forecast_converts_units() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/1day/294021"))
        .and(query_param("details", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "DailyForecasts": [daily(104.0, 50.0, 10.0, 0.0)]
        })))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .fetch_forecast(&LocationKey::new("294021"))
        .await
        .unwrap();

    assert!((record.temperature - 40.0).abs() < 1e-9);
    assert!((record.humidity - 50.0).abs() < 1e-9);
    assert!((record.wind_speed - 16.09).abs() < 1e-9);
    assert!((record.precipitation_probability - 0.0).abs() < 1e-9);
    assert!(record.is_bad_weather());
}

#[tokio::test]
async fn test_fetch_forecast_series_takes_first_days() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/294021"))
        .respond_with(ResponseTemplate::new(200).set_body_json(five_days()))
        .mount(&server)
        .await;

    let series = client_for(&server)
        .fetch_forecast_series(&LocationKey::new("294021"), ForecastDays::new(3).unwrap())
        .await
        .unwrap();

    assert_eq!(series.location.as_str(), "294021");
    assert_eq!(series.len(), 3);
    let temperatures: Vec<f64> = series.days.iter().map(|d| d.temperature).collect();
    assert!((temperatures[0] - 10.0).abs() < 1e-9);
    assert!((temperatures[1] - 15.0).abs() < 1e-9);
    assert!((temperatures[2] - 20.0).abs() < 1e-9);
    assert!((series.days[2].wind_speed - 0.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_fetch_forecast_series_short_response_is_structural() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/294021"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "DailyForecasts": [daily(50.0, 60.0, 10.0, 20.0), daily(59.0, 65.0, 5.0, 30.0)]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_forecast_series(&LocationKey::new("294021"), ForecastDays::new(5).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherBotError::Structural { .. }));
}

#[tokio::test]
async fn test_fetch_forecast_series_missing_field_is_structural() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/294021"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "DailyForecasts": [{ "Day": { "RelativeHumidity": { "Average": 50 } } }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_forecast_series(&LocationKey::new("294021"), ForecastDays::new(1).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherBotError::Structural { .. }));
}

#[tokio::test]
async fn test_fetch_forecast_unauthorized_is_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/1day/294021"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "Code": "Unauthorized",
            "Message": "Api Authorization failed"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_forecast(&LocationKey::new("294021"))
        .await
        .unwrap_err();

    match err {
        WeatherBotError::Upstream { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Unauthorized"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_forecast_series_encodes_location_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecasts/v1/daily/5day/12%2F34"))
        .respond_with(ResponseTemplate::new(200).set_body_json(five_days()))
        .expect(1)
        .mount(&server)
        .await;

    let series = client_for(&server)
        .fetch_forecast_series(&LocationKey::new("12/34"), ForecastDays::new(1).unwrap())
        .await
        .unwrap();

    assert_eq!(series.location.as_str(), "12/34");
    assert_eq!(series.len(), 1);
}
