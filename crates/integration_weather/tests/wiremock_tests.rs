//! Integration tests for the Open-Meteo client using wiremock
//!
//! These tests verify the client's behavior against a mock HTTP server,
//! ensuring proper handling of various response scenarios.

use domain::air_quality::Pollutant;
use integration_weather::{
    OpenMeteoClient, WeatherClient, WeatherCode, WeatherConfig, WeatherError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample forecast API response (Gainesville, FL in the afternoon)
fn sample_forecast_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 29.65,
        "longitude": -82.32,
        "generationtime_ms": 0.05,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "timezone_abbreviation": "GMT",
        "elevation": 54.0,
        "current_units": {
            "time": "iso8601",
            "interval": "seconds",
            "apparent_temperature": "°F",
            "weather_code": "wmo code",
            "uv_index": ""
        },
        "current": {
            "time": "2025-02-13T20:45",
            "interval": 900,
            "apparent_temperature": 82.6,
            "weather_code": 2,
            "uv_index": 4.1
        },
        "hourly_units": {
            "time": "iso8601",
            "apparent_temperature": "°F",
            "uv_index": ""
        },
        "hourly": {
            "time": ["2025-02-13T20:00", "2025-02-13T21:00"],
            "apparent_temperature": [82.1, 84.3],
            "uv_index": [4.5, 3.2]
        }
    })
}

/// Sample air-quality API response
fn sample_air_quality_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 29.65,
        "longitude": -82.32,
        "generationtime_ms": 0.08,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "timezone_abbreviation": "GMT",
        "current_units": {
            "time": "iso8601",
            "interval": "seconds",
            "carbon_monoxide": "μg/m³",
            "nitrogen_dioxide": "μg/m³",
            "ozone": "μg/m³",
            "sulphur_dioxide": "μg/m³",
            "pm2_5": "μg/m³",
            "pm10": "μg/m³"
        },
        "current": {
            "time": "2025-02-13T20:00",
            "interval": 3600,
            "carbon_monoxide": 212.0,
            "nitrogen_dioxide": 6.4,
            "ozone": 108.0,
            "sulphur_dioxide": 1.2,
            "pm2_5": 35.4,
            "pm10": null
        }
    })
}

/// Create a test client configured to use the mock server for both APIs
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> OpenMeteoClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        air_quality_base_url: mock_server.uri(),
        timeout_secs: 5,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    OpenMeteoClient::new(config).expect("Failed to create client")
}

/// Setup a mock for the /forecast endpoint with the given response
async fn setup_forecast_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

/// Setup a mock for the /air-quality endpoint with the given response
async fn setup_air_quality_mock(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/air-quality"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_get_conditions_success() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_conditions(29.65, -82.32).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
    let conditions = result.unwrap();
    assert!((conditions.apparent_temperature - 82.6).abs() < 0.01);
    assert_eq!(conditions.weather_code, WeatherCode(2));
    assert_eq!(conditions.weather_code.icon(), Some(116));
    assert!((conditions.uv_index - 4.1).abs() < 0.01);

    let next = conditions.next_hour.expect("next hour should be present");
    assert_eq!(next.time.format("%H:%M").to_string(), "21:00");
    assert!((next.apparent_temperature - 84.3).abs() < 0.01);
    assert!((next.uv_index - 3.2).abs() < 0.01);
}

#[tokio::test]
async fn test_get_air_quality_success() {
    let mock_server = MockServer::start().await;

    setup_air_quality_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_air_quality_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_air_quality(29.65, -82.32).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
    let air = result.unwrap();
    assert_eq!(air.carbon_monoxide, Some(212.0));
    assert_eq!(air.pm10, None);

    let reading = air.reading();
    assert_eq!(reading.len(), 5);
    assert_eq!(reading.get(Pollutant::O3), Some(108.0));
}

#[tokio::test]
async fn test_air_quality_feeds_aqi_engine() {
    let mock_server = MockServer::start().await;

    setup_air_quality_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_air_quality_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let air = client.get_air_quality(29.65, -82.32).await.unwrap();

    let aqi = domain::compute_aqi(&air.reading()).unwrap();
    assert_eq!(aqi.value(), 100);
}

#[tokio::test]
async fn test_health_check_success() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(sample_forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    assert!(client.is_healthy().await);
}

// ============================================================================
// Error scenarios
// ============================================================================

#[tokio::test]
async fn test_server_error_returns_service_unavailable() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(&mock_server, ResponseTemplate::new(500)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_conditions(29.65, -82.32).await;

    assert!(
        matches!(result, Err(WeatherError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_returns_rate_limit_exceeded() {
    let mock_server = MockServer::start().await;

    setup_air_quality_mock(&mock_server, ResponseTemplate::new(429)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_air_quality(29.65, -82.32).await;

    assert!(
        matches!(result, Err(WeatherError::RateLimitExceeded)),
        "Expected RateLimitExceeded, got: {result:?}"
    );
}

#[tokio::test]
async fn test_client_error_returns_request_failed() {
    let mock_server = MockServer::start().await;

    setup_air_quality_mock(&mock_server, ResponseTemplate::new(400)).await;

    let client = create_test_client(&mock_server);
    let result = client.get_air_quality(29.65, -82.32).await;

    assert!(
        matches!(result, Err(WeatherError::RequestFailed(_))),
        "Expected RequestFailed, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_returns_parse_error() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_conditions(29.65, -82.32).await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_missing_current_block_returns_parse_error() {
    let mock_server = MockServer::start().await;

    setup_air_quality_mock(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 29.65,
            "longitude": -82.32
        })),
    )
    .await;

    let client = create_test_client(&mock_server);
    let result = client.get_air_quality(29.65, -82.32).await;

    assert!(
        matches!(result, Err(WeatherError::ParseError(_))),
        "Expected ParseError, got: {result:?}"
    );
}

#[tokio::test]
async fn test_health_check_failure() {
    let mock_server = MockServer::start().await;

    setup_forecast_mock(&mock_server, ResponseTemplate::new(503)).await;

    let client = create_test_client(&mock_server);
    assert!(!client.is_healthy().await);
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn test_invalid_coordinates_rejected_before_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_conditions(95.0, 0.0).await;
    assert!(
        matches!(result, Err(WeatherError::InvalidCoordinates)),
        "Expected InvalidCoordinates, got: {result:?}"
    );

    let result = client.get_air_quality(0.0, -200.0).await;
    assert!(
        matches!(result, Err(WeatherError::InvalidCoordinates)),
        "Expected InvalidCoordinates, got: {result:?}"
    );
}

// ============================================================================
// Request verification
// ============================================================================

#[tokio::test]
async fn test_conditions_request_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("latitude", "29.65"))
        .and(query_param("longitude", "-82.32"))
        .and(query_param("current", "apparent_temperature,weather_code,uv_index"))
        .and(query_param("hourly", "apparent_temperature,uv_index"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_conditions(29.65, -82.32).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_air_quality_request_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/air-quality"))
        .and(query_param("latitude", "29.65"))
        .and(query_param("longitude", "-82.32"))
        .and(query_param(
            "current",
            "carbon_monoxide,nitrogen_dioxide,ozone,sulphur_dioxide,pm2_5,pm10",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_air_quality_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_air_quality(29.65, -82.32).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}
