//! End-to-end lookups against a mock OpenWeatherMap endpoint.

use std::time::Duration;

use serde_json::json;
use weather_lookup_core::{
    Coordinates, Icon, LookupError, ReadingView, UiState, WeatherController,
    geolocation::{DisabledGeolocator, FixedGeolocator},
    provider::openweather::OpenWeatherProvider,
    render,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 2023-11-14T22:13:20Z
const OBSERVED_AT: i64 = 1_700_000_000;

/// Helper to create a current-weather body, observed at UTC+1
fn weather_body(name: &str, main: &str) -> serde_json::Value {
    json!({
        "coord": {"lon": 2.35, "lat": 48.85},
        "weather": [{
            "id": 800,
            "main": main,
            "description": format!("{} today", main.to_lowercase()),
            "icon": "01d"
        }],
        "main": {
            "temp": 14.5,
            "feels_like": 13.49,
            "temp_min": 12.0,
            "temp_max": 16.0,
            "pressure": 1021,
            "humidity": 62
        },
        "wind": {"speed": 3.12, "deg": 200},
        "dt": OBSERVED_AT,
        "sys": {"country": "FR"},
        "timezone": 3600,
        "name": name,
        "cod": 200
    })
}

fn reply(name: &str, main: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(weather_body(name, main))
}

fn controller(server: &MockServer) -> WeatherController {
    let url = format!("{}/data/2.5/weather", server.uri());
    WeatherController::new(
        Box::new(OpenWeatherProvider::with_base_url(url)),
        Box::new(DisabledGeolocator),
        Some("TEST_KEY".to_string()),
    )
}

fn shown_location(state: &UiState) -> Option<&str> {
    state.reading().map(|r| r.location_name.as_str())
}

#[tokio::test]
async fn city_query_sends_one_request_with_city_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(reply("Paris", "Clear"))
        .expect(1)
        .mount(&server)
        .await;

    let c = controller(&server);
    let reading = c.submit_city_query(" Paris ").await.expect("reading");

    let view = ReadingView::from(&reading);
    assert_eq!(view.location, "Paris, FR");
    assert_eq!(view.temperature, "15°C");
    assert_eq!(view.feels_like, "13°C");
    assert_eq!(view.humidity, "62%");
    assert_eq!(view.wind_speed, "3.1 m/s");
    assert_eq!(view.pressure, "1021 hPa");
    assert_eq!(view.local_time, "Tuesday 11:13 PM");
    assert_eq!(view.icon, Icon::Clear);
    assert_eq!(c.state(), UiState::Reading(reading));
}

#[tokio::test]
async fn coordinate_query_sends_lat_and_lon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(reply("Paris", "Rain"))
        .expect(1)
        .mount(&server)
        .await;

    let c = WeatherController::new(
        Box::new(OpenWeatherProvider::with_base_url(server.uri())),
        Box::new(FixedGeolocator(Coordinates::new(48.85, 2.35))),
        Some("TEST_KEY".to_string()),
    );

    let reading = c.submit_location_query().await.expect("reading");
    assert_eq!(Icon::for_condition(&reading.condition), Icon::Rain);
}

#[tokio::test]
async fn blank_input_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let c = controller(&server);
    for input in ["", "   "] {
        let result = c.submit_city_query(input).await;
        assert_eq!(result, Err(LookupError::EmptyCity));
        assert_eq!(render(&c.state()), "Error: Please enter a city name.");
    }
}

#[tokio::test]
async fn unsupported_geolocation_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let c = controller(&server);
    let result = c.submit_location_query().await;
    assert_eq!(result, Err(LookupError::GeolocationUnsupported));
}

#[tokio::test]
async fn unauthorized_uses_fixed_message_whatever_the_body() {
    let server = MockServer::start().await;
    let body = json!({"cod": 401, "message": "city not found"});
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(body))
        .mount(&server)
        .await;

    let c = controller(&server);
    let err = c.submit_city_query("Paris").await.unwrap_err();
    assert_eq!(err, LookupError::InvalidCredential);
    assert_eq!(
        c.state().error(),
        Some("Could not fetch weather data. Invalid API key. Please check the configured key.")
    );
}

#[tokio::test]
async fn not_found_reports_provider_message() {
    let server = MockServer::start().await;
    let body = json!({"message": "city not found"});
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let c = controller(&server);
    let err = c.submit_city_query("Nowhereville").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not fetch weather data. city not found"
    );
    assert_eq!(
        c.state().error(),
        Some("Could not fetch weather data. city not found")
    );
}

#[tokio::test]
async fn server_error_without_message_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let c = controller(&server);
    let err = c.submit_city_query("Paris").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not fetch weather data. HTTP error! status: 500"
    );
}

#[tokio::test]
async fn malformed_success_body_is_typed_error() {
    let server = MockServer::start().await;
    let body = json!({"name": "Paris", "cod": 200});
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let c = controller(&server);
    let err = c.submit_city_query("Paris").await.unwrap_err();
    assert!(matches!(err, LookupError::MalformedResponse(_)));

    let state = c.state();
    let message = state.error().unwrap_or_default();
    assert!(message.starts_with("Could not fetch weather data."));
}

#[tokio::test]
async fn unreachable_provider_is_transport_error() {
    // Nothing listens on a port we just released.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let uri = format!("http://{}", listener.local_addr().expect("addr"));
    drop(listener);

    let c = WeatherController::new(
        Box::new(OpenWeatherProvider::with_base_url(uri)),
        Box::new(DisabledGeolocator),
        Some("TEST_KEY".to_string()),
    );
    let err = c.submit_city_query("Paris").await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));

    let state = c.state();
    let message = state.error().unwrap_or_default();
    assert!(message.starts_with("Could not fetch weather data. Network request failed:"));
}

#[tokio::test]
async fn unknown_condition_gets_default_icon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(reply("Catania", "Volcanic"))
        .mount(&server)
        .await;

    let c = controller(&server);
    let reading = c.submit_city_query("Catania").await.expect("reading");
    assert_eq!(ReadingView::from(&reading).icon, Icon::Atmosphere);
}

#[tokio::test]
async fn overlapping_queries_last_completion_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Slowtown"))
        .respond_with(reply("Slowtown", "Snow").set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "Fastville"))
        .respond_with(reply("Fastville", "Clear"))
        .expect(1)
        .mount(&server)
        .await;

    let c = controller(&server);
    // The second query is issued after the first but completes first.
    let (slow, fast) = tokio::join!(c.submit_city_query("Slowtown"), async {
        tokio::task::yield_now().await;
        c.submit_city_query("Fastville").await
    });

    assert!(slow.is_ok());
    assert!(fast.is_ok());
    assert_eq!(shown_location(&c.state()), Some("Slowtown"));
}

#[tokio::test]
async fn new_query_clears_error_while_request_is_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Paris"))
        .respond_with(reply("Paris", "Clouds").set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let c = controller(&server);
    let _ = c.submit_city_query("").await;
    assert!(c.state().error().is_some());

    let (result, in_flight) = tokio::join!(c.submit_city_query("Paris"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        c.state()
    });

    assert_eq!(in_flight, UiState::Idle);
    result.expect("reading");
    let out = render(&c.state());
    assert!(out.starts_with("☁  Paris, FR"));
    assert!(!out.contains("Error"));
}

#[tokio::test]
async fn reading_stays_on_screen_while_next_request_is_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("q", "Oslo"))
        .respond_with(reply("Oslo", "Snow"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("q", "Paris"))
        .respond_with(reply("Paris", "Clouds").set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let c = controller(&server);
    c.submit_city_query("Oslo").await.expect("reading");

    let (result, in_flight) = tokio::join!(c.submit_city_query("Paris"), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        c.state()
    });

    assert_eq!(shown_location(&in_flight), Some("Oslo"));
    result.expect("reading");
    assert_eq!(shown_location(&c.state()), Some("Paris"));
}
