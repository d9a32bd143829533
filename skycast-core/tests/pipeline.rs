//! End-to-end tests for the two-call lookup pipeline against a mock
//! provider endpoint.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::provider::openweather::OpenWeatherClient;
use skycast_core::{FetchError, FetchStage, LookupError, WeatherProvider};

fn forecast_slot(day: u32, hour: u32, temp: f64) -> serde_json::Value {
    json!({
        "dt": 1_700_006_400_u64 + u64::from(day) * 86_400 + u64::from(hour) * 3_600,
        "dt_txt": format!("2023-11-{:02} {:02}:00:00", 15 + day, hour),
        "weather": [{ "icon": "01d", "description": "clear sky" }],
        "main": { "temp": temp, "humidity": 60 },
        "wind": { "speed": 5.1 }
    })
}

fn envelope(list: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "city": { "name": "Paris", "coord": { "lat": 48.85, "lon": 2.35 } },
        "list": list
    })
}

fn series(days: u32, slots_per_day: u32) -> Vec<serde_json::Value> {
    let mut list = Vec::new();
    for day in 0..days {
        for slot in 0..slots_per_day {
            list.push(forecast_slot(day, slot * 3, 280.0 + f64::from(day)));
        }
    }
    list
}

async fn mount_geocode(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(series(1, 1))))
        .mount(server)
        .await;
}

async fn mount_forecast(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new(server.uri(), "test-key".to_string())
}

#[tokio::test]
async fn lookup_returns_current_plus_capped_forecast() {
    let server = MockServer::start().await;
    mount_geocode(&server).await;
    mount_forecast(&server, envelope(series(7, 8))).await;

    let records = client(&server).resolve_weather("Paris").await.expect("lookup must succeed");

    // 7 distinct dates in the series, capped at 5 forecast days.
    assert_eq!(records.len(), 1 + 5);
    assert!(records.iter().all(|r| r.city == "Paris"));

    let forecast_dates: Vec<String> =
        records[1..].iter().map(|r| r.date.to_string()).collect();
    assert_eq!(
        forecast_dates,
        ["2023-11-15", "2023-11-16", "2023-11-17", "2023-11-18", "2023-11-19"]
    );
}

#[tokio::test]
async fn lookup_with_fewer_distinct_dates_than_cap() {
    let server = MockServer::start().await;
    mount_geocode(&server).await;
    mount_forecast(&server, envelope(series(2, 4))).await;

    let records = client(&server).resolve_weather("Paris").await.expect("lookup must succeed");
    assert_eq!(records.len(), 1 + 2);
}

#[tokio::test]
async fn current_record_reflects_first_series_entry() {
    let server = MockServer::start().await;
    mount_geocode(&server).await;
    mount_forecast(&server, envelope(vec![forecast_slot(0, 0, 300.0)])).await;

    let records = client(&server).resolve_weather("Paris").await.expect("lookup must succeed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].temperature_f, 80.33);
    assert_eq!(records[0].description, "clear sky");
    assert_eq!(records[0].humidity_pct, 60);
}

#[tokio::test]
async fn geocode_failure_is_stage_tagged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Paris"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"city not found"}"#))
        .mount(&server)
        .await;

    let err = client(&server).resolve_weather("Paris").await.unwrap_err();
    match err {
        LookupError::Fetch(fetch) => {
            assert_eq!(fetch.stage(), "geocode");
            assert!(matches!(
                fetch,
                FetchError::Status { stage: FetchStage::Geocode, .. }
            ));
        }
        other => panic!("expected a fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn forecast_malformed_body_is_stage_tagged() {
    let server = MockServer::start().await;
    mount_geocode(&server).await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("lat", "48.85"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).resolve_weather("Paris").await.unwrap_err();
    match err {
        LookupError::Fetch(fetch) => {
            assert_eq!(fetch.stage(), "forecast");
            assert!(matches!(
                fetch,
                FetchError::Malformed { stage: FetchStage::Forecast, .. }
            ));
        }
        other => panic!("expected a fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_forecast_series_fails_with_empty_result() {
    let server = MockServer::start().await;
    mount_geocode(&server).await;
    mount_forecast(&server, envelope(Vec::new())).await;

    let err = client(&server).resolve_weather("Paris").await.unwrap_err();
    match err {
        LookupError::Fetch(fetch) => {
            assert_eq!(fetch.stage(), "empty-result");
            assert!(matches!(fetch, FetchError::EmptyResult { .. }));
        }
        other => panic!("expected a fetch error, got {other:?}"),
    }
}
