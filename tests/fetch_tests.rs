//! Wire-level tests for the weather fetch, geolocation, and the
//! one-request-at-a-time guarantee.

use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taqs::action::Action;
use taqs::api::{FetchError, WeatherApi};
use taqs::effect::{handle_effect, Effect, EffectContext, WEATHER_TASK};
use taqs::resolver::{LocateError, Locator};
use taqs::tasks::TaskPool;

fn owm_body(temp_kelvin: f64) -> serde_json::Value {
    json!({
        "main": {
            "temp": temp_kelvin,
            "temp_min": temp_kelvin - 3.0,
            "temp_max": temp_kelvin + 3.0,
            "feels_like": temp_kelvin + 1.0,
            "humidity": 45
        },
        "weather": [{ "description": "clear sky", "icon": "01d" }],
        "wind": { "speed": 3.6 }
    })
}

fn test_api(server: &MockServer) -> WeatherApi {
    WeatherApi::new("test-key".into())
        .expect("client")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn test_fetch_normalizes_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_body(300.0)))
        .mount(&server)
        .await;

    let snapshot = test_api(&server)
        .current(34.01325, -6.83255)
        .await
        .expect("fetch");

    assert_eq!(snapshot.temperature_c, 27); // 300.0 K = 26.85 °C
    assert_eq!(snapshot.min_c, 24);
    assert_eq!(snapshot.max_c, 30);
    assert_eq!(snapshot.feels_like_c, 28);
    assert_eq!(snapshot.humidity_pct, 45);
    assert_eq!(snapshot.wind_speed, Some(3.6));
    assert_eq!(snapshot.description, "clear sky");
    assert_eq!(snapshot.icon, "01d");
}

#[tokio::test]
async fn test_fetch_sends_coordinates_as_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "34.01325"))
        .and(query_param("lon", "-6.83255"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_body(290.0)))
        .expect(1)
        .mount(&server)
        .await;

    test_api(&server)
        .current(34.01325, -6.83255)
        .await
        .expect("fetch");
}

#[tokio::test]
async fn test_fetch_maps_non_2xx_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = test_api(&server).current(0.0, 0.0).await;
    assert!(matches!(result, Err(FetchError::Status(status)) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_fetch_without_condition_entry_fails() {
    let server = MockServer::start().await;
    let mut body = owm_body(290.0);
    body["weather"] = json!([]);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let result = test_api(&server).current(0.0, 0.0).await;
    assert!(matches!(result, Err(FetchError::MissingCondition)));
}

#[tokio::test]
async fn test_fetch_tolerates_missing_wind() {
    let server = MockServer::start().await;
    let mut body = owm_body(290.0);
    body.as_object_mut().expect("object").remove("wind");
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let snapshot = test_api(&server).current(0.0, 0.0).await.expect("fetch");
    assert_eq!(snapshot.wind_speed, None);
}

#[tokio::test]
async fn test_locate_parses_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "latitude": 33.9, "longitude": -6.9, "city": "Salé" })),
        )
        .mount(&server)
        .await;

    let locator = Locator::new()
        .expect("client")
        .with_url(format!("{}/json/", server.uri()));

    let position = locator.locate().await.expect("locate");
    assert_eq!(position.lat, 33.9);
    assert_eq!(position.lon, -6.9);
}

#[tokio::test]
async fn test_locate_without_coordinates_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "city": "nowhere" })))
        .mount(&server)
        .await;

    let locator = Locator::new()
        .expect("client")
        .with_url(format!("{}/json/", server.uri()));

    assert!(matches!(
        locator.locate().await,
        Err(LocateError::MissingCoordinates)
    ));
}

#[tokio::test]
async fn test_locate_maps_non_2xx_to_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let locator = Locator::new()
        .expect("client")
        .with_url(format!("{}/json/", server.uri()));

    assert!(matches!(
        locator.locate().await,
        Err(LocateError::Status(status)) if status.as_u16() == 429
    ));
}

#[tokio::test]
async fn test_unknown_city_performs_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_body(290.0)))
        .expect(0)
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut tasks = TaskPool::new(tx);
    let api = test_api(&server);
    let locator = Locator::new()
        .expect("client")
        .with_url(format!("{}/json/", server.uri()));

    let mut ctx = EffectContext {
        tasks: &mut tasks,
        api: &api,
        locator: &locator,
        saved: None,
    };
    handle_effect(Effect::FetchWeather { city_id: "atlantis" }, &mut ctx);

    assert!(!tasks.is_running(WEATHER_TASK));
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(rx.try_recv().is_err(), "no action for an unknown city");
    // expect(0) on the mock verifies no request went out.
}

#[tokio::test]
async fn test_city_change_supersedes_in_flight_request() {
    let server = MockServer::start().await;

    // Rabat answers slowly; Agadir answers immediately.
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "34.01325"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(owm_body(280.0))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "30.4202"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_body(300.0)))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut tasks = TaskPool::new(tx);
    let api = test_api(&server);
    let locator = Locator::new()
        .expect("client")
        .with_url(format!("{}/json/", server.uri()));

    let mut ctx = EffectContext {
        tasks: &mut tasks,
        api: &api,
        locator: &locator,
        saved: None,
    };
    handle_effect(Effect::FetchWeather { city_id: "rabat" }, &mut ctx);
    handle_effect(Effect::FetchWeather { city_id: "agadir" }, &mut ctx);

    let action = tokio::time::timeout(Duration::from_millis(300), rx.recv())
        .await
        .expect("timeout")
        .expect("channel closed");

    match action {
        Action::WeatherDidLoad(snapshot) => {
            assert_eq!(snapshot.temperature_c, 27, "must be Agadir's response")
        }
        other => panic!("unexpected action: {:?}", other),
    }

    // Rabat's late response was aborted with its task: nothing else arrives.
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(rx.try_recv().is_err(), "superseded fetch must stay silent");
}
