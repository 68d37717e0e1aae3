//! Fetch tests against a local mock of the current-weather endpoint.

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use collector_core::{CollectorError, OpenWeatherClient, Reading};

fn client_for(server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::with_base_url("test-key".to_owned(), server.uri()).unwrap()
}

fn full_payload() -> serde_json::Value {
    json!({
        "name": "Greater London",
        "sys": { "country": "GB" },
        "main": { "temp": 18.4, "feels_like": 17.9, "humidity": 72, "pressure": 1021 },
        "wind": { "speed": 3.6 },
        "weather": [ { "main": "Clouds", "description": "scattered clouds" } ]
    })
}

#[tokio::test]
async fn sends_one_metric_request_with_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London,UK"))
        .and(query_param("appid", "test-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.fetch_current("London", "UK").await.unwrap();
}

#[tokio::test]
async fn full_payload_becomes_fully_present_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_payload()))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .fetch_current("London", "UK")
        .await
        .unwrap();

    assert_eq!(record.city, "Greater London");
    assert_eq!(record.country, "GB");
    assert_eq!(record.temperature, Reading::Present(18.4));
    assert_eq!(record.weather, Reading::Present("Clouds".to_owned()));
    assert_eq!(record.wind_speed, Reading::Present(3.6));
}

#[tokio::test]
async fn empty_payload_falls_back_to_requested_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let record = client_for(&server)
        .fetch_current("London", "UK")
        .await
        .unwrap();

    assert_eq!(record.city, "London");
    assert_eq!(record.country, "UK");
    assert_eq!(record.temperature, Reading::Missing);
    assert_eq!(record.description, Reading::Missing);
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_current("Atlantis", "XX")
        .await
        .unwrap_err();

    match err {
        CollectorError::HttpStatus { status, body, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_current("London", "UK")
        .await
        .unwrap_err();

    assert!(matches!(err, CollectorError::Decode(_)));
}
