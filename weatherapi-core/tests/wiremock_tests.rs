//! Client behaviour against a mock WeatherAPI.com server.

use serde_json::json;
use weatherapi_core::{
    ApiError, ClientConfig, LocationQuery, Outcome, StatusCode, WeatherApi, WeatherApiClient,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

const KEY: &str = "TEST_KEY";

fn client_for(server: &MockServer) -> WeatherApiClient {
    WeatherApiClient::new(ClientConfig::new(KEY).with_base_url(server.uri()))
}

fn paris_current() -> serde_json::Value {
    json!({
        "location": {"name": "Paris"},
        "current": {"temp_c": 21.0, "condition": {"text": "Clear"}}
    })
}

fn merida_alerts() -> serde_json::Value {
    json!({
        "location": {"name": "Merida"},
        "alerts": {"alert": [{"headline": "Flood"}, {"headline": "Wind"}]}
    })
}

#[tokio::test]
async fn current_sends_one_get_with_key_location_and_aqi() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .and(query_param("key", KEY))
        .and(query_param("q", "Salt lake city"))
        .and(query_param("aqi", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).fetch_current(&"Salt lake city".into()).await.unwrap();
    assert!(reply.is_success());
}

#[tokio::test]
async fn alerts_sends_one_get_without_aqi() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alerts.json"))
        .and(query_param("key", KEY))
        .and(query_param("q", "21.8,-90.8W"))
        .and(query_param_is_missing("aqi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(merida_alerts()))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server).fetch_alerts(&"21.8,-90.8W".into()).await.unwrap();
    assert!(reply.is_success());
}

#[tokio::test]
async fn current_success_decodes_fields_and_keeps_raw_body() {
    let server = MockServer::start().await;

    let mut body = paris_current();
    body["air_quality"] = json!({"index": 2});

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let reply = client_for(&server).fetch_current(&"Paris".into()).await.unwrap();
    assert_eq!(reply.http.status, StatusCode::OK);

    match reply.outcome {
        Outcome::Success { raw, data } => {
            assert_eq!(raw, body);
            assert_eq!(data.location_name, "Paris");
            assert_eq!(data.condition_text, "Clear");
            assert_eq!(data.air_quality_index, Some(json!(2)));
        }
        Outcome::Failure => panic!("expected success"),
    }
}

#[tokio::test]
async fn non_200_is_returned_not_raised() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let reply = client_for(&server).fetch_current(&"Nowhere".into()).await.unwrap();
    assert_eq!(reply.http.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.http.body, "not found");
    assert_eq!(reply.outcome, Outcome::Failure);
}

#[tokio::test]
async fn non_json_error_body_is_not_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alerts.json"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<html>denied</html>"))
        .mount(&server)
        .await;

    let reply = client_for(&server).fetch_alerts(&"Paris".into()).await.unwrap();
    assert!(!reply.is_success());
    assert!(reply.data().is_none());
    assert_eq!(reply.http.body, "<html>denied</html>");
}

#[tokio::test]
async fn alerts_are_returned_in_response_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alerts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(merida_alerts()))
        .mount(&server)
        .await;

    let reply = client_for(&server).fetch_alerts(&"Merida".into()).await.unwrap();
    let report = reply.data().expect("success reply");

    assert_eq!(report.location_name, "Merida");
    let headlines: Vec<_> = report.alerts.iter().map(|a| a["headline"].clone()).collect();
    assert_eq!(headlines, vec![json!("Flood"), json!("Wind")]);
}

#[tokio::test]
async fn missing_alert_list_is_a_distinct_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/alerts.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"location": {"name": "Merida"}})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_alerts(&"Merida".into()).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField { field: "alerts.alert", .. }));
}

#[tokio::test]
async fn missing_location_on_success_is_a_distinct_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"current": {"temp_c": 3.5, "condition": {"text": "Fog"}}}),
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_current(&"Paris".into()).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingField { field: "location.name", .. }));
}

#[tokio::test]
async fn invalid_json_on_success_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_current(&"Paris".into()).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn repeated_calls_give_identical_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/current.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_current()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let location = LocationQuery::from("Paris");

    let first = client.fetch_current(&location).await.unwrap();
    let second = client.fetch_current(&location).await.unwrap();

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.http.body, second.http.body);
}
