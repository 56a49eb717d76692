//! Integration tests for `NominatimClient` using wiremock HTTP mocks.

use bizgap_osm::{NominatimClient, OsmError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> NominatimClient {
    NominatimClient::with_base_url("bizgap-test/0.1", 5, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_returns_parsed_candidates() {
    let server = MockServer::start().await;

    let body = json!([
        {
            "place_id": 101,
            "lat": "52.5170365",
            "lon": "13.3888599",
            "display_name": "Berlin, Deutschland",
            "boundingbox": ["52.3382448", "52.6755087", "13.0883450", "13.7611609"],
            "class": "boundary",
            "importance": 0.85
        },
        {
            "place_id": 102,
            "lat": "44.4669",
            "lon": "-71.1857",
            "display_name": "Berlin, New Hampshire, United States",
            "boundingbox": ["44.42", "44.53", "-71.26", "-71.12"]
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Berlin"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client.search("Berlin", 5).await.expect("should parse candidates");

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].place_id, 101);
    assert_eq!(candidates[0].display_name, "Berlin, Deutschland");
    let coord = candidates[0].coordinate().expect("valid coordinate");
    assert!((coord.lat - 52.517_036_5).abs() < 1e-9);
    assert_eq!(candidates[1].boundingbox.len(), 4);
}

#[tokio::test]
async fn search_sends_configured_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("user-agent", "bizgap-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client.search("nowhere", 5).await.expect("empty list is fine");
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn search_surfaces_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("Berlin", 5).await.unwrap_err();

    assert!(
        matches!(err, OsmError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn search_surfaces_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search("Berlin", 5).await.unwrap_err();
    assert!(matches!(err, OsmError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn search_surfaces_connection_failure() {
    // Nothing listens on port 1.
    let client = test_client("http://127.0.0.1:1");
    let err = client.search("Berlin", 5).await.unwrap_err();
    assert!(matches!(err, OsmError::Http(_)), "got: {err:?}");
}
