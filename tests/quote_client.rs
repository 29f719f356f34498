//! Quote-of-the-day client against a mock HTTP server.

use serde_json::json;
use voicetask::config::{DEFAULT_QUOTE, QuoteConfig};
use voicetask::quote::{QuoteClient, quote_of_the_day};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> QuoteConfig {
    QuoteConfig {
        url: format!("{}/random", server.uri()),
        timeout_secs: 2,
        ..QuoteConfig::default()
    }
}

#[tokio::test]
async fn returns_content_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "abc",
            "content": "Well begun is half done.",
            "author": "Aristotle"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quote = QuoteClient::new(&config_for(&server)).fetch().await;
    assert_eq!(quote, "Well begun is half done.");
}

#[tokio::test]
async fn error_status_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert_eq!(quote_of_the_day(&config_for(&server)).await, DEFAULT_QUOTE);
}

#[tokio::test]
async fn malformed_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    assert_eq!(quote_of_the_day(&config_for(&server)).await, DEFAULT_QUOTE);
}

#[tokio::test]
async fn missing_content_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"author": "nobody"})))
        .mount(&server)
        .await;

    assert_eq!(quote_of_the_day(&config_for(&server)).await, DEFAULT_QUOTE);
}

#[tokio::test]
async fn unreachable_service_uses_configured_fallback() {
    let config = QuoteConfig {
        url: "http://127.0.0.1:9/random".to_owned(),
        timeout_secs: 1,
        fallback: "Keep going.".to_owned(),
        ..QuoteConfig::default()
    };
    assert_eq!(quote_of_the_day(&config).await, "Keep going.");
}

#[tokio::test]
async fn disabled_quote_skips_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "unused"})))
        .expect(0)
        .mount(&server)
        .await;

    let config = QuoteConfig {
        enabled: false,
        ..config_for(&server)
    };
    assert_eq!(quote_of_the_day(&config).await, DEFAULT_QUOTE);
}
