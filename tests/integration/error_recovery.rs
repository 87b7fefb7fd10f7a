//! Error recovery and edge case tests.
//!
//! Every failure collapses to `None` and leaves the client usable.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use library_lookup::error::LookupError;
use library_lookup::library::{ClientConfig, LibraryClient};
use wiremock::ResponseTemplate;

use super::{client_for, full_body, start_service, QUERY_PATH};

#[tokio::test]
async fn test_server_error_returns_none() {
    let server = start_service(ResponseTemplate::new(500)).await;
    let client = client_for(&server, true);

    assert!(client.fetch("x").await.is_none());
    assert_eq!(
        client.try_fetch_raw("x").await.unwrap_err(),
        LookupError::HttpStatus { status: 500 }
    );
}

#[tokio::test]
async fn test_forbidden_returns_none() {
    let server = start_service(ResponseTemplate::new(403).set_body_json(full_body())).await;
    let client = client_for(&server, true);
    assert!(client.fetch("x").await.is_none());
}

#[tokio::test]
async fn test_truncated_json_returns_none() {
    let server = start_service(ResponseTemplate::new(200).set_body_string("{\"data\": {")).await;
    let client = client_for(&server, true);
    assert!(client.fetch("x").await.is_none());
}

#[tokio::test]
async fn test_empty_data_returns_none() {
    let server =
        start_service(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
            .await;
    let client = client_for(&server, true);

    assert!(client.fetch("x").await.is_none());
    assert_eq!(
        client.try_fetch_raw("x").await.unwrap_err(),
        LookupError::EmptyData
    );
}

#[tokio::test]
async fn test_all_fields_empty_yields_empty_record() {
    let body = serde_json::json!({"data": {"names": [], "phone_numbers": []}});
    let server = start_service(ResponseTemplate::new(200).set_body_json(body)).await;
    let client = client_for(&server, true);

    let record = client.fetch("x").await.expect("non-empty data object");
    assert!(record.is_empty());
    assert!(client.format_display(&record).is_empty());
}

#[tokio::test]
async fn test_unreachable_service_returns_none() {
    let config = ClientConfig::new().with_base_url(format!("http://127.0.0.1:1{QUERY_PATH}"));
    let client = LibraryClient::new(config).unwrap();
    assert!(client.fetch("x").await.is_none());
    client.close();
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = start_service(
        ResponseTemplate::new(200)
            .set_body_json(full_body())
            .set_delay(Duration::from_millis(500)),
    )
    .await;
    let config = ClientConfig::new()
        .with_base_url(format!("{}{QUERY_PATH}", server.uri()))
        .with_timeout_ms(50);
    let client = LibraryClient::new(config).unwrap();

    assert!(client.fetch("x").await.is_none());
}
