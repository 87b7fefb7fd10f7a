//! Library lookup client.
//!
//! This module provides:
//! - The HTTP session to the lookup service
//! - Response classification (status, JSON, empty data, transport)
//! - The fetch → sanitize pipeline

#![allow(clippy::missing_errors_doc)]

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, REFERER, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::config::{ClientConfig, DEFAULT_REFERER, DEFAULT_USER_AGENT, QUERY_PARAM};
use super::types::{DisplayLines, RawRecord, SanitizedRecord};
use crate::error::LookupError;
use crate::format::format_display;
use crate::sanitize::sanitize;
use crate::traits::RecordSource;

/// Client for the library lookup service.
///
/// Owns one HTTP session for its whole lifetime. Concurrent fetches share
/// the session; release it with [`LibraryClient::close`].
#[derive(Debug)]
pub struct LibraryClient {
    client: Client,
    config: ClientConfig,
}

impl LibraryClient {
    /// Open a session with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, LookupError> {
        let headers = default_headers(&config)?;
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(|e| LookupError::ClientBuild {
            message: e.to_string(),
        })?;

        tracing::debug!(
            base_url = %config.base_url,
            has_cookie = !config.cookie.is_empty(),
            desensitize = config.desensitize,
            "Library client created"
        );

        Ok(Self { client, config })
    }

    /// Get the query endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch and sanitize the record for an identifier.
    ///
    /// Masking follows the configured `desensitize` flag. Returns `None` on
    /// any failure; see [`LibraryClient::fetch_raw`].
    pub async fn fetch(&self, identifier: &str) -> Option<SanitizedRecord> {
        lookup(self, identifier, self.config.desensitize).await
    }

    /// Render a sanitized record as display lines.
    #[must_use]
    pub fn format_display(&self, record: &SanitizedRecord) -> DisplayLines {
        format_display(record)
    }

    /// Fetch the raw record, logging and swallowing every failure.
    pub async fn fetch_raw(&self, identifier: &str) -> Option<RawRecord> {
        match self.try_fetch_raw(identifier).await {
            Ok(record) => Some(record),
            Err(e) => {
                log_failure(&e);
                None
            }
        }
    }

    /// Fetch the raw record, returning the failure cause.
    pub async fn try_fetch_raw(&self, identifier: &str) -> Result<RawRecord, LookupError> {
        let url = Url::parse_with_params(&self.config.base_url, &[(QUERY_PARAM, identifier)])
            .map_err(|e| LookupError::InvalidUrl {
                message: e.to_string(),
            })?;
        let start = Instant::now();

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        tracing::debug!(
            status = %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Library response received"
        );
        if status != StatusCode::OK {
            return Err(LookupError::HttpStatus {
                status: status.as_u16(),
            });
        }

        // Content-Type is not reliable, so parse the bytes directly.
        let body = response.bytes().await.map_err(transport_error)?;
        let payload: Value =
            serde_json::from_slice(&body).map_err(|e| LookupError::MalformedJson {
                message: e.to_string(),
            })?;
        let Value::Object(mut payload) = payload else {
            return Err(LookupError::MalformedJson {
                message: "response body is not a JSON object".to_string(),
            });
        };

        let data = payload
            .remove("data")
            .filter(is_truthy)
            .ok_or(LookupError::EmptyData)?;

        tracing::debug!(data = %data, "Library data fetched");
        RawRecord::from_json(&data)
    }

    /// Release the HTTP session.
    ///
    /// Consumes the client, so it cannot be used or closed again.
    pub fn close(self) {
        tracing::debug!(base_url = %self.config.base_url, "Library client closed");
        drop(self.client);
    }
}

#[async_trait]
impl RecordSource for LibraryClient {
    async fn fetch_raw(&self, identifier: &str) -> Option<RawRecord> {
        Self::fetch_raw(self, identifier).await
    }
}

/// Run the fetch → sanitize pipeline against any record source.
pub async fn lookup<S>(source: &S, identifier: &str, mask_enabled: bool) -> Option<SanitizedRecord>
where
    S: RecordSource + ?Sized,
{
    let raw = source.fetch_raw(identifier).await?;
    Some(sanitize(&raw, mask_enabled))
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap, LookupError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(REFERER, HeaderValue::from_static(DEFAULT_REFERER));
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

    if !config.cookie.is_empty() {
        let mut cookie =
            HeaderValue::from_str(config.cookie.expose()).map_err(|_| LookupError::ClientBuild {
                message: "cookie contains characters not allowed in a header".to_string(),
            })?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);
    }

    Ok(headers)
}

fn transport_error(e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        LookupError::Timeout {
            message: e.to_string(),
        }
    } else {
        LookupError::Network {
            message: e.to_string(),
        }
    }
}

/// Falsy values in the service's sense: null, false, 0, "", [] and {}.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn log_failure(error: &LookupError) {
    match error {
        LookupError::HttpStatus { status } => {
            tracing::error!(status, "Library request failed");
        }
        LookupError::MalformedJson { message } => {
            tracing::error!(error = %message, "Library JSON parsing failed");
        }
        LookupError::EmptyData => {
            tracing::error!("Library request succeeded but data is empty");
        }
        other => {
            tracing::error!(error = %other, "Library request error");
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::unused_async
)]
mod tests {
    use super::*;
    use crate::library::FieldKey;
    use crate::test_utils::{mock_source_absent, mock_source_returning, sample_raw_record};
    use crate::traits::MockRecordSource;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const QUERY_PATH: &str = "/api/query";

    fn mock_config(server: &MockServer) -> ClientConfig {
        ClientConfig::default().with_base_url(format!("{}{QUERY_PATH}", server.uri()))
    }

    async fn create_mock_client(server: &MockServer) -> LibraryClient {
        LibraryClient::new(mock_config(server)).unwrap()
    }

    fn success_body() -> serde_json::Value {
        json!({
            "data": {
                "names": ["张三"],
                "nicknames": [],
                "phone_numbers": ["13812345678"],
                "id_numbers": ["110101199003071234"],
                "qq_numbers": ["10001"],
                "wb_numbers": [],
                "passwords": [],
                "emails": ["zhangsan@example.com"],
                "addresses": []
            }
        })
    }

    async fn mount_body(server: &MockServer, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[test]
    fn test_client_new() {
        let client = LibraryClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.base_url(), "https://library.aiuys.com/api/query");
    }

    #[test]
    fn test_client_rejects_invalid_cookie() {
        let config = ClientConfig::default().with_cookie("bad\ncookie");
        let err = LibraryClient::new(config).unwrap_err();
        assert!(matches!(err, LookupError::ClientBuild { .. }));
    }

    #[test]
    fn test_client_debug_hides_cookie() {
        let config = ClientConfig::default().with_cookie("session=top-secret");
        let client = LibraryClient::new(config).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("LibraryClient"));
        assert!(!debug.contains("top-secret"));
    }

    #[tokio::test]
    async fn test_fetch_raw_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("value", "13812345678"))
            .and(header("accept", "*/*"))
            .and(header("referer", DEFAULT_REFERER))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let raw = client.fetch_raw("13812345678").await.unwrap();

        assert_eq!(raw.get(FieldKey::Names).unwrap(), ["张三"]);
        assert_eq!(raw.get(FieldKey::PhoneNumbers).unwrap(), ["13812345678"]);
        assert_eq!(raw.get(FieldKey::Nicknames).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_fetch_sends_cookie_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = LibraryClient::new(mock_config(&server).with_cookie("session=abc")).unwrap();
        assert!(client.fetch_raw("张三").await.is_some());
    }

    #[tokio::test]
    async fn test_fetch_omits_cookie_when_empty() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(200).set_body_json(success_body())).await;

        let client = create_mock_client(&server).await;
        assert!(client.fetch_raw("张三").await.is_some());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("cookie"));
    }

    #[tokio::test]
    async fn test_fetch_encodes_identifier() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("value", "张 三&x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        assert!(client.fetch_raw("张 三&x").await.is_some());
    }

    #[tokio::test]
    async fn test_fetch_masks_when_desensitize_enabled() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(200).set_body_json(success_body())).await;

        let client = create_mock_client(&server).await;
        let record = client.fetch("13812345678").await.unwrap();

        assert_eq!(
            record.get(FieldKey::PhoneNumbers).unwrap(),
            ["138****5678"]
        );
        assert_eq!(
            record.get(FieldKey::IdNumbers).unwrap(),
            ["110101********1234"]
        );
        assert_eq!(record.get(FieldKey::QqNumbers).unwrap(), ["10001"]);
        assert!(record.get(FieldKey::Nicknames).is_none());
    }

    #[tokio::test]
    async fn test_fetch_passes_through_when_desensitize_disabled() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(200).set_body_json(success_body())).await;

        let client = LibraryClient::new(mock_config(&server).with_desensitize(false)).unwrap();
        let record = client.fetch("13812345678").await.unwrap();

        assert_eq!(
            record.get(FieldKey::PhoneNumbers).unwrap(),
            ["13812345678"]
        );
        assert_eq!(
            record.get(FieldKey::IdNumbers).unwrap(),
            ["110101199003071234"]
        );
    }

    #[tokio::test]
    async fn test_fetch_and_format() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(200).set_body_json(success_body())).await;

        let client = create_mock_client(&server).await;
        let record = client.fetch("13812345678").await.unwrap();
        assert_eq!(
            client.format_display(&record),
            vec![
                "姓名：张三",
                "号码：138****5678",
                "身份证：110101********1234",
                "邮箱：zhangsan@example.com",
            ]
        );
    }

    #[tokio::test]
    async fn test_non_json_content_type_is_still_parsed() {
        let server = MockServer::start().await;
        mount_body(
            &server,
            ResponseTemplate::new(200)
                .set_body_raw(success_body().to_string(), "text/html; charset=utf-8"),
        )
        .await;

        let client = create_mock_client(&server).await;
        assert!(client.fetch_raw("x").await.is_some());
    }

    #[tokio::test]
    async fn test_non_200_status() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(503).set_body_json(success_body())).await;

        let client = create_mock_client(&server).await;
        assert_eq!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::HttpStatus { status: 503 }
        );
        assert!(client.fetch("x").await.is_none());
    }

    #[tokio::test]
    async fn test_other_success_status_is_rejected() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(204)).await;

        let client = create_mock_client(&server).await;
        assert_eq!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::HttpStatus { status: 204 }
        );
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(200).set_body_string("<html>oops")).await;

        let client = create_mock_client(&server).await;
        assert!(matches!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::MalformedJson { .. }
        ));
        assert!(client.fetch_raw("x").await.is_none());
    }

    #[tokio::test]
    async fn test_non_object_body() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(200).set_body_json(json!([1, 2]))).await;

        let client = create_mock_client(&server).await;
        assert!(matches!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::MalformedJson { .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_data_variants() {
        for body in [
            json!({}),
            json!({"data": null}),
            json!({"data": {}}),
            json!({"data": []}),
            json!({"data": ""}),
            json!({"msg": "ok"}),
        ] {
            let server = MockServer::start().await;
            mount_body(&server, ResponseTemplate::new(200).set_body_json(body.clone())).await;

            let client = create_mock_client(&server).await;
            assert_eq!(
                client.try_fetch_raw("x").await.unwrap_err(),
                LookupError::EmptyData,
                "body: {body}"
            );
            assert!(client.fetch("x").await.is_none());
        }
    }

    #[tokio::test]
    async fn test_data_with_unexpected_shape() {
        let server = MockServer::start().await;
        mount_body(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"data": ["names"]})),
        )
        .await;

        let client = create_mock_client(&server).await;
        assert!(matches!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::InvalidPayload { .. }
        ));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:1/api/query");
        let client = LibraryClient::new(config).unwrap();
        assert!(matches!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::Network { .. }
        ));
        assert!(client.fetch("x").await.is_none());
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        mount_body(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_millis(500)),
        )
        .await;

        let client = LibraryClient::new(mock_config(&server).with_timeout_ms(50)).unwrap();
        assert!(matches!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn test_invalid_base_url() {
        let client =
            LibraryClient::new(ClientConfig::default().with_base_url("not a url")).unwrap();
        assert!(matches!(
            client.try_fetch_raw("x").await.unwrap_err(),
            LookupError::InvalidUrl { .. }
        ));
        assert!(client.fetch("x").await.is_none());
    }

    #[tokio::test]
    async fn test_client_reusable_after_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("value", "bad"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("value", "good"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        assert!(client.fetch("bad").await.is_none());
        assert!(client.fetch("good").await.is_some());
        client.close();
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_session() {
        let server = MockServer::start().await;
        mount_body(&server, ResponseTemplate::new(200).set_body_json(success_body())).await;

        let client = create_mock_client(&server).await;
        let (a, b) = tokio::join!(client.fetch("a"), client.fetch("b"));
        assert_eq!(a, b);
        assert!(a.is_some());
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_lookup_with_mock_source() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_raw()
            .withf(|id| id.to_string() == "13812345678")
            .times(1)
            .returning(|_| {
                Some(RawRecord::new().with_field(FieldKey::PhoneNumbers, ["13812345678"]))
            });

        let record = lookup(&source, "13812345678", true).await.unwrap();
        assert_eq!(
            record.get(FieldKey::PhoneNumbers).unwrap(),
            ["138****5678"]
        );
    }

    #[tokio::test]
    async fn test_lookup_propagates_absent() {
        let source = mock_source_absent();
        assert!(lookup(&source, "x", true).await.is_none());
    }

    #[tokio::test]
    async fn test_lookup_through_trait_object() {
        let source: Box<dyn RecordSource> = Box::new(mock_source_returning(sample_raw_record()));
        let record = lookup(source.as_ref(), "x", true).await.unwrap();
        assert_eq!(
            record.get(FieldKey::PhoneNumbers).unwrap(),
            ["138****5678", "备注:139****4321(旧)"]
        );
        assert_eq!(record.get(FieldKey::QqNumbers).unwrap(), ["10001"]);
        assert!(record.get(FieldKey::Nicknames).is_none());
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!({"names": []})));
        assert!(is_truthy(&json!(1)));
    }
}
