//! Integration tests for the library lookup client.
//!
//! These tests verify end-to-end workflows including:
//! - Lookup, masking and display against a mock service
//! - Error recovery paths

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod error_recovery;
mod lookup_workflow;

use library_lookup::library::{ClientConfig, LibraryClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const QUERY_PATH: &str = "/api/query";

/// Start a mock service answering every query with `template`.
pub async fn start_service(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

/// Client pointed at the mock service.
pub fn client_for(server: &MockServer, desensitize: bool) -> LibraryClient {
    let config = ClientConfig::new()
        .with_base_url(format!("{}{QUERY_PATH}", server.uri()))
        .with_desensitize(desensitize);
    LibraryClient::new(config).expect("client should build")
}

/// A full response body as the service returns it.
pub fn full_body() -> serde_json::Value {
    json!({
        "data": {
            "names": ["张三", "张叁"],
            "nicknames": ["小张"],
            "phone_numbers": ["13812345678", "联系电话13912345678转8"],
            "id_numbers": ["110101199003071234", "110101900307123"],
            "qq_numbers": ["10001"],
            "wb_numbers": [],
            "passwords": ["hunter2"],
            "emails": ["zhangsan@example.com"],
            "addresses": ["北京市东城区"]
        }
    })
}
