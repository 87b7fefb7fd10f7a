//! Library client configuration.

#![allow(clippy::missing_const_for_fn)]

use crate::config::SecretString;

/// Default query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://library.aiuys.com/api/query";
/// Referer sent with every request.
pub const DEFAULT_REFERER: &str = "https://library.aiuys.com/";
/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
/// Query parameter carrying the identifier.
pub const QUERY_PARAM: &str = "value";

/// Client configuration for the lookup service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Query endpoint.
    pub base_url: String,
    /// Session cookie; the `Cookie` header is omitted when empty.
    pub cookie: SecretString,
    /// Mask phone and ID numbers in fetched records.
    pub desensitize: bool,
    /// Request timeout in milliseconds; `None` keeps the transport default.
    pub timeout_ms: Option<u64>,
}

impl ClientConfig {
    /// Create a new client configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the query endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the session cookie.
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<SecretString>) -> Self {
        self.cookie = cookie.into();
        self
    }

    /// Enable or disable masking.
    #[must_use]
    pub const fn with_desensitize(mut self, desensitize: bool) -> Self {
        self.desensitize = desensitize;
        self
    }

    /// Set a request timeout in milliseconds.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cookie: SecretString::new(""),
            desensitize: true,
            timeout_ms: None,
        }
    }
}
