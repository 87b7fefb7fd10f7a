//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//! - Secure cookie storage via [`SecretString`]
//!
//! # Example
//!
//! ```
//! use library_lookup::config::{Config, SecretString, DEFAULT_LOG_LEVEL};
//! use library_lookup::library::DEFAULT_BASE_URL;
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     cookie: SecretString::new("session=example"),
//!     desensitize: true,
//!     base_url: DEFAULT_BASE_URL.to_string(),
//!     log_level: DEFAULT_LOG_LEVEL.to_string(),
//!     request_timeout_ms: None,
//! };
//!
//! // The cookie is protected from accidental logging
//! let debug = format!("{:?}", config);
//! assert!(debug.contains("<REDACTED>"));
//! assert!(!debug.contains("session=example"));
//! ```

mod secret;
mod validation;

pub use secret::SecretString;
pub use validation::{validate_config, MAX_TIMEOUT_MS, MIN_TIMEOUT_MS};

use crate::error::ConfigError;
use crate::library::{ClientConfig, DEFAULT_BASE_URL};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Masking is on unless explicitly disabled.
pub const DEFAULT_DESENSITIZE: bool = true;

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
/// The `cookie` field uses [`SecretString`] to prevent accidental logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Session cookie for the lookup service; empty means no `Cookie` header.
    pub cookie: SecretString,
    /// Mask phone and ID numbers before display.
    pub desensitize: bool,
    /// Query endpoint.
    pub base_url: String,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
    /// Request timeout in milliseconds; `None` keeps the transport default.
    pub request_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `LIBRARY_COOKIE`: session cookie (default: empty)
    /// - `LIBRARY_DESENSITIZE`: `true`/`false` (default: `true`)
    /// - `LIBRARY_BASE_URL`: query endpoint (default: the public service)
    /// - `REQUEST_TIMEOUT_MS`: request timeout (default: unset)
    /// - `LOG_LEVEL`: logging level (default: `info`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a value cannot be parsed or fails
    /// validation (see [`validate_config`]).
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let cookie = std::env::var("LIBRARY_COOKIE").unwrap_or_default();
        let desensitize = parse_env_bool("LIBRARY_DESENSITIZE", DEFAULT_DESENSITIZE)?;
        let base_url =
            std::env::var("LIBRARY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());
        let request_timeout_ms = parse_env_opt_u64("REQUEST_TIMEOUT_MS")?;

        let config = Self {
            cookie: SecretString::new(cookie.trim()),
            desensitize,
            base_url,
            log_level,
            request_timeout_ms,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Build the client configuration for [`crate::library::LibraryClient`].
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new()
            .with_base_url(self.base_url.clone())
            .with_cookie(self.cookie.clone())
            .with_desensitize(self.desensitize);
        match self.request_timeout_ms {
            Some(timeout_ms) => config.with_timeout_ms(timeout_ms),
            None => config,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie: SecretString::new(""),
            desensitize: DEFAULT_DESENSITIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            request_timeout_ms: None,
        }
    }
}

/// Parse an optional environment variable as u64.
fn parse_env_opt_u64(name: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => {
            val.trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue {
                    var: name.into(),
                    reason: "must be a positive integer".into(),
                })
        }
        _ => Ok(None),
    }
}

/// Parse an environment variable as a boolean, using a default if not set.
fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    let Ok(val) = std::env::var(name) else {
        return Ok(default);
    };
    match val.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a boolean (true/false)".into(),
        }),
    }
}
