//! Configuration validation.
//!
//! Ensures configuration values are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if:
/// - `LIBRARY_BASE_URL` is not an `http://` or `https://` URL
/// - `REQUEST_TIMEOUT_MS` is set outside 1000..=300000
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            var: "LIBRARY_BASE_URL".into(),
            reason: "must start with http:// or https://".into(),
        });
    }

    if let Some(timeout_ms) = config.request_timeout_ms {
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&timeout_ms) {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT_MS".into(),
                reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
            });
        }
    }

    Ok(())
}
