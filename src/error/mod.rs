//! Error types for the library lookup client.
//!
//! This module defines a small error hierarchy:
//! - [`AppError`]: Top-level errors for the binary and host applications
//! - [`LookupError`]: Why a single lookup produced no record
//! - [`ConfigError`]: Configuration errors
//!
//! [`LookupError`] never crosses the public fetch API: the client logs it
//! and degrades to `None`. It is public so hosts and tests can classify
//! failures through [`crate::library::LibraryClient::try_fetch_raw`].

use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Lookup error.
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Lookup failures.
///
/// Each variant is one degradation path of the requester.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {message}")]
    ClientBuild {
        /// Description of the failure.
        message: String,
    },

    /// The request URL could not be built.
    #[error("Invalid request URL: {message}")]
    InvalidUrl {
        /// Description of what's invalid.
        message: String,
    },

    /// Transport failure (connection, DNS, reset).
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error.
        message: String,
    },

    /// Request timed out.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },

    /// Non-200 status.
    #[error("HTTP {status}")]
    HttpStatus {
        /// Status code returned by the service.
        status: u16,
    },

    /// Body was not valid JSON.
    #[error("JSON parsing failed: {message}")]
    MalformedJson {
        /// Description of the parsing error.
        message: String,
    },

    /// Request succeeded but `data` was missing or empty.
    #[error("Request succeeded but data is empty")]
    EmptyData,

    /// `data` had an unexpected shape.
    #[error("Invalid payload: {message}")]
    InvalidPayload {
        /// Description of what was unexpected.
        message: String,
    },
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
