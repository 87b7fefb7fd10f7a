//! Library lookup service client.
//!
//! This module provides:
//! - [`LibraryClient`]: the HTTP session and requester
//! - [`lookup`]: the fetch → sanitize pipeline over any [`RecordSource`]
//! - Record types in canonical field order
//!
//! # Example
//!
//! ```no_run
//! use library_lookup::library::{ClientConfig, LibraryClient};
//!
//! # async fn run() -> Result<(), library_lookup::error::LookupError> {
//! let client = LibraryClient::new(ClientConfig::new().with_cookie("session=..."))?;
//! if let Some(record) = client.fetch("13812345678").await {
//!     for line in client.format_display(&record) {
//!         println!("{line}");
//!     }
//! }
//! client.close();
//! # Ok(())
//! # }
//! ```
//!
//! [`RecordSource`]: crate::traits::RecordSource

mod client;
mod config;
mod types;

pub use client::{lookup, LibraryClient};
pub use config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_REFERER, DEFAULT_USER_AGENT, QUERY_PARAM,
};
pub use types::{DisplayLines, FieldKey, RawRecord, SanitizedRecord};
