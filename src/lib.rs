//! Library Lookup Client
//!
//! Queries the library lookup service for records associated with an
//! identifier (phone number, name, ...), masks sensitive fields, and
//! renders the result as display lines.
//!
//! # Pipeline
//!
//! ```text
//! identifier ──▶ fetch_raw ──▶ sanitize ──▶ format_display ──▶ lines
//!               (HTTP GET)   (mask phone/ID)  (label：v1 | v2)
//! ```
//!
//! Every fetch failure is logged and collapses to `None`; the client stays
//! usable for the next call.
//!
//! # Quick Start
//!
//! ```bash
//! LIBRARY_COOKIE='session=...' ./library-lookup 13812345678
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod format;
pub mod library;
pub mod sanitize;
pub mod traits;

#[cfg(test)]
mod test_utils;
