//! Trait definitions for mockable dependencies.
//!
//! - [`RecordSource`]: anything that can fetch a [`RawRecord`] for an
//!   identifier. [`crate::library::LibraryClient`] is the production source.
//!
//! Traits are annotated with `#[cfg_attr(test, mockall::automock)]` so unit
//! tests get a generated `MockRecordSource`.

use async_trait::async_trait;

use crate::library::RawRecord;

/// Source of raw lookup records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the raw record for an identifier.
    ///
    /// Returns `None` on any failure or when the source has no data.
    /// Implementations must not panic or surface errors.
    async fn fetch_raw(&self, identifier: &str) -> Option<RawRecord>;
}
