//! Test utilities and mock factories.
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::library::{FieldKey, RawRecord};
use crate::traits::MockRecordSource;

/// A raw record with every kind of field, including empty and unlabeled ones.
#[must_use]
pub fn sample_raw_record() -> RawRecord {
    RawRecord::new()
        .with_field(FieldKey::Names, ["张三"])
        .with_field(FieldKey::Nicknames, Vec::<String>::new())
        .with_field(FieldKey::PhoneNumbers, ["13812345678", "备注:13987654321(旧)"])
        .with_field(FieldKey::IdNumbers, ["110101199003071234"])
        .with_field(FieldKey::QqNumbers, ["10001"])
        .with_field(FieldKey::Emails, ["zhangsan@example.com"])
}

/// Create a mock source that always returns `record`.
#[must_use]
pub fn mock_source_returning(record: RawRecord) -> MockRecordSource {
    let mut mock = MockRecordSource::new();
    mock.expect_fetch_raw()
        .returning(move |_| Some(record.clone()));
    mock
}

/// Create a mock source that never has data.
#[must_use]
pub fn mock_source_absent() -> MockRecordSource {
    let mut mock = MockRecordSource::new();
    mock.expect_fetch_raw().returning(|_| None);
    mock
}
