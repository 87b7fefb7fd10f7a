//! Record types for the library lookup service.
//!
//! This module provides:
//! - [`FieldKey`]: the closed set of record attributes, in canonical order
//! - [`RawRecord`]: the `data` payload exactly as returned by the service
//! - [`SanitizedRecord`]: the filtered, optionally masked record
//! - [`DisplayLines`]: human-readable output lines

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LookupError;

/// A record attribute recognized by the lookup service.
///
/// Variant order is the canonical order used for both sanitization and
/// display, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    /// Real names.
    Names,
    /// Nicknames.
    Nicknames,
    /// Telephone numbers (masked when desensitization is on).
    PhoneNumbers,
    /// National ID numbers (masked when desensitization is on).
    IdNumbers,
    /// QQ numbers. Fetched and sanitized, never displayed.
    QqNumbers,
    /// Weibo accounts.
    WbNumbers,
    /// Leaked passwords.
    Passwords,
    /// Email addresses.
    Emails,
    /// Postal addresses.
    Addresses,
}

impl FieldKey {
    /// All keys in canonical order.
    pub const ALL: [Self; 9] = [
        Self::Names,
        Self::Nicknames,
        Self::PhoneNumbers,
        Self::IdNumbers,
        Self::QqNumbers,
        Self::WbNumbers,
        Self::Passwords,
        Self::Emails,
        Self::Addresses,
    ];

    /// Wire name used by the remote service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Names => "names",
            Self::Nicknames => "nicknames",
            Self::PhoneNumbers => "phone_numbers",
            Self::IdNumbers => "id_numbers",
            Self::QqNumbers => "qq_numbers",
            Self::WbNumbers => "wb_numbers",
            Self::Passwords => "passwords",
            Self::Emails => "emails",
            Self::Addresses => "addresses",
        }
    }

    /// Display label, or `None` for keys that are never shown.
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self {
            Self::Names => Some("姓名"),
            Self::Nicknames => Some("昵称"),
            Self::PhoneNumbers => Some("号码"),
            Self::IdNumbers => Some("身份证"),
            Self::QqNumbers => None,
            Self::WbNumbers => Some("微博"),
            Self::Passwords => Some("密码"),
            Self::Emails => Some("邮箱"),
            Self::Addresses => Some("地址"),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown field key: {s}"))
    }
}

/// The `data` payload of a lookup response.
///
/// Values are kept exactly as returned, including empty sequences; filtering
/// happens in [`crate::sanitize::sanitize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<FieldKey, Vec<String>>,
}

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values for a key.
    #[must_use]
    pub fn with_field<I, S>(mut self, key: FieldKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(key, values.into_iter().map(Into::into).collect());
        self
    }

    /// Values for a key, if the service returned it.
    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&[String]> {
        self.fields.get(&key).map(Vec::as_slice)
    }

    /// Number of keys present (including empty ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from the `data` value of a response body.
    ///
    /// Unknown keys are ignored. Arrays are read element-wise (strings
    /// verbatim, other scalars in their JSON form, `null` skipped); a bare
    /// string becomes a single value; `null` means absent.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidPayload`] if `data` is not a JSON object.
    pub fn from_json(data: &Value) -> Result<Self, LookupError> {
        let Value::Object(map) = data else {
            return Err(LookupError::InvalidPayload {
                message: format!("data is not an object: {data}"),
            });
        };

        let mut record = Self::new();
        for (name, value) in map {
            let Ok(key) = name.parse::<FieldKey>() else {
                tracing::trace!(field = %name, "Ignoring unknown field");
                continue;
            };
            let values = match value {
                Value::Null => continue,
                Value::Array(items) => items.iter().filter_map(value_to_string).collect(),
                other => value_to_string(other).into_iter().collect(),
            };
            record.fields.insert(key, values);
        }
        Ok(record)
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// A record filtered to non-empty fields, with sensitive values masked
/// when requested.
///
/// Iteration yields fields in canonical [`FieldKey`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SanitizedRecord {
    fields: BTreeMap<FieldKey, Vec<String>>,
}

impl SanitizedRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values for a key.
    #[must_use]
    pub fn with_field<I, S>(mut self, key: FieldKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, values.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn insert(&mut self, key: FieldKey, values: Vec<String>) {
        self.fields.insert(key, values);
    }

    /// Values for a key.
    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&[String]> {
        self.fields.get(&key).map(Vec::as_slice)
    }

    /// Iterate fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &[String])> {
        self.fields.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Keys present, in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.keys().copied()
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Ordered display lines, one per shown field.
pub type DisplayLines = Vec<String>;
