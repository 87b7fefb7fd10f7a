//! Record sanitization.
//!
//! [`sanitize`] filters a [`RawRecord`] down to its non-empty fields in
//! canonical order and, when masking is enabled, runs phone and ID values
//! through [`mask_phone`] and [`mask_id_number`]. Every other field is
//! copied through unchanged.

mod mask;

pub use mask::{mask_id_number, mask_phone, mask_run, MASK_CHAR};

use crate::library::{FieldKey, RawRecord, SanitizedRecord};

/// Filter and optionally mask a raw record.
///
/// Values are never added or removed; masking only substitutes characters
/// inside the phone and ID fields.
#[must_use]
pub fn sanitize(raw: &RawRecord, mask_enabled: bool) -> SanitizedRecord {
    let mut sanitized = SanitizedRecord::new();
    for key in FieldKey::ALL {
        let Some(values) = raw.get(key).filter(|v| !v.is_empty()) else {
            continue;
        };
        let values = match key {
            FieldKey::PhoneNumbers if mask_enabled => {
                values.iter().map(|v| mask_phone(v)).collect()
            }
            FieldKey::IdNumbers if mask_enabled => {
                values.iter().map(|v| mask_id_number(v)).collect()
            }
            _ => values.to_vec(),
        };
        sanitized.insert(key, values);
    }
    sanitized
}
