//! Display formatting for sanitized records.

use crate::library::{DisplayLines, SanitizedRecord};

/// Separator between a label and its values (full-width colon).
pub const LABEL_SEPARATOR: &str = "：";

/// Separator between values of one field.
pub const VALUE_SEPARATOR: &str = " | ";

/// Render a sanitized record as `label：v1 | v2` lines in canonical order.
///
/// Fields without a display label are skipped even when present.
///
/// ```
/// use library_lookup::format::format_display;
/// use library_lookup::library::{FieldKey, SanitizedRecord};
///
/// let record = SanitizedRecord::new()
///     .with_field(FieldKey::PhoneNumbers, ["138****5678"])
///     .with_field(FieldKey::Names, ["张三"]);
/// assert_eq!(format_display(&record), vec!["姓名：张三", "号码：138****5678"]);
/// ```
#[must_use]
pub fn format_display(record: &SanitizedRecord) -> DisplayLines {
    record
        .iter()
        .filter(|(_, values)| !values.is_empty())
        .filter_map(|(key, values)| {
            key.label()
                .map(|label| format!("{label}{LABEL_SEPARATOR}{}", values.join(VALUE_SEPARATOR)))
        })
        .collect()
}
