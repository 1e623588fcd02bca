use chrono::{DateTime, Utc};

/// `YYYYMMDD-HHMMSS`, used inside storage object names.
pub fn object_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

/// ISO-8601 UTC without offset, used in the spreadsheet's first column.
/// Microseconds are written only when non-zero.
pub fn row_timestamp(at: DateTime<Utc>) -> String {
    if at.timestamp_subsec_micros() == 0 {
        at.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Trims the applicant name and replaces inner whitespace with `_`.
pub fn sanitize_name(full_name: &str) -> String {
    underscore_whitespace(full_name.trim())
}

/// Like [`sanitize_name`], plus `/` becomes `-` so a role never introduces a path separator.
pub fn sanitize_role(role: &str) -> String {
    underscore_whitespace(role.trim()).replace('/', "-")
}

/// `<name>-<role>-<YYYYMMDD-HHMMSS>-<original filename>`.
pub fn storage_object_name(
    full_name: &str,
    role: &str,
    at: DateTime<Utc>,
    original_filename: &str,
) -> String {
    format!(
        "{}-{}-{}-{}",
        sanitize_name(full_name),
        sanitize_role(role),
        object_timestamp(at),
        original_filename
    )
}

fn underscore_whitespace(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
