//! Canonical datetime encoding.
//!
//! Datetime properties are stored as strings in the canonical form
//! `YYYY-MM-DDTHH:MM:SS.ffffffZ` and parsed back on access.

use crate::error::Result;
use chrono::{DateTime, NaiveDateTime, Utc};

/// Format used when encoding datetimes.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Format used when parsing; the fractional part is optional.
const DATETIME_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Zero value of a datetime property.
pub const DATETIME_ZERO: &str = "0001-01-01T00:00:00.000000Z";

/// Encodes a datetime into its canonical string form.
#[must_use]
pub fn datetime_string(value: &DateTime<Utc>) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parses a canonical datetime string.
///
/// # Errors
/// Returns `Error::Datetime` if the string is not in canonical form.
pub fn datetime_parse(value: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_PARSE_FORMAT)?;
    Ok(naive.and_utc())
}

/// Returns the current time in canonical form.
#[must_use]
pub fn datetime_current() -> String {
    datetime_string(&Utc::now())
}
