//! Time related utils.

use chrono::SecondsFormat;
use chrono::Utc;

/// DateTime in UTC.
pub type DateTime = chrono::DateTime<Utc>;

/// Return the current time in UTC.
pub fn now() -> DateTime {
    Utc::now()
}

/// Timestamp format required by the provider: "2024-01-01T00:00:00Z"
///
/// Seconds precision, literal trailing `Z`.
pub fn format_timestamp(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}
