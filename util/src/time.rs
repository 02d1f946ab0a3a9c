//! Civil-date helpers.
//!
//! "Same day" for attendance is decided in one fixed zone regardless of the host
//! clock, so dates are derived from a UTC instant plus a configured offset.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Builds the fixed zone for `offset_minutes` east of UTC.
///
/// Offsets outside a day fall back to UTC; config validation rejects them before
/// the server starts.
pub fn civil_zone(offset_minutes: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_minutes * 60).unwrap_or_else(|| Utc.fix())
}

/// Calendar date (`YYYY-MM-DD`) of `instant` in the fixed zone.
pub fn civil_date(instant: DateTime<Utc>, offset_minutes: i32) -> String {
    instant
        .with_timezone(&civil_zone(offset_minutes))
        .format("%Y-%m-%d")
        .to_string()
}
