//! Time helpers.
//!
//! The whole protocol talks in unix milliseconds (UTC); the HTTP surface
//! renders RFC 3339 for human consumption.

use chrono::{DateTime, Utc};

/// Current unix timestamp in milliseconds (UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a unix timestamp in milliseconds to an RFC 3339 string (UTC).
///
/// Out-of-range timestamps fall back to the unix epoch rather than
/// panicking; they can only come from arithmetic bugs, not from the wire.
pub fn millis_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339()
}
