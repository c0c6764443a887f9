//! Time and timestamp helpers.

use chrono::{DateTime, Duration, Utc};

/// UTC timestamp used for boost end times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// End of a boost that starts at `start` and lasts `minutes`.
#[must_use]
pub fn boost_end_time(start: Timestamp, minutes: u32) -> Timestamp {
    start + Duration::minutes(i64::from(minutes))
}
