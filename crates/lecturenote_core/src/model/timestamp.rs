//! Millisecond timestamps and their stored integer form.
//!
//! The store keeps epoch milliseconds; every read rebuilds a
//! `DateTime<Utc>` so callers can compare and format.

use chrono::{DateTime, Duration, SubsecRound, Utc};

pub type Timestamp = DateTime<Utc>;

/// Current time truncated to millisecond resolution, so what is written is
/// exactly what is read back.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Next `updated_at` for a record last stamped at `previous`.
///
/// Never returns a value `<= previous`, even when the clock has not advanced
/// a full millisecond (or went backwards).
pub fn next_update_stamp(previous: Timestamp) -> Timestamp {
    let current = now();
    let floor = previous + Duration::milliseconds(1);
    if current > floor {
        current
    } else {
        floor
    }
}

pub fn to_epoch_ms(value: Timestamp) -> i64 {
    value.timestamp_millis()
}

/// Returns `None` when `millis` is outside chrono's representable range.
pub fn from_epoch_ms(millis: i64) -> Option<Timestamp> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}
