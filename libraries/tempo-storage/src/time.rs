//! Timestamps are stored as unix milliseconds in INTEGER columns.

use chrono::{DateTime, SubsecRound, Utc};
use tempo_core::{Result, TempoError};

/// Current time at the precision the database keeps
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub(crate) fn now_millis() -> i64 {
    now().timestamp_millis()
}

pub(crate) fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| TempoError::storage(format!("Invalid timestamp: {}", millis)))
}
