//! Service-day clock values.
//!
//! Times are seconds since midnight of the service day. At the boundary with
//! callers they travel as `HH:MM:SS` strings; hours are not wrapped, so a leg
//! running past midnight renders as `24:10:00`.

use chrono::{NaiveTime, Timelike};

use crate::models::types::{Result, TransitError};

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Parse `HH:MM:SS` (or `HH:MM`) into seconds since midnight.
///
/// Returns `None` for an empty string, any non-numeric component, or a value
/// too large for a `u32` second count.
pub fn time_to_seconds(time: &str) -> Option<u32> {
    let time = time.trim();
    if time.is_empty() {
        return None;
    }

    let mut parts = time.split(':');
    let hours: u32 = parts.next()?.trim().parse().ok()?;
    let minutes: u32 = parts.next()?.trim().parse().ok()?;
    let seconds: u32 = match parts.next() {
        Some(s) => s.trim().parse().ok()?,
        None => 0,
    };

    if parts.next().is_some() {
        return None;
    }

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Like [`time_to_seconds`], but reports which input was rejected.
pub fn parse_time(time: &str) -> Result<u32> {
    time_to_seconds(time).ok_or_else(|| TransitError::InvalidTime(time.to_string()))
}

/// Render seconds since midnight as zero-padded `HH:MM:SS`.
///
/// Fractional seconds are floored; negative values clamp to midnight.
pub fn seconds_to_time(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() {
        total_seconds.max(0.0).floor() as u64
    } else {
        0
    };

    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Seconds since midnight for a wall-clock reading.
pub fn seconds_since_midnight(time: NaiveTime) -> u32 {
    time.num_seconds_from_midnight()
}
