//! Ahead/behind schedule estimation for a live position.

use geo::Point;

use crate::models::types::{DeviationResult, Stop};
use crate::spatial::locate::{locate_on_leg, locate_on_route, PositionFix};

/// Render signed seconds as `+MM:SS` (ahead) or `-MM:SS` (behind).
///
/// Zero counts as ahead; minutes are not wrapped into hours.
pub fn format_deviation(seconds: f64) -> String {
    let sign = if seconds >= 0.0 { '+' } else { '-' };
    let abs = seconds.abs();
    let minutes = (abs / 60.0).floor() as u64;
    let secs = (abs % 60.0).floor() as u64;
    format!("{sign}{minutes:02}:{secs:02}")
}

fn deviation_from_fix(stops: &[Stop], fix: PositionFix, now: f64) -> Option<DeviationResult> {
    let from = stops.get(fix.stop_index)?;
    let to = stops.get(fix.stop_index + 1)?;

    let t1 = from.scheduled_time? as f64;
    let t2 = to.scheduled_time? as f64;
    let expected_time = t1 + (t2 - t1) * fix.ratio;

    Some(DeviationResult {
        deviation_seconds: expected_time - now,
        next_stop_name: to.name.clone(),
        next_stop_index: fix.stop_index + 1,
        expected_time,
        next_stop_time: to.scheduled_time,
    })
}

/// Deviation of a vehicle at `position` at `now` (seconds since midnight).
///
/// The position is matched against the whole route and the schedule is
/// interpolated by distance along the matched path. Returns `None` when the
/// route cannot be matched or the stops around the match are untimed.
pub fn compute_deviation(position: Point, stops: &[Stop], now: f64) -> Option<DeviationResult> {
    let fix = locate_on_route(stops, position)?;
    deviation_from_fix(stops, fix, now)
}

/// Deviation against a stop chosen by the driver instead of the closest one.
///
/// Only the path leading to `stops[target_index]` is considered. For the
/// first stop there is nothing to project on, so the deviation is the time
/// left until its departure.
pub fn compute_deviation_towards(
    position: Point,
    stops: &[Stop],
    target_index: usize,
    now: f64,
) -> Option<DeviationResult> {
    if target_index == 0 {
        let first = stops.first()?;
        let start = first.scheduled_time? as f64;
        return Some(DeviationResult {
            deviation_seconds: start - now,
            next_stop_name: first.name.clone(),
            next_stop_index: 0,
            expected_time: start,
            next_stop_time: first.scheduled_time,
        });
    }

    let fix = locate_on_leg(stops, target_index, position)?;
    deviation_from_fix(stops, fix, now)
}
