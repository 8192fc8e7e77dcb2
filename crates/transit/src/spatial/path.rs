//! Detailed stop-to-stop paths and their lengths.

use geo::{Coord, LineString, Point};

use crate::models::types::Stop;
use crate::spatial::queries::distance_km;

/// Full polyline from `from` to `to`: the stop itself, its recorded interior
/// points, then the next stop. Always has at least two points.
pub fn detailed_path(from: &Stop, to: &Stop) -> LineString {
    let mut coords: Vec<Coord> = Vec::with_capacity(from.interior_path.len() + 2);
    coords.push(from.location.into());
    coords.extend(from.interior_path.iter().map(|p| Coord::from(*p)));
    coords.push(to.location.into());
    LineString::new(coords)
}

/// Length of a polyline in kilometers.
pub fn path_length(path: &LineString) -> f64 {
    path.lines()
        .map(|line| distance_km(line.start_point(), line.end_point()))
        .sum()
}

/// Length of every stop-to-stop path, in stop order.
pub fn leg_lengths(stops: &[Stop]) -> Vec<f64> {
    stops
        .windows(2)
        .map(|pair| path_length(&detailed_path(&pair[0], &pair[1])))
        .collect()
}

/// Total driven length of a stop sequence in kilometers.
pub fn route_length(stops: &[Stop]) -> f64 {
    leg_lengths(stops).iter().sum()
}

/// Point reached after driving `fraction` of the route's length.
///
/// Used to simulate a vehicle along a route. `fraction` is clamped to
/// `[0, 1]`; routes with fewer than two stops have no position.
pub fn point_at_progress(stops: &[Stop], fraction: f64) -> Option<Point> {
    if stops.len() < 2 {
        return None;
    }

    let lengths = leg_lengths(stops);
    let total: f64 = lengths.iter().sum();
    let target = total * fraction.clamp(0.0, 1.0);

    let mut covered = 0.0;
    for (i, leg) in lengths.iter().enumerate() {
        if covered + leg >= target {
            let remaining = target - covered;
            let mut sub_covered = 0.0;

            for line in detailed_path(&stops[i], &stops[i + 1]).lines() {
                let d = distance_km(line.start_point(), line.end_point());
                if sub_covered + d >= remaining {
                    let ratio = if d > 0.0 { (remaining - sub_covered) / d } else { 0.0 };
                    let delta = line.delta();
                    return Some(Point::new(
                        line.start.x + delta.x * ratio,
                        line.start.y + delta.y * ratio,
                    ));
                }
                sub_covered += d;
            }
        }
        covered += leg;
    }

    stops.last().map(|s| s.location)
}
