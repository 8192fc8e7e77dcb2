//! Nearest-point search over a route's detailed geometry.
//!
//! The search visits every sub-segment of every stop-to-stop path, projects
//! the position onto it and keeps the projection with the smallest
//! equirectangular distance. Candidates are compared with a strict `<`, so on
//! ties the earliest stop pair and sub-segment win.
//!
//! There is no off-route threshold: a position far away from the route still
//! snaps to its closest sub-segment.

use geo::Point;

use crate::models::types::Stop;
use crate::spatial::path::detailed_path;
use crate::spatial::queries::{approx_distance_sq, distance_km, project_onto_segment};

/// Where a position lies along a route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionFix {
    /// Index of the stop the matched path starts at; the path ends at
    /// `stop_index + 1`.
    pub stop_index: usize,
    /// Share of the stop-to-stop path length driven at the projected point.
    pub ratio: f64,
    /// The projected point on the route.
    pub point: Point,
    /// Comparison metric of the match, see [`approx_distance_sq`].
    pub distance_sq: f64,
}

/// Best match of `position` on the path between `stops[stop_index]` and
/// `stops[stop_index + 1]`.
fn locate_on_pair(stops: &[Stop], stop_index: usize, position: Point) -> Option<PositionFix> {
    let path = detailed_path(stops.get(stop_index)?, stops.get(stop_index + 1)?);

    let sub_lengths: Vec<f64> = path
        .lines()
        .map(|line| distance_km(line.start_point(), line.end_point()))
        .collect();
    let total: f64 = sub_lengths.iter().sum();

    let mut best: Option<PositionFix> = None;
    let mut best_distance = f64::INFINITY;
    let mut before = 0.0;

    for (j, line) in path.lines().enumerate() {
        let projection = project_onto_segment(position, line.start_point(), line.end_point());
        let distance_sq = approx_distance_sq(position, projection.point);

        // NaN never compares below the seed, so a non-finite position matches nothing.
        if distance_sq < best_distance {
            best_distance = distance_sq;
            let driven = before + sub_lengths[j] * projection.ratio;
            best = Some(PositionFix {
                stop_index,
                ratio: if total > 0.0 { driven / total } else { 0.0 },
                point: projection.point,
                distance_sq,
            });
        }

        before += sub_lengths[j];
    }

    best
}

/// Snap `position` to the closest point of the whole route.
///
/// Returns `None` when the route has fewer than two stops.
pub fn locate_on_route(stops: &[Stop], position: Point) -> Option<PositionFix> {
    let mut best: Option<PositionFix> = None;
    let mut best_distance = f64::INFINITY;

    for i in 0..stops.len().saturating_sub(1) {
        if let Some(fix) = locate_on_pair(stops, i, position) {
            if fix.distance_sq < best_distance {
                best_distance = fix.distance_sq;
                best = Some(fix);
            }
        }
    }

    if let Some(fix) = &best {
        tracing::debug!(
            stop_index = fix.stop_index,
            ratio = fix.ratio,
            "matched position on route"
        );
    }

    best
}

/// Snap `position` to the single path that ends at `stops[target_index]`.
///
/// Returns `None` for the first stop (no path leads to it) and for indices
/// outside the route.
pub fn locate_on_leg(stops: &[Stop], target_index: usize, position: Point) -> Option<PositionFix> {
    if target_index == 0 {
        return None;
    }
    locate_on_pair(stops, target_index - 1, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn straight_route() -> Vec<Stop> {
        vec![
            Stop::new("A", 0.0, 0.0),
            Stop::new("B", 0.0, 1.0),
            Stop::new("C", 0.0, 2.0),
        ]
    }

    #[test]
    fn test_locate_on_straight_route() {
        let fix = locate_on_route(&straight_route(), Point::new(1.25, 0.001)).unwrap();
        assert_eq!(fix.stop_index, 1);
        assert_relative_eq!(fix.ratio, 0.25, epsilon = 1e-9);
        assert_relative_eq!(fix.point.x(), 1.25, epsilon = 1e-12);
        assert_relative_eq!(fix.point.y(), 0.0);
    }

    #[test]
    fn test_ratio_uses_interior_geometry() {
        // (lat, lng): A (0, 0) -> (0, 1) -> (1, 1) -> B (1, 0)
        let stops = vec![
            Stop::new("A", 0.0, 0.0).with_path([(0.0, 1.0), (1.0, 1.0)]),
            Stop::new("B", 1.0, 0.0),
        ];

        // Close to the middle of the second sub-segment.
        let fix = locate_on_route(&stops, Point::new(1.01, 0.5)).unwrap();
        assert_eq!(fix.stop_index, 0);
        assert!(fix.ratio > 0.4 && fix.ratio < 0.6, "ratio {}", fix.ratio);
        assert_relative_eq!(fix.point.x(), 1.0);
    }

    #[test]
    fn test_ties_go_to_first_segment() {
        // B is shared by both paths; a point beyond B projects onto it twice.
        let fix = locate_on_route(&straight_route(), Point::new(1.0, 0.5)).unwrap();
        assert_eq!(fix.stop_index, 0);
        assert_relative_eq!(fix.ratio, 1.0);
    }

    #[test]
    fn test_far_position_still_matches() {
        let stops = vec![Stop::new("A", 0.0, 0.0), Stop::new("B", 0.0, 1.0)];
        assert!(locate_on_route(&stops, Point::new(50.0, 50.0)).is_some());
    }

    #[test]
    fn test_nan_position_matches_nothing() {
        let stops = straight_route();
        assert!(locate_on_route(&stops, Point::new(f64::NAN, 0.0)).is_none());
        assert!(locate_on_route(&stops, Point::new(0.5, f64::NAN)).is_none());
        assert!(locate_on_leg(&stops, 2, Point::new(f64::NAN, f64::NAN)).is_none());
    }

    #[test]
    fn test_too_few_stops() {
        assert!(locate_on_route(&[], Point::new(0.0, 0.0)).is_none());
        assert!(locate_on_route(&[Stop::new("A", 0.0, 0.0)], Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_zero_length_path_has_zero_ratio() {
        let stops = vec![Stop::new("A", 1.0, 1.0), Stop::new("B", 1.0, 1.0)];
        let fix = locate_on_route(&stops, Point::new(3.0, 3.0)).unwrap();
        assert_eq!(fix.ratio, 0.0);
    }

    #[test]
    fn test_locate_on_leg_is_restricted() {
        let stops = straight_route();
        // Position lies on the second path, but the first one was selected.
        let fix = locate_on_leg(&stops, 1, Point::new(1.5, 0.0)).unwrap();
        assert_eq!(fix.stop_index, 0);
        assert_eq!(fix.ratio, 1.0);

        assert!(locate_on_leg(&stops, 0, Point::new(0.0, 0.0)).is_none());
        assert!(locate_on_leg(&stops, 3, Point::new(0.0, 0.0)).is_none());
    }
}
