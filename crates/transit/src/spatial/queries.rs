//! Distance and projection primitives on latitude/longitude points.
//!
//! Exact distances use the Haversine formula. Nearest-segment comparisons use
//! a planar projection and an equirectangular metric instead, which is only
//! sound for short segments like the ones between recorded GPS points.

use geo::Point;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers.
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance between two points in kilometers.
pub fn distance_km(p1: Point, p2: Point) -> f64 {
    distance(p1.y(), p1.x(), p2.y(), p2.x())
}

/// Squared equirectangular distance, in squared degrees.
///
/// Only meaningful for ordering candidates against each other.
pub fn approx_distance_sq(p1: Point, p2: Point) -> f64 {
    let mean_lat = ((p1.y() + p2.y()) / 2.0).to_radians();
    let x = (p2.x() - p1.x()) * mean_lat.cos();
    let y = p2.y() - p1.y();
    x * x + y * y
}

/// Foot of the perpendicular from a point onto a segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub point: Point,
    /// Progress from the segment start, clamped to `[0, 1]`.
    pub ratio: f64,
}

/// Project `p` onto the segment `a -> b`, treating degrees as planar
/// coordinates. A zero-length segment projects onto `a` with ratio 0.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> Projection {
    let dx = b.x() - a.x();
    let dy = b.y() - a.y();
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return Projection { point: a, ratio: 0.0 };
    }

    let t = ((p.x() - a.x()) * dx + (p.y() - a.y()) * dy) / len_sq;
    let ratio = t.clamp(0.0, 1.0);

    Projection {
        point: Point::new(a.x() + ratio * dx, a.y() + ratio * dy),
        ratio,
    }
}
