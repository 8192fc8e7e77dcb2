//! Route geometry: distances, detailed paths and position matching.

pub mod locate;
pub mod path;
pub mod queries;

pub use locate::{locate_on_leg, locate_on_route, PositionFix};
pub use path::{detailed_path, leg_lengths, path_length, point_at_progress, route_length};
pub use queries::{approx_distance_sq, distance, distance_km, project_onto_segment, Projection};
