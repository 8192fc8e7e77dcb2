//! # headway-transit
//!
//! Schedule adherence and service diagrams for a vehicle driving timed routes.
//!
//! ## Features
//!
//! - **Deviation**: Snap a live position onto a route's recorded geometry and
//!   tell how far ahead of or behind schedule the vehicle is
//! - **Interpolation**: Time untimed stops in proportion to driven distance
//! - **Diagrams**: Split a service window into alternating outbound/inbound
//!   legs with per-turn rests
//! - **Serialization**: `serde` support for the model (optional)
//!
//! Everything is a pure function of its inputs; callers own all state.
//!
//! ## Example
//!
//! ```
//! use headway_transit::prelude::*;
//! use geo::Point;
//!
//! let stops = vec![
//!     Stop::new("Plaza", 0.0, 0.0).with_time(time_to_seconds("10:00:00").unwrap()),
//!     Stop::new("Estacion", 0.0, 1.0).with_time(time_to_seconds("10:10:00").unwrap()),
//! ];
//!
//! // Halfway there, one minute late.
//! let now = time_to_seconds("10:06:00").unwrap() as f64;
//! let result = compute_deviation(Point::new(0.5, 0.0), &stops, now).unwrap();
//! assert_eq!(result.formatted(), "-01:00");
//! assert_eq!(result.next_stop_name, "Estacion");
//! ```

pub mod identifiers;
pub mod models;
pub mod schedule;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{time::*, types::*};
    pub use crate::schedule::{
        compute_deviation, compute_deviation_towards, compute_itinerary,
        fill_intermediate_times, fill_intermediate_times_in_place, format_deviation,
        try_compute_itinerary, ItineraryError,
    };
    pub use crate::spatial::{
        detailed_path, distance, distance_km, locate_on_leg, locate_on_route, path_length,
        point_at_progress, project_onto_segment, route_length, PositionFix, Projection,
    };
}

pub use prelude::*;
