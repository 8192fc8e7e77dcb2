//! Timetables: deviation from schedule, stop-time interpolation and
//! multi-leg service diagrams.

pub mod deviation;
pub mod interpolate;
pub mod itinerary;

pub use deviation::{compute_deviation, compute_deviation_towards, format_deviation};
pub use interpolate::{fill_intermediate_times, fill_intermediate_times_in_place};
pub use itinerary::{compute_itinerary, try_compute_itinerary, ItineraryError};
