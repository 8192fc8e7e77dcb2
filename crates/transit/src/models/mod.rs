//! Route, trip and schedule data models.

pub mod time;
pub mod types;

#[cfg(feature = "serde")]
pub mod serde_impl;

// Re-exports for convenience
pub use time::{parse_time, seconds_since_midnight, seconds_to_time, time_to_seconds};
pub use types::{
    DeviationResult, Direction, Result, Route, ScheduleConfig, Stop, TransitError, Trip, TurnRest,
};
