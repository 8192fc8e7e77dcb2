//! Core data types for routes, generated trips and schedule configuration.

use geo::Point;

use crate::identifiers::*;
use crate::models::time::seconds_to_time;

// ============================================================================
// Enums
// ============================================================================

/// Leg direction within a turn. Every turn starts with the outbound leg.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum Direction {
    Outbound = 0,
    Inbound = 1,
}

impl Direction {
    /// Direction of the zero-based `leg` of a diagram.
    pub fn for_leg(leg: usize) -> Self {
        if leg % 2 == 0 {
            Self::Outbound
        } else {
            Self::Inbound
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A named waypoint on a route.
///
/// `interior_path` is the recorded polyline from this stop to the *next* one,
/// so the last stop of a route never contributes geometry of its own.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::models::serde_impl::StopRecord", into = "crate::models::serde_impl::StopRecord")
)]
pub struct Stop {
    pub name: String,
    /// `x` is longitude, `y` is latitude.
    pub location: Point,
    /// Seconds since midnight, if this stop is timed.
    pub scheduled_time: Option<u32>,
    pub interior_path: Vec<Point>,
}

impl Stop {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            location: Point::new(lng, lat),
            scheduled_time: None,
            interior_path: Vec::new(),
        }
    }

    pub fn with_time(mut self, seconds: u32) -> Self {
        self.scheduled_time = Some(seconds);
        self
    }

    /// Append interior points given as `(lat, lng)` pairs.
    pub fn with_path(mut self, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.interior_path
            .extend(points.into_iter().map(|(lat, lng)| Point::new(lng, lat)));
        self
    }

    pub fn lat(&self) -> f64 {
        self.location.y()
    }

    pub fn lng(&self) -> f64 {
        self.location.x()
    }

    /// Scheduled time as `HH:MM:SS`, or an empty string for untimed stops.
    pub fn time_label(&self) -> String {
        self.scheduled_time
            .map(|t| seconds_to_time(t as f64))
            .unwrap_or_default()
    }
}

/// An ordered, timed path a vehicle drives.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id: RouteIdentifier,
    pub name: String,
    pub stops: Vec<Stop>,
}

impl Route {
    pub fn new(id: impl Into<RouteIdentifier>, name: impl Into<String>, stops: Vec<Stop>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stops,
        }
    }

    pub fn stop_index(&self, name: &str) -> Option<usize> {
        self.stops.iter().position(|s| s.name == name)
    }

    pub fn require_stop(&self, name: &str) -> Result<usize> {
        self.stop_index(name)
            .ok_or_else(|| TransitError::StopNotFound(name.to_string()))
    }

    /// Check that the route can be driven: two or more stops, with the first
    /// and last ones timed.
    pub fn validate(&self) -> Result<()> {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Err(TransitError::TooFewStops(self.id.clone()));
        };
        if self.stops.len() < 2 {
            return Err(TransitError::TooFewStops(self.id.clone()));
        }

        for stop in [first, last] {
            if stop.scheduled_time.is_none() {
                return Err(TransitError::InvalidData(format!(
                    "terminal stop {:?} of route {} has no scheduled time",
                    stop.name, self.id
                )));
            }
        }
        Ok(())
    }
}

/// One directional traversal of a route inside a diagram.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Trip {
    pub id: TripIdentifier,
    pub direction: Direction,
    /// 1-based position of this leg in the diagram.
    pub leg_index: u32,
    #[cfg_attr(feature = "serde", serde(with = "crate::models::serde_impl::service_time"))]
    pub start_time: u32,
    #[cfg_attr(feature = "serde", serde(with = "crate::models::serde_impl::service_time"))]
    pub end_time: u32,
    pub stops: Vec<Stop>,
    /// Name of the template route the stops were copied from.
    pub source_route: String,
}

impl Trip {
    pub fn duration(&self) -> u32 {
        self.end_time.saturating_sub(self.start_time)
    }
}

/// Rest taken after each leg of one turn, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TurnRest {
    pub outbound_rest: u32,
    pub inbound_rest: u32,
}

impl TurnRest {
    pub fn new(outbound_rest: u32, inbound_rest: u32) -> Self {
        Self {
            outbound_rest,
            inbound_rest,
        }
    }

    /// Saturates at `u32::MAX` seconds, which no turn can fit.
    pub fn from_minutes(outbound: u32, inbound: u32) -> Self {
        Self::new(outbound.saturating_mul(60), inbound.saturating_mul(60))
    }

    pub fn total(&self) -> u32 {
        self.outbound_rest.saturating_add(self.inbound_rest)
    }
}

/// Service window and rest budget for one diagram.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScheduleConfig {
    #[cfg_attr(feature = "serde", serde(with = "crate::models::serde_impl::service_time"))]
    pub start_time: u32,
    #[cfg_attr(feature = "serde", serde(with = "crate::models::serde_impl::service_time"))]
    pub end_time: u32,
    /// Outbound+inbound cycles; a trailing half turn is an outbound-only leg.
    pub turns: f64,
    /// Rest per turn, indexed by zero-based turn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_turn_rest: Vec<TurnRest>,
    /// Used for turns beyond `per_turn_rest`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fallback_rest: TurnRest,
}

impl ScheduleConfig {
    pub fn new(start_time: u32, end_time: u32, turns: f64) -> Self {
        Self {
            start_time,
            end_time,
            turns,
            per_turn_rest: Vec::new(),
            fallback_rest: TurnRest::default(),
        }
    }

    pub fn with_fallback_rest(mut self, rest: TurnRest) -> Self {
        self.fallback_rest = rest;
        self
    }

    pub fn with_turn_rests(mut self, rests: impl IntoIterator<Item = TurnRest>) -> Self {
        self.per_turn_rest = rests.into_iter().collect();
        self
    }

    /// Rest for the zero-based `turn`, falling back to the global value.
    pub fn rest_for_turn(&self, turn: usize) -> TurnRest {
        self.per_turn_rest
            .get(turn)
            .copied()
            .unwrap_or(self.fallback_rest)
    }

    pub fn service_duration(&self) -> u32 {
        self.end_time.saturating_sub(self.start_time)
    }
}

/// Schedule deviation of a vehicle at one instant.
///
/// Positive `deviation_seconds` means the vehicle is ahead of schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DeviationResult {
    pub deviation_seconds: f64,
    pub next_stop_name: String,
    pub next_stop_index: usize,
    /// Schedule-implied time at the projected position.
    pub expected_time: f64,
    /// Scheduled arrival at the next stop.
    pub next_stop_time: Option<u32>,
}

impl DeviationResult {
    pub fn is_ahead(&self) -> bool {
        self.deviation_seconds >= 0.0
    }

    /// Signed `MM:SS` rendering, e.g. `+01:00` or `-12:34`.
    pub fn formatted(&self) -> String {
        crate::schedule::deviation::format_deviation(self.deviation_seconds)
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TransitError {
    #[error("Invalid time: {0:?}")]
    InvalidTime(String),

    #[error("Route {0} needs at least two stops")]
    TooFewStops(RouteIdentifier),

    #[error("Stop not found: {0}")]
    StopNotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, TransitError>;
