//! Service diagrams: alternating outbound/inbound legs over a service window.
//!
//! Every turn gets the same share of the window (`duration / turns`), rest
//! included. Whatever is left after resting is driving time, split between
//! the two directions in proportion to their route lengths and rounded to
//! whole seconds. The rounding can make a turn drift by a second; the next
//! turn still starts on its fixed slot, so the drift never accumulates.

use crate::identifiers::TripIdentifier;
use crate::models::types::{Direction, Route, ScheduleConfig, Stop, Trip};
use crate::schedule::interpolate::fill_intermediate_times_in_place;
use crate::spatial::path::route_length;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItineraryError {
    #[error("Service window must end after it starts ({start}s..{end}s)")]
    InvalidWindow { start: u32, end: u32 },

    #[error("{turns} turns do not make up a single leg")]
    NoLegs { turns: f64 },

    #[error("Route {route} needs at least two stops")]
    TooFewStops { route: String },

    #[error("Neither route has any length")]
    ZeroDistance,

    #[error("Rest of turn {turn} exceeds its duration")]
    RestExceedsTurn { turn: usize },
}

/// Build the trips of a diagram, reporting why a configuration is rejected.
pub fn try_compute_itinerary(
    config: &ScheduleConfig,
    outbound: &Route,
    inbound: &Route,
) -> Result<Vec<Trip>, ItineraryError> {
    if config.start_time >= config.end_time {
        return Err(ItineraryError::InvalidWindow {
            start: config.start_time,
            end: config.end_time,
        });
    }

    let turns = config.turns;
    if !turns.is_finite() || turns <= 0.0 {
        return Err(ItineraryError::NoLegs { turns });
    }
    let total_legs = (turns * 2.0).floor() as usize;
    if total_legs == 0 {
        return Err(ItineraryError::NoLegs { turns });
    }

    for route in [outbound, inbound] {
        if route.stops.len() < 2 {
            return Err(ItineraryError::TooFewStops {
                route: route.name.clone(),
            });
        }
    }

    let dist_out = route_length(&outbound.stops);
    let dist_in = route_length(&inbound.stops);
    let total_dist = dist_out + dist_in;
    if total_dist <= 0.0 {
        return Err(ItineraryError::ZeroDistance);
    }

    let start = config.start_time as f64;
    let duration_per_turn = config.service_duration() as f64 / turns;

    tracing::debug!(
        total_legs,
        duration_per_turn,
        dist_out,
        dist_in,
        "computing itinerary"
    );

    let mut trips = Vec::with_capacity(total_legs);

    for leg in 0..total_legs {
        let direction = Direction::for_leg(leg);
        let turn = leg / 2;

        let rest = config.rest_for_turn(turn);
        let driving = duration_per_turn - rest.total() as f64;
        if driving <= 0.0 {
            return Err(ItineraryError::RestExceedsTurn { turn: turn + 1 });
        }

        let duration_out = (driving * dist_out / total_dist).round();
        let duration_in = (driving * dist_in / total_dist).round();

        let turn_start = start + turn as f64 * duration_per_turn;
        let (leg_start, leg_end) = match direction {
            Direction::Outbound => (turn_start, turn_start + duration_out),
            Direction::Inbound => {
                let leg_start = turn_start + duration_out + rest.outbound_rest as f64;
                (leg_start, leg_start + duration_in)
            }
        };

        let template = match direction {
            Direction::Outbound => outbound,
            Direction::Inbound => inbound,
        };

        let start_time = leg_start.floor() as u32;
        let end_time = leg_end.floor() as u32;
        let leg_index = (leg + 1) as u32;

        trips.push(Trip {
            id: TripIdentifier::for_leg(&template.id, leg_index),
            direction,
            leg_index,
            start_time,
            end_time,
            stops: timed_stops(&template.stops, start_time, end_time),
            source_route: template.name.clone(),
        });
    }

    Ok(trips)
}

/// Build the trips of a diagram; rejected configurations yield no trips.
pub fn compute_itinerary(config: &ScheduleConfig, outbound: &Route, inbound: &Route) -> Vec<Trip> {
    match try_compute_itinerary(config, outbound, inbound) {
        Ok(trips) => trips,
        Err(e) => {
            tracing::warn!("itinerary rejected: {e}");
            Vec::new()
        }
    }
}

/// Copy of `template` timed from `start` to `end`, interior stops interpolated.
fn timed_stops(template: &[Stop], start: u32, end: u32) -> Vec<Stop> {
    let mut stops = template.to_vec();
    let last = stops.len() - 1;

    for (i, stop) in stops.iter_mut().enumerate() {
        stop.scheduled_time = match i {
            0 => Some(start),
            i if i == last => Some(end),
            _ => None,
        };
    }

    fill_intermediate_times_in_place(&mut stops);
    stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::time_to_seconds;
    use crate::models::types::TurnRest;

    fn at(time: &str) -> u32 {
        time_to_seconds(time).unwrap()
    }

    fn outbound() -> Route {
        Route::new(
            "ida",
            "Ida",
            vec![
                Stop::new("Terminal", 0.0, 0.0).with_time(at("05:00:00")),
                Stop::new("Centro", 0.0, 0.01),
                Stop::new("Hospital", 0.0, 0.03).with_time(at("05:40:00")),
            ],
        )
    }

    fn inbound() -> Route {
        Route::new(
            "vuelta",
            "Vuelta",
            vec![
                Stop::new("Hospital", 0.0, 0.03).with_time(at("06:00:00")),
                Stop::new("Terminal", 0.0, 0.0).with_time(at("06:30:00")),
            ],
        )
    }

    fn config(turns: f64) -> ScheduleConfig {
        ScheduleConfig::new(at("05:00:00"), at("13:00:00"), turns)
            .with_fallback_rest(TurnRest::from_minutes(5, 5))
    }

    #[test]
    fn test_leg_count_and_alternation() {
        let trips = compute_itinerary(&config(4.5), &outbound(), &inbound());
        assert_eq!(trips.len(), 9);

        for (i, trip) in trips.iter().enumerate() {
            assert_eq!(trip.leg_index as usize, i + 1);
            assert_eq!(trip.direction, Direction::for_leg(i));
        }
        assert_eq!(trips[0].source_route, "Ida");
        assert_eq!(trips[1].source_route, "Vuelta");
        assert_eq!(trips[8].direction, Direction::Outbound);
    }

    #[test]
    fn test_fraction_below_one_leg() {
        assert!(compute_itinerary(&config(0.4), &outbound(), &inbound()).is_empty());
        assert_eq!(
            try_compute_itinerary(&config(0.4), &outbound(), &inbound()),
            Err(ItineraryError::NoLegs { turns: 0.4 })
        );
        assert_eq!(compute_itinerary(&config(0.5), &outbound(), &inbound()).len(), 1);
        assert!(compute_itinerary(&config(0.0), &outbound(), &inbound()).is_empty());
        assert!(compute_itinerary(&config(-2.0), &outbound(), &inbound()).is_empty());
    }

    #[test]
    fn test_invalid_window() {
        let mut cfg = config(2.0);
        cfg.end_time = cfg.start_time;
        assert!(matches!(
            try_compute_itinerary(&cfg, &outbound(), &inbound()),
            Err(ItineraryError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_leg_times_follow_fixed_turns() {
        // 8h over 4 turns: 7200s per turn, 600s of rest, both routes equally long.
        let trips = compute_itinerary(&config(4.0), &outbound(), &inbound());
        assert_eq!(trips.len(), 8);

        assert_eq!(trips[0].start_time, at("05:00:00"));
        assert_eq!(trips[0].end_time, at("05:55:00"));
        assert_eq!(trips[1].start_time, at("06:00:00"));
        assert_eq!(trips[1].end_time, at("06:55:00"));
        assert_eq!(trips[2].start_time, at("07:00:00"));
        assert_eq!(trips[7].end_time, at("12:55:00"));
    }

    #[test]
    fn test_turn_duration_invariant() {
        let cfg = ScheduleConfig::new(at("05:13:00"), at("13:47:00"), 3.5)
            .with_turn_rests([TurnRest::new(420, 180), TurnRest::new(0, 600)])
            .with_fallback_rest(TurnRest::from_minutes(4, 9));
        let trips = compute_itinerary(&cfg, &outbound(), &inbound());
        assert_eq!(trips.len(), 7);

        let per_turn = cfg.service_duration() as f64 / cfg.turns;
        for (turn, pair) in trips.chunks(2).enumerate() {
            if let [out, back] = pair {
                let rest = cfg.rest_for_turn(turn);
                let total = out.duration() + back.duration() + rest.total();
                assert!((total as f64 - per_turn).abs() <= 2.0, "turn {turn}: {total}");
                assert_eq!(back.start_time, out.end_time + rest.outbound_rest);
            }
        }
    }

    #[test]
    fn test_interior_stops_are_interpolated() {
        let trips = compute_itinerary(&config(4.0), &outbound(), &inbound());
        let first = &trips[0];

        assert_eq!(first.stops[0].scheduled_time, Some(at("05:00:00")));
        // Centro lies at a third of the outbound length.
        let centro = first.stops[1].scheduled_time.unwrap();
        assert!((at("05:18:19")..=at("05:18:20")).contains(&centro), "{centro}");
        assert_eq!(first.stops[2].scheduled_time, Some(first.end_time));
    }

    #[test]
    fn test_rest_exceeding_turn_reports_turn() {
        let cfg = config(4.0).with_turn_rests([
            TurnRest::from_minutes(5, 5),
            TurnRest::from_minutes(60, 60),
        ]);
        assert_eq!(
            try_compute_itinerary(&cfg, &outbound(), &inbound()),
            Err(ItineraryError::RestExceedsTurn { turn: 2 })
        );
        assert!(compute_itinerary(&cfg, &outbound(), &inbound()).is_empty());
    }

    #[test]
    fn test_huge_rest_is_rejected_not_wrapped() {
        let cfg = config(4.0).with_fallback_rest(TurnRest::from_minutes(80_000_000, 0));
        assert_eq!(
            try_compute_itinerary(&cfg, &outbound(), &inbound()),
            Err(ItineraryError::RestExceedsTurn { turn: 1 })
        );
    }

    #[test]
    fn test_zero_distance() {
        let flat = Route::new(
            "flat",
            "Plana",
            vec![
                Stop::new("A", 1.0, 1.0).with_time(0),
                Stop::new("B", 1.0, 1.0).with_time(60),
            ],
        );
        assert_eq!(
            try_compute_itinerary(&config(1.0), &flat, &flat),
            Err(ItineraryError::ZeroDistance)
        );
    }

    #[test]
    fn test_too_few_stops() {
        let stub = Route::new("stub", "Corta", vec![Stop::new("A", 0.0, 0.0)]);
        assert_eq!(
            try_compute_itinerary(&config(1.0), &outbound(), &stub),
            Err(ItineraryError::TooFewStops { route: "Corta".into() })
        );
    }

    #[test]
    fn test_idempotent() {
        let a = compute_itinerary(&config(4.5), &outbound(), &inbound());
        let b = compute_itinerary(&config(4.5), &outbound(), &inbound());
        assert_eq!(a, b);
    }

    #[test]
    fn test_templates_untouched() {
        let out = outbound();
        let back = inbound();
        let before = (out.clone(), back.clone());

        let trips = compute_itinerary(&config(4.5), &out, &back);
        assert!(!trips.is_empty());
        assert_eq!((out, back), before);
    }

    #[test]
    fn test_trip_ids_unique() {
        let trips = compute_itinerary(&config(4.5), &outbound(), &inbound());
        let ids: std::collections::HashSet<_> = trips.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), trips.len());
    }
}
