use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use headway_transit::prelude::*;

/// Per-turn rests from the command line.
#[derive(Clone, Debug)]
pub struct RestPlan(pub Vec<TurnRest>);

/// A file holding stops: either a route template or one generated trip.
#[derive(Deserialize)]
#[serde(untagged)]
enum StopsFile {
    Trip(Trip),
    Route(Route),
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn read_route(path: &Path) -> Result<Route> {
    let route: Route = read_json(path)?;
    log::debug!("Loaded route {} ({} stops)", route.name, route.stops.len());

    if let Err(e) = route.validate() {
        log::warn!("{}: {e}", path.display());
    }
    Ok(route)
}

/// Load a route file, or a trip file as a route named after its trip.
pub fn read_route_or_trip(path: &Path) -> Result<Route> {
    let route = match read_json(path)? {
        StopsFile::Trip(trip) => {
            log::debug!("Loaded leg {} of {}", trip.leg_index, trip.source_route);
            Route::new(trip.id.to_string(), trip.source_route, trip.stops)
        }
        StopsFile::Route(route) => {
            log::debug!("Loaded route {}", route.name);
            route
        }
    };
    Ok(route)
}

pub fn parse_clock(s: &str) -> std::result::Result<u32, String> {
    parse_time(s).map_err(|e| e.to_string())
}

/// Parse `out:in` minute pairs separated by commas, e.g. `5:5,10:5`.
pub fn parse_rests(s: &str) -> std::result::Result<RestPlan, String> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            let (outbound, inbound) = part
                .split_once(':')
                .ok_or_else(|| format!("expected OUT:IN minutes, got {part:?}"))?;
            let outbound: u32 = outbound.trim().parse().map_err(|e| format!("{part:?}: {e}"))?;
            let inbound: u32 = inbound.trim().parse().map_err(|e| format!("{part:?}: {e}"))?;
            Ok(TurnRest::from_minutes(outbound, inbound))
        })
        .collect::<std::result::Result<Vec<_>, String>>()
        .map(RestPlan)
}
