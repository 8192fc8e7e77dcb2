use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geo::Point;
use std::path::PathBuf;

use headway_transit::prelude::*;

mod input;
mod output;

use input::{parse_clock, parse_rests, read_route, read_route_or_trip, RestPlan};

#[derive(Parser, Debug)]
#[command(
    name = "headway",
    author,
    version,
    about = "Compute service diagrams and schedule deviation from route files",
    long_about = "Reads routes stored as JSON ({id, name, stops: [{name, lat, lng, time, pathNext}]}) \
                  and runs the headway engine on them.\n\n\
                  Times are given as HH:MM or HH:MM:SS; rests are given in minutes."
)]
struct Args {
    /// Verbose output (show debug messages)
    #[arg(short, long, global = true, env = "HEADWAY_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the trips of a service diagram
    Itinerary {
        /// Outbound route file
        #[arg(long, env = "HEADWAY_OUTBOUND")]
        outbound: PathBuf,

        /// Inbound route file
        #[arg(long, env = "HEADWAY_INBOUND")]
        inbound: PathBuf,

        /// Start of service (HH:MM)
        #[arg(long, env = "HEADWAY_START", value_parser = parse_clock)]
        start: u32,

        /// End of service (HH:MM)
        #[arg(long, env = "HEADWAY_END", value_parser = parse_clock)]
        end: u32,

        /// Number of turns, e.g. 4.5
        #[arg(long, env = "HEADWAY_TURNS")]
        turns: f64,

        /// Rest after each outbound leg, in minutes
        #[arg(long, env = "HEADWAY_REST_OUTBOUND", default_value_t = 0)]
        rest_outbound: u32,

        /// Rest after each inbound leg, in minutes
        #[arg(long, env = "HEADWAY_REST_INBOUND", default_value_t = 0)]
        rest_inbound: u32,

        /// Per-turn rests in minutes, e.g. "5:5,10:5"; later turns use the global rests
        #[arg(long, env = "HEADWAY_RESTS", value_parser = parse_rests)]
        rests: Option<RestPlan>,
    },

    /// Report how far ahead of or behind schedule a position is
    Deviation {
        /// Route or trip file
        #[arg(long)]
        route: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Current time (HH:MM:SS); defaults to the local clock
        #[arg(long, value_parser = parse_clock)]
        at: Option<u32>,

        /// Measure against this stop instead of the closest one
        #[arg(long)]
        target: Option<String>,
    },

    /// Fill in the times of untimed stops
    Fill {
        /// Route file
        #[arg(long)]
        route: PathBuf,
    },

    /// Position reached after driving a share of the route
    Locate {
        /// Route or trip file
        #[arg(long)]
        route: PathBuf,

        /// Progress along the route, 0-100
        #[arg(long)]
        progress: f64,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    let json = match args.command {
        Command::Itinerary {
            outbound,
            inbound,
            start,
            end,
            turns,
            rest_outbound,
            rest_inbound,
            rests,
        } => {
            let outbound = read_route(&outbound)?;
            let inbound = read_route(&inbound)?;

            let config = ScheduleConfig::new(start, end, turns)
                .with_fallback_rest(TurnRest::from_minutes(rest_outbound, rest_inbound))
                .with_turn_rests(rests.map(|plan| plan.0).unwrap_or_default());

            log::info!(
                "Diagram {} - {}, {} turns, {} -> {}",
                seconds_to_time(start as f64),
                seconds_to_time(end as f64),
                turns,
                outbound.name,
                inbound.name
            );

            let trips = try_compute_itinerary(&config, &outbound, &inbound)
                .context("Failed to compute itinerary")?;
            log::info!("Generated {} trips", trips.len());

            serde_json::to_string_pretty(&trips)?
        }

        Command::Deviation {
            route,
            lat,
            lng,
            at,
            target,
        } => {
            let route = read_route_or_trip(&route)?;
            let now = at.unwrap_or_else(|| seconds_since_midnight(chrono::Local::now().time()));
            let position = Point::new(lng, lat);

            let result = match target {
                Some(name) => {
                    let index = route.require_stop(&name)?;
                    compute_deviation_towards(position, &route.stops, index, now as f64)
                }
                None => compute_deviation(position, &route.stops, now as f64),
            };

            match result {
                Some(result) => output::deviation_json(&result)?,
                None => {
                    log::warn!("Deviation undefined for this route at {}", seconds_to_time(now as f64));
                    "null".to_string()
                }
            }
        }

        Command::Fill { route } => {
            let mut route = read_route(&route)?;
            route.stops = fill_intermediate_times(route.stops);
            serde_json::to_string_pretty(&route)?
        }

        Command::Locate { route, progress } => {
            let route = read_route_or_trip(&route)?;
            let point = point_at_progress(&route.stops, progress / 100.0)
                .context("Route needs at least two stops")?;
            output::point_json(point)?
        }
    };

    println!("{json}");
    Ok(())
}
