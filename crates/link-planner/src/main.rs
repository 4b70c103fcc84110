//! Link Planning CLI
//!
//! Finds the minimum number of satellite hops between two ground points,
//! with and without relay repeater satellites.
//!
//! Usage:
//!   plan-link --from "40.7,-74.0,0" --to "51.5,-0.1,0" --altitude 550 \
//!             --seed 42 --json

use anyhow::Result;
use clap::Parser;
use constellation_geometry::GeoPoint;
use link_planner::{loader, render_text, LinkPlanner, PlannerConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "plan-link",
    about = "Plan a ground-to-ground satellite link with and without relay satellites"
)]
struct Args {
    /// Origin as "lat,lon,height_km"
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    from: GeoPoint,

    /// Destination as "lat,lon,height_km"
    #[arg(long, value_parser = parse_geo_point, allow_hyphen_values = true)]
    to: GeoPoint,

    /// Satellite altitude in km
    #[arg(short, long)]
    altitude: f64,

    /// JSON planner config (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of orbital planes
    #[arg(long)]
    planes: Option<u32>,

    /// Satellites per plane
    #[arg(long)]
    sats_per_plane: Option<u32>,

    /// Number of relay satellites
    #[arg(long)]
    relays: Option<usize>,

    /// Relay lat/lon jitter in degrees
    #[arg(long)]
    jitter_deg: Option<f64>,

    /// Relay placement seed
    #[arg(long)]
    seed: Option<u64>,

    /// Report visibility graph statistics
    #[arg(long)]
    topology: bool,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_geo_point(s: &str) -> std::result::Result<GeoPoint, String> {
    let parts: Vec<&str> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return Err(format!("expected \"lat,lon,height_km\", got {:?}", s));
    }

    let mut values = [0.0f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid number {:?}: {}", part, e))?;
    }

    let point = GeoPoint::new(values[0], values[1], values[2]);
    point.validate().map_err(|e| e.to_string())?;
    Ok(point)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(planes) = args.planes {
        config.num_planes = planes;
    }
    if let Some(per_plane) = args.sats_per_plane {
        config.sats_per_plane = per_plane;
    }
    if let Some(relays) = args.relays {
        config.num_relays = relays;
    }
    if let Some(jitter) = args.jitter_deg {
        config.relay_jitter_deg = jitter;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.topology_stats |= args.topology;

    let planner = LinkPlanner::new(config)?;
    let report = planner.plan(args.from, args.to, args.altitude)?;

    if let Some(seed) = report.seed {
        info!("Relay seed: {}", seed);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    Ok(())
}
