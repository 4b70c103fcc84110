//! Ground-to-ground Link Planner
//!
//! Builds a plane constellation plus a seeded set of relay repeater
//! satellites (RRS), attaches each ground point to its nearest reachable
//! satellite, and reports the minimum-hop satellite route twice: once over
//! direct line of sight only, once with relay-assisted links.
//!
//! # Outcomes
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `NoVisibility` | a ground point sees no satellite, even through relays |
//! | `Unreachable` | both points attach, but no hop sequence joins their satellites |
//! | `Connected` | hop count plus satellite indices, nearest-to-origin first |

use chrono::{DateTime, Utc};
use constellation_geometry::{
    generate_relays, generate_satellites, Constellation, GeoPoint, GeometryError, RelaySet,
    DEFAULT_RELAY_JITTER_DEG,
};
use hop_routing::{find_closest, shortest_path, HopPath, PathOutcome, RoutingError, Topology, TopologyStats};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;
use tracing::{info, warn};

pub mod loader;

pub const DEFAULT_NUM_PLANES: u32 = 4;
pub const DEFAULT_SATS_PER_PLANE: u32 = 10;
pub const DEFAULT_NUM_RELAYS: usize = 20;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Constellation shape and relay placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub num_planes: u32,
    pub sats_per_plane: u32,
    pub num_relays: usize,
    /// Max lat/lon offset of a relay from its host satellite (degrees)
    pub relay_jitter_deg: f64,
    /// Relay RNG seed; `None` draws a fresh one per plan
    pub seed: Option<u64>,
    /// Also materialize both topologies and report their statistics
    pub topology_stats: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            num_planes: DEFAULT_NUM_PLANES,
            sats_per_plane: DEFAULT_SATS_PER_PLANE,
            num_relays: DEFAULT_NUM_RELAYS,
            relay_jitter_deg: DEFAULT_RELAY_JITTER_DEG,
            seed: None,
            topology_stats: false,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_planes == 0 {
            return Err(PlannerError::InvalidConfig("num_planes must be at least 1".into()));
        }
        if self.sats_per_plane == 0 {
            return Err(PlannerError::InvalidConfig(
                "sats_per_plane must be at least 1".into(),
            ));
        }
        if !self.relay_jitter_deg.is_finite() || self.relay_jitter_deg < 0.0 {
            return Err(PlannerError::InvalidConfig(format!(
                "relay_jitter_deg must be a non-negative number, got {}",
                self.relay_jitter_deg
            )));
        }
        Ok(())
    }
}

/// Outcome of one relay configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfigurationOutcome {
    NoVisibility,
    Unreachable,
    Connected(HopPath),
}

impl ConfigurationOutcome {
    /// Hop count, or -1 when no route exists
    pub fn hop_count(&self) -> i64 {
        match self {
            ConfigurationOutcome::Connected(route) => route.hops as i64,
            _ => -1,
        }
    }

    pub fn indices(&self) -> &[usize] {
        match self {
            ConfigurationOutcome::Connected(route) => &route.path,
            _ => &[],
        }
    }
}

impl From<PathOutcome> for ConfigurationOutcome {
    fn from(outcome: PathOutcome) -> Self {
        match outcome {
            PathOutcome::Connected(route) => ConfigurationOutcome::Connected(route),
            PathOutcome::Unreachable => ConfigurationOutcome::Unreachable,
        }
    }
}

/// Connectivity of the direct-only and relay-assisted graphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySummary {
    pub direct: TopologyStats,
    pub with_relays: TopologyStats,
}

/// Full result of a planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub altitude_km: f64,
    pub satellites: usize,
    pub relays: usize,
    pub start_satellite: Option<usize>,
    pub end_satellite: Option<usize>,
    pub without_relays: ConfigurationOutcome,
    pub with_relays: ConfigurationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topology: Option<TopologySummary>,
}

/// Constellation and relays generated for one run
#[derive(Debug, Clone)]
pub struct Network {
    pub constellation: Constellation,
    pub relays: RelaySet,
}

pub struct LinkPlanner {
    config: PlannerConfig,
}

impl LinkPlanner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate the constellation at `altitude_km` and place relays from `rng`
    pub fn build_network<R: Rng + ?Sized>(&self, altitude_km: f64, rng: &mut R) -> Result<Network> {
        let constellation =
            generate_satellites(self.config.num_planes, self.config.sats_per_plane, altitude_km)?;
        let relays = generate_relays(
            constellation.positions(),
            self.config.num_relays,
            self.config.relay_jitter_deg,
            rng,
        )?;

        info!(
            "Network ready: {} satellites, {} relays at {:.1} km",
            constellation.len(),
            relays.len(),
            altitude_km
        );

        Ok(Network {
            constellation,
            relays,
        })
    }

    /// Plan with the configured seed, or a fresh one when unset
    pub fn plan(&self, from: GeoPoint, to: GeoPoint, altitude_km: f64) -> Result<PlanReport> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let network = self.build_network(altitude_km, &mut rng)?;
        let mut report = self.plan_on(&network, from, to)?;
        report.seed = Some(seed);
        Ok(report)
    }

    /// Attach both ground points and route with and without relays.
    ///
    /// Endpoints are chosen with relay assistance for both runs, so the two
    /// hop counts compare the same satellite pair.
    pub fn plan_on(&self, network: &Network, from: GeoPoint, to: GeoPoint) -> Result<PlanReport> {
        from.validate()?;
        to.validate()?;

        let sats = network.constellation.positions();
        let relays = network.relays.as_slice();

        let start = find_closest(&from.to_position(), sats, relays)?;
        let end = find_closest(&to.to_position(), sats, relays)?;

        let (without_relays, with_relays) = match (start, end) {
            (Some(start), Some(end)) => {
                let direct = shortest_path(sats, start, end, &[])?;
                let assisted = shortest_path(sats, start, end, relays)?;
                (
                    ConfigurationOutcome::from(direct),
                    ConfigurationOutcome::from(assisted),
                )
            }
            _ => {
                let missing = match (start, end) {
                    (None, None) => "either point",
                    (None, _) => "origin",
                    _ => "destination",
                };
                warn!("No reachable satellite for {}", missing);
                (ConfigurationOutcome::NoVisibility, ConfigurationOutcome::NoVisibility)
            }
        };

        let topology = if self.config.topology_stats {
            Some(TopologySummary {
                direct: Topology::build(sats, &[])?.stats(),
                with_relays: Topology::build(sats, relays)?.stats(),
            })
        } else {
            None
        };

        info!(
            "Plan complete: without RRS {} hops, with RRS {} hops",
            without_relays.hop_count(),
            with_relays.hop_count()
        );

        Ok(PlanReport {
            generated_at: Utc::now(),
            seed: None,
            from,
            to,
            altitude_km: network.constellation.layout().altitude_km,
            satellites: sats.len(),
            relays: relays.len(),
            start_satellite: start,
            end_satellite: end,
            without_relays,
            with_relays,
            topology,
        })
    }
}

/// Human-readable rendering of a report
pub fn render_text(report: &PlanReport) -> String {
    let mut out = String::new();

    render_section(
        &mut out,
        "WITHOUT RRS",
        "without RRS",
        "No satellite with direct LOS to one or both points.",
        &report.without_relays,
    );
    render_section(
        &mut out,
        "WITH RRS",
        "with RRS",
        "Even with RRS, no satellite connection possible.",
        &report.with_relays,
    );

    if let Some(topology) = &report.topology {
        let _ = writeln!(out, "\n--- TOPOLOGY ---");
        for (label, stats) in [("direct", &topology.direct), ("with RRS", &topology.with_relays)] {
            let _ = writeln!(
                out,
                "{:>9}: {} links, {} components, {} isolated, max degree {}",
                label, stats.links, stats.components, stats.isolated, stats.max_degree
            );
        }
    }

    out
}

fn render_section(
    out: &mut String,
    title: &str,
    label: &str,
    no_visibility: &str,
    outcome: &ConfigurationOutcome,
) {
    let _ = writeln!(out, "\n--- {} ---", title);
    match outcome {
        ConfigurationOutcome::NoVisibility => {
            let _ = writeln!(out, "{}", no_visibility);
        }
        ConfigurationOutcome::Unreachable => {
            let _ = writeln!(out, "Minimum satellites used ({}): -1", label);
            let _ = writeln!(out, "No valid path found.");
        }
        ConfigurationOutcome::Connected(route) => {
            let _ = writeln!(out, "Minimum satellites used ({}): {}", label, route.hops);
            let _ = writeln!(out, "Path (satellite indices): {:?}", route.path);
        }
    }
}
