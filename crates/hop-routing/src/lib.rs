//! Hop Routing
//!
//! Minimum-hop routing across a satellite constellation whose links are
//! decided by line of sight rather than stored:
//!
//! - Nearest visible satellite for an arbitrary point
//! - Breadth-first hop search over the lazily evaluated visibility graph
//! - Optional materialized topology (petgraph) built from the same predicate

use constellation_geometry::{visible, GeometryError, Position3D};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod nearest;
pub mod pathfinder;
pub mod topology;

pub use nearest::find_closest;
pub use pathfinder::shortest_path;
pub use topology::{Topology, TopologyStats};

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Satellite index {index} out of range for constellation of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Constellation is empty")]
    EmptyConstellation,
    #[error("Non-finite position: {0}")]
    NonFinitePosition(String),
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

pub type Result<T> = std::result::Result<T, RoutingError>;

/// A minimum-hop route, start and end inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopPath {
    pub hops: usize,
    pub path: Vec<usize>,
}

impl HopPath {
    pub fn start(&self) -> Option<usize> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<usize> {
        self.path.last().copied()
    }
}

/// Result of a hop search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Connected(HopPath),
    Unreachable,
}

impl PathOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, PathOutcome::Connected(_))
    }

    /// Hop count, or -1 when unreachable
    pub fn hop_count(&self) -> i64 {
        match self {
            PathOutcome::Connected(route) => route.hops as i64,
            PathOutcome::Unreachable => -1,
        }
    }

    /// Satellite indices along the route (empty when unreachable)
    pub fn indices(&self) -> &[usize] {
        match self {
            PathOutcome::Connected(route) => &route.path,
            PathOutcome::Unreachable => &[],
        }
    }

    pub fn route(&self) -> Option<&HopPath> {
        match self {
            PathOutcome::Connected(route) => Some(route),
            PathOutcome::Unreachable => None,
        }
    }
}

/// Implicit graph over satellite indices.
///
/// Nothing is stored besides the two position slices; every edge query
/// re-runs the visibility predicate.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityGraph<'a> {
    satellites: &'a [Position3D],
    relays: &'a [Position3D],
}

impl<'a> VisibilityGraph<'a> {
    pub fn new(satellites: &'a [Position3D], relays: &'a [Position3D]) -> Self {
        Self { satellites, relays }
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    pub fn satellites(&self) -> &'a [Position3D] {
        self.satellites
    }

    pub fn relays(&self) -> &'a [Position3D] {
        self.relays
    }

    /// Edge test between two satellite indices (both must be in range)
    pub fn is_edge(&self, u: usize, v: usize) -> bool {
        visible(&self.satellites[u], &self.satellites[v], self.relays)
    }

    /// Can `point` see satellite `index`, directly or through a relay?
    pub fn sees(&self, point: &Position3D, index: usize) -> bool {
        visible(point, &self.satellites[index], self.relays)
    }

    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.satellites.len() {
            Ok(())
        } else {
            Err(RoutingError::IndexOutOfRange {
                index,
                len: self.satellites.len(),
            })
        }
    }

    /// Reject NaN / infinite satellite or relay coordinates
    pub fn check_finite(&self) -> Result<()> {
        if let Some(i) = self.satellites.iter().position(|p| !p.is_finite()) {
            return Err(RoutingError::NonFinitePosition(format!("satellite {}", i)));
        }
        if let Some(i) = self.relays.iter().position(|p| !p.is_finite()) {
            return Err(RoutingError::NonFinitePosition(format!("relay {}", i)));
        }
        Ok(())
    }
}
