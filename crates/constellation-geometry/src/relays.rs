//! Relay repeater satellite (RRS) placement
//!
//! Each relay is dropped next to a uniformly chosen satellite: the
//! satellite's latitude and longitude are each jittered by a uniform draw
//! from `[-jitter, +jitter]` degrees, and its height is kept.

use crate::{GeoPoint, GeometryError, Position3D, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default angular jitter around the host satellite (degrees)
pub const DEFAULT_RELAY_JITTER_DEG: f64 = 5.0;

/// Relay positions for one run. Indices are unrelated to satellite indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelaySet {
    nodes: Vec<Position3D>,
}

impl RelaySet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_positions(nodes: Vec<Position3D>) -> Self {
        Self { nodes }
    }

    pub fn as_slice(&self) -> &[Position3D] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position3D> {
        self.nodes.iter()
    }
}

/// Place `num_relays` relays around `satellites`, drawing from `rng`.
pub fn generate_relays<R: Rng + ?Sized>(
    satellites: &[Position3D],
    num_relays: usize,
    jitter_deg: f64,
    rng: &mut R,
) -> Result<RelaySet> {
    if !jitter_deg.is_finite() || jitter_deg < 0.0 {
        return Err(GeometryError::InvalidJitter(jitter_deg));
    }
    if num_relays == 0 {
        return Ok(RelaySet::empty());
    }
    if satellites.is_empty() {
        return Err(GeometryError::EmptyConstellation(num_relays));
    }

    let mut nodes = Vec::with_capacity(num_relays);
    for _ in 0..num_relays {
        let host = satellites[rng.gen_range(0..satellites.len())].to_geo();
        let lat_offset = rng.gen_range(-jitter_deg..=jitter_deg);
        let lon_offset = rng.gen_range(-jitter_deg..=jitter_deg);

        let relay = GeoPoint::new(
            host.latitude + lat_offset,
            host.longitude + lon_offset,
            host.height_km,
        );
        nodes.push(relay.to_position());
    }

    debug!(
        "Placed {} relays around {} satellites (jitter {:.1} deg)",
        nodes.len(),
        satellites.len(),
        jitter_deg
    );

    Ok(RelaySet { nodes })
}
