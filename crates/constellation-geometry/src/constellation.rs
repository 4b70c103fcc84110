//! Plane-based constellation layout
//!
//! Satellites are spread over `num_planes` planes whose longitude offsets
//! are evenly spaced. Within a plane, slot `s` sits at
//! `asin(2s/n - 1)` latitude (equal area in sine latitude) and advances
//! `360/n` degrees of longitude per slot. Indices are plane-major.

use crate::{transforms, GeoPoint, GeometryError, Position3D, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shape of a generated constellation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlaneLayout {
    pub num_planes: u32,
    pub sats_per_plane: u32,
    pub altitude_km: f64,
}

impl PlaneLayout {
    pub fn new(num_planes: u32, sats_per_plane: u32, altitude_km: f64) -> Self {
        Self {
            num_planes,
            sats_per_plane,
            altitude_km,
        }
    }

    pub fn total_satellites(&self) -> usize {
        self.num_planes as usize * self.sats_per_plane as usize
    }

    pub fn plane_spacing_deg(&self) -> f64 {
        360.0 / self.num_planes as f64
    }

    pub fn in_plane_spacing_deg(&self) -> f64 {
        360.0 / self.sats_per_plane as f64
    }

    /// Geodetic coordinates of `slot` within `plane`
    pub fn slot_geodetic(&self, plane: u32, slot: u32) -> GeoPoint {
        let lon_offset = self.plane_spacing_deg() * plane as f64;
        let fraction = slot as f64 / self.sats_per_plane as f64;
        let latitude = (2.0 * fraction - 1.0).asin().to_degrees();
        let longitude = lon_offset + self.in_plane_spacing_deg() * slot as f64;

        GeoPoint::new(latitude, longitude, self.altitude_km)
    }

    /// (plane, slot) for a plane-major index
    pub fn plane_slot(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.total_satellites() {
            return None;
        }
        let per_plane = self.sats_per_plane as usize;
        Some(((index / per_plane) as u32, (index % per_plane) as u32))
    }
}

/// Immutable, index-addressable satellite positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constellation {
    layout: PlaneLayout,
    positions: Vec<Position3D>,
}

impl Constellation {
    pub fn layout(&self) -> &PlaneLayout {
        &self.layout
    }

    pub fn positions(&self) -> &[Position3D] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<&Position3D> {
        self.positions.get(index)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position3D> {
        self.positions.iter()
    }
}

/// Build `num_planes * sats_per_plane` satellites at `altitude_km`.
///
/// Zero planes or zero slots yield an empty constellation.
pub fn generate_satellites(
    num_planes: u32,
    sats_per_plane: u32,
    altitude_km: f64,
) -> Result<Constellation> {
    if !altitude_km.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate(format!(
            "altitude {} km",
            altitude_km
        )));
    }

    let layout = PlaneLayout::new(num_planes, sats_per_plane, altitude_km);
    let mut positions = Vec::with_capacity(layout.total_satellites());

    for plane in 0..num_planes {
        for slot in 0..sats_per_plane {
            let geo = layout.slot_geodetic(plane, slot);
            positions.push(transforms::project(geo.latitude, geo.longitude, geo.height_km));
        }
    }

    debug!(
        "Generated {} satellites ({} planes x {}) at {:.1} km",
        positions.len(),
        num_planes,
        sats_per_plane,
        altitude_km
    );

    Ok(Constellation { layout, positions })
}
