//! Constellation Geometry
//!
//! Spherical coordinate transforms, midpoint line-of-sight testing, and
//! plane-based constellation / relay placement around a 6371 km sphere.
//!
//! - [`transforms`] - geodetic (lat, lon, height) to Cartesian and back
//! - [`visibility`] - direct and relay-assisted line-of-sight predicates
//! - [`constellation`] - evenly spaced orbital planes
//! - [`relays`] - jittered relay (RRS) placement from a caller-supplied RNG

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod constellation;
pub mod relays;
pub mod visibility;

pub use constellation::{generate_satellites, Constellation, PlaneLayout};
pub use relays::{generate_relays, RelaySet, DEFAULT_RELAY_JITTER_DEG};
pub use visibility::{direct_los, relay_los, visible};

/// Radius of the occluding reference sphere in km
pub const SPHERE_RADIUS_KM: f64 = 6371.0;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("Non-finite coordinate: {0}")]
    NonFiniteCoordinate(String),
    #[error("Invalid relay jitter: {0} deg")]
    InvalidJitter(f64),
    #[error("Cannot place {0} relays around an empty constellation")]
    EmptyConstellation(usize),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Geographic point as supplied by callers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub height_km: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64, height_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            height_km,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite() && self.height_km.is_finite()
    }

    /// Reject NaN / infinite components before they reach the geometry
    pub fn validate(&self) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(GeometryError::NonFiniteCoordinate(format!(
                "({}, {}, {})",
                self.latitude, self.longitude, self.height_km
            )))
        }
    }

    pub fn to_position(&self) -> Position3D {
        transforms::project(self.latitude, self.longitude, self.height_km)
    }
}

/// Cartesian position in km, origin at the sphere's center
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_vector(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Distance from the sphere's center
    pub fn norm(&self) -> f64 {
        self.vector().norm()
    }

    pub fn distance_to(&self, other: &Position3D) -> f64 {
        (self.vector() - other.vector()).norm()
    }

    pub fn midpoint(&self, other: &Position3D) -> Position3D {
        Self::from_vector((self.vector() + other.vector()) / 2.0)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_geo(&self) -> GeoPoint {
        transforms::position_to_geo(self)
    }
}

pub mod transforms {
    use super::*;

    /// Project (lat, lon, height) onto the reference sphere.
    ///
    /// No range checks: out-of-range latitudes wrap through the
    /// trigonometry like any other angle.
    pub fn project(lat_deg: f64, lon_deg: f64, height_km: f64) -> Position3D {
        let lat_rad = lat_deg.to_radians();
        let lon_rad = lon_deg.to_radians();
        let r = SPHERE_RADIUS_KM + height_km;

        Position3D {
            x: r * lat_rad.cos() * lon_rad.cos(),
            y: r * lat_rad.cos() * lon_rad.sin(),
            z: r * lat_rad.sin(),
        }
    }

    /// Inverse of [`project`] on the same sphere
    pub fn position_to_geo(pos: &Position3D) -> GeoPoint {
        let r = (pos.x * pos.x + pos.y * pos.y).sqrt();
        let longitude = pos.y.atan2(pos.x).to_degrees();
        let latitude = pos.z.atan2(r).to_degrees();
        let height_km = pos.norm() - SPHERE_RADIUS_KM;

        GeoPoint {
            latitude,
            longitude,
            height_km,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_project_equator_prime_meridian() {
        let p = transforms::project(0.0, 0.0, 0.0);
        assert!((p.x - SPHERE_RADIUS_KM).abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!(p.z.abs() < EPS);
    }

    #[test]
    fn test_project_north_pole() {
        let p = transforms::project(90.0, 45.0, 500.0);
        assert!(p.x.abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!((p.z - (SPHERE_RADIUS_KM + 500.0)).abs() < EPS);
    }

    #[test]
    fn test_project_radius_includes_height() {
        let p = GeoPoint::new(37.5, -122.3, 1200.0).to_position();
        assert!((p.norm() - (SPHERE_RADIUS_KM + 1200.0)).abs() < EPS);
    }

    #[test]
    fn test_round_trip_through_inverse() {
        let geo = GeoPoint::new(-33.9, 151.2, 550.0);
        let back = geo.to_position().to_geo();
        assert!((back.latitude - geo.latitude).abs() < 1e-9);
        assert!((back.longitude - geo.longitude).abs() < 1e-9);
        assert!((back.height_km - geo.height_km).abs() < EPS);
    }

    #[test]
    fn test_midpoint_and_distance() {
        let a = Position3D::new(2.0, 0.0, 0.0);
        let b = Position3D::new(0.0, 2.0, 0.0);
        assert_eq!(a.midpoint(&b), Position3D::new(1.0, 1.0, 0.0));
        assert!((a.distance_to(&b) - 8.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(GeoPoint::new(f64::NAN, 0.0, 0.0).validate().is_err());
        assert!(GeoPoint::new(0.0, 0.0, f64::INFINITY).validate().is_err());
        assert!(GeoPoint::new(12.0, 34.0, 0.0).validate().is_ok());
    }
}
