//! Line-of-sight predicates
//!
//! Occlusion is decided by the chord midpoint alone: two points see each
//! other iff the midpoint of the segment joining them lies strictly outside
//! the reference sphere. Chords that dip inside the sphere away from their
//! midpoint are still reported visible.

use crate::{Position3D, SPHERE_RADIUS_KM};

/// Direct line of sight between two points
#[inline]
pub fn direct_los(a: &Position3D, b: &Position3D) -> bool {
    a.midpoint(b).norm() > SPHERE_RADIUS_KM
}

/// True if some relay has direct LOS to both endpoints
pub fn relay_los(a: &Position3D, b: &Position3D, relays: &[Position3D]) -> bool {
    relays
        .iter()
        .any(|relay| direct_los(a, relay) && direct_los(relay, b))
}

/// Edge predicate shared by the finder and the pathfinder.
///
/// With no relays this is exactly [`direct_los`].
pub fn visible(a: &Position3D, b: &Position3D, relays: &[Position3D]) -> bool {
    direct_los(a, b) || relay_los(a, b, relays)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::project;

    #[test]
    fn test_adjacent_satellites_see_each_other() {
        let a = project(0.0, 0.0, 500.0);
        let b = project(0.0, 40.0, 500.0);
        assert!(direct_los(&a, &b));
    }

    #[test]
    fn test_antipodal_satellites_blocked() {
        let a = project(0.0, 0.0, 500.0);
        let b = project(0.0, 180.0, 500.0);
        assert!(!direct_los(&a, &b));
    }

    #[test]
    fn test_midpoint_on_surface_is_blocked() {
        // Midpoint exactly at the radius: strict comparison rejects it
        let a = Position3D::new(SPHERE_RADIUS_KM, 0.0, 0.0);
        assert!(!direct_los(&a, &a));
    }

    #[test]
    fn test_relay_bridges_blocked_pair() {
        let a = project(-90.0, 0.0, 500.0);
        let b = project(0.0, 180.0, 500.0);
        let relay = project(-45.0, 180.0, 13_629.0);

        assert!(!direct_los(&a, &b));
        assert!(relay_los(&a, &b, &[relay]));
        assert!(visible(&a, &b, &[relay]));
    }

    #[test]
    fn test_relay_needs_both_legs() {
        let a = project(0.0, 0.0, 500.0);
        let b = project(0.0, 180.0, 500.0);
        // Sits right above `a`, hidden from `b`
        let relay = project(0.0, 5.0, 500.0);

        assert!(direct_los(&a, &relay));
        assert!(!direct_los(&relay, &b));
        assert!(!relay_los(&a, &b, &[relay]));
    }

    #[test]
    fn test_empty_relays_degenerate_to_direct() {
        let a = project(10.0, 20.0, 0.0);
        let b = project(12.0, 25.0, 550.0);
        let c = project(-60.0, 200.0, 550.0);
        assert_eq!(visible(&a, &b, &[]), direct_los(&a, &b));
        assert_eq!(visible(&a, &c, &[]), direct_los(&a, &c));
    }
}
