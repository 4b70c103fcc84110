//! Nearest reachable satellite lookup

use crate::{Result, RoutingError, VisibilityGraph};
use constellation_geometry::Position3D;
use tracing::debug;

/// Closest satellite that `point` can see, directly or through a relay.
///
/// Invisible satellites count as infinitely far. Returns `None` when
/// nothing is visible; equal distances resolve to the lowest index.
pub fn find_closest(
    point: &Position3D,
    satellites: &[Position3D],
    relays: &[Position3D],
) -> Result<Option<usize>> {
    if !point.is_finite() {
        return Err(RoutingError::NonFinitePosition(format!(
            "query point ({}, {}, {})",
            point.x, point.y, point.z
        )));
    }

    let graph = VisibilityGraph::new(satellites, relays);
    graph.check_finite()?;

    let mut best: Option<(usize, f64)> = None;
    for (index, sat) in satellites.iter().enumerate() {
        if !graph.sees(point, index) {
            continue;
        }
        let dist = point.distance_to(sat);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }

    match best {
        Some((index, dist)) => debug!("Closest visible satellite {} at {:.1} km", index, dist),
        None => debug!(
            "No visible satellite among {} (relays: {})",
            satellites.len(),
            relays.len()
        ),
    }

    Ok(best.map(|(index, _)| index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_geometry::transforms::project;

    #[test]
    fn test_picks_overhead_satellite() {
        let ground = project(0.0, 0.0, 0.0);
        let sats = vec![
            project(0.0, 20.0, 550.0),
            project(0.0, 0.0, 550.0),
            project(0.0, -15.0, 550.0),
        ];
        assert_eq!(find_closest(&ground, &sats, &[]).unwrap(), Some(1));
    }

    #[test]
    fn test_skips_closer_but_hidden_satellite() {
        // Low satellite on the far side is nearer in straight-line terms
        // than the high one, but only the high one is visible.
        let ground = project(0.0, 0.0, 0.0);
        let sats = vec![
            project(0.0, 120.0, 100.0),
            project(0.0, 30.0, 20_000.0),
        ];
        let hidden = ground.distance_to(&sats[0]);
        let shown = ground.distance_to(&sats[1]);
        assert!(hidden < shown);
        assert_eq!(find_closest(&ground, &sats, &[]).unwrap(), Some(1));
    }

    #[test]
    fn test_none_when_nothing_visible() {
        let ground = project(0.0, 0.0, 0.0);
        let sats = vec![project(0.0, 180.0, 550.0), project(10.0, 170.0, 550.0)];
        assert_eq!(find_closest(&ground, &sats, &[]).unwrap(), None);
        assert_eq!(find_closest(&ground, &[], &[]).unwrap(), None);
    }

    #[test]
    fn test_relay_makes_hidden_satellite_reachable() {
        let ground = project(0.0, 0.0, 0.0);
        let sats = vec![project(0.0, 90.0, 550.0)];
        let relay = project(0.0, 45.0, 20_000.0);

        assert_eq!(find_closest(&ground, &sats, &[]).unwrap(), None);
        assert_eq!(find_closest(&ground, &sats, &[relay]).unwrap(), Some(0));
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let ground = project(0.0, 0.0, 0.0);
        let sats = vec![
            project(0.0, 90.0, 550.0),
            project(0.0, 10.0, 550.0),
            project(0.0, -10.0, 550.0),
            project(0.0, 10.0, 550.0),
        ];
        let d1 = ground.distance_to(&sats[1]);
        let d2 = ground.distance_to(&sats[2]);
        // Mirror images about the meridian may differ in the last ulp
        let expected = if d2 < d1 { 2 } else { 1 };
        assert_eq!(find_closest(&ground, &sats, &[]).unwrap(), Some(expected));
    }

    #[test]
    fn test_identical_positions_tie_to_first() {
        let ground = project(5.0, 5.0, 0.0);
        let sat = project(5.0, 5.0, 550.0);
        let sats = vec![sat, sat, sat];
        assert_eq!(find_closest(&ground, &sats, &[]).unwrap(), Some(0));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let sats = vec![project(0.0, 0.0, 550.0)];
        let bad = constellation_geometry::Position3D::new(f64::NAN, 0.0, 0.0);
        assert!(matches!(
            find_closest(&bad, &sats, &[]),
            Err(RoutingError::NonFinitePosition(_))
        ));
    }
}
