//! Breadth-first hop search over the visibility graph
//!
//! The frontier holds `(index, hops, path)` entries. Neighbours are
//! discovered in ascending index order and edges are evaluated only when a
//! vertex is expanded. A vertex may sit in the frontier more than once; the
//! first pop marks it visited and later pops are dropped.

use crate::{HopPath, PathOutcome, Result, RoutingError, VisibilityGraph};
use constellation_geometry::Position3D;
use std::collections::VecDeque;
use tracing::debug;

/// Minimum-hop route from `start` to `end`.
///
/// `start == end` is a zero-hop route. Exhausting the frontier yields
/// [`PathOutcome::Unreachable`]; bad indices or an empty constellation are
/// errors.
pub fn shortest_path(
    satellites: &[Position3D],
    start: usize,
    end: usize,
    relays: &[Position3D],
) -> Result<PathOutcome> {
    let graph = VisibilityGraph::new(satellites, relays);
    if graph.is_empty() {
        return Err(RoutingError::EmptyConstellation);
    }
    graph.check_index(start)?;
    graph.check_index(end)?;
    graph.check_finite()?;

    if start == end {
        return Ok(PathOutcome::Connected(HopPath {
            hops: 0,
            path: vec![start],
        }));
    }

    let mut frontier: VecDeque<(usize, usize, Vec<usize>)> = VecDeque::new();
    let mut visited = vec![false; graph.len()];
    let mut expanded = 0usize;

    frontier.push_back((start, 0, Vec::new()));

    while let Some((current, hops, mut path)) = frontier.pop_front() {
        path.push(current);

        if current == end {
            debug!(
                "Route {} -> {}: {} hops, {} vertices expanded",
                start, end, hops, expanded
            );
            return Ok(PathOutcome::Connected(HopPath { hops, path }));
        }

        if visited[current] {
            continue;
        }
        visited[current] = true;
        expanded += 1;

        for next in 0..graph.len() {
            if !visited[next] && graph.is_edge(current, next) {
                frontier.push_back((next, hops + 1, path.clone()));
            }
        }
    }

    debug!(
        "Route {} -> {} unreachable after expanding {} vertices (relays: {})",
        start,
        end,
        expanded,
        relays.len()
    );
    Ok(PathOutcome::Unreachable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_geometry::transforms::project;
    use constellation_geometry::{direct_los, generate_satellites};

    /// Equatorial satellites 40 deg apart: neighbours see each other,
    /// anything two slots away is blocked.
    fn chain() -> Vec<Position3D> {
        (0..4).map(|i| project(0.0, 40.0 * i as f64, 500.0)).collect()
    }

    #[test]
    fn test_same_index_is_zero_hops() {
        let sats = chain();
        for i in 0..sats.len() {
            let outcome = shortest_path(&sats, i, i, &[]).unwrap();
            assert_eq!(
                outcome,
                PathOutcome::Connected(HopPath {
                    hops: 0,
                    path: vec![i]
                })
            );
        }
    }

    #[test]
    fn test_chain_walks_every_link() {
        let sats = chain();
        assert!(direct_los(&sats[0], &sats[1]));
        assert!(!direct_los(&sats[0], &sats[2]));

        let outcome = shortest_path(&sats, 0, 3, &[]).unwrap();
        assert_eq!(outcome.hop_count(), 3);
        assert_eq!(outcome.indices(), &[0, 1, 2, 3]);

        let back = shortest_path(&sats, 3, 0, &[]).unwrap();
        assert_eq!(back.indices(), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_equal_depth_prefers_lower_index() {
        // 0 reaches 3 through either 1 or 2
        let sats = vec![
            project(0.0, 0.0, 500.0),
            project(0.0, 35.0, 500.0),
            project(0.0, 35.0, 600.0),
            project(0.0, 70.0, 500.0),
        ];
        assert!(!direct_los(&sats[0], &sats[3]));

        let outcome = shortest_path(&sats, 0, 3, &[]).unwrap();
        assert_eq!(outcome.indices(), &[0, 1, 3]);
    }

    #[test]
    fn test_two_antipodal_satellites_without_relays() {
        let constellation = generate_satellites(1, 2, 500.0).unwrap();
        let sats = constellation.positions();
        assert!(!direct_los(&sats[0], &sats[1]));

        let outcome = shortest_path(sats, 0, 1, &[]).unwrap();
        assert_eq!(outcome, PathOutcome::Unreachable);
        assert_eq!(outcome.hop_count(), -1);
        assert!(outcome.indices().is_empty());

        let stay = shortest_path(sats, 1, 1, &[]).unwrap();
        assert_eq!(stay.hop_count(), 0);
        assert_eq!(stay.indices(), &[1]);
    }

    #[test]
    fn test_relay_bridges_antipodal_pair() {
        let constellation = generate_satellites(1, 2, 500.0).unwrap();
        let sats = constellation.positions();
        let relay = project(-45.0, 180.0, 13_629.0);
        assert!(direct_los(&sats[0], &relay));
        assert!(direct_los(&relay, &sats[1]));

        let outcome = shortest_path(sats, 0, 1, &[relay]).unwrap();
        assert_eq!(
            outcome,
            PathOutcome::Connected(HopPath {
                hops: 1,
                path: vec![0, 1]
            })
        );
    }

    #[test]
    fn test_relays_never_lengthen_route() {
        let sats = chain();
        let relay = project(0.0, 60.0, 20_000.0);

        let direct = shortest_path(&sats, 0, 3, &[]).unwrap();
        let assisted = shortest_path(&sats, 0, 3, &[relay]).unwrap();
        assert!(assisted.hop_count() <= direct.hop_count());
        assert_eq!(assisted.hop_count(), 1);
    }

    #[test]
    fn test_precondition_errors() {
        let sats = chain();
        assert!(matches!(
            shortest_path(&[], 0, 0, &[]),
            Err(RoutingError::EmptyConstellation)
        ));
        assert!(matches!(
            shortest_path(&sats, 0, 4, &[]),
            Err(RoutingError::IndexOutOfRange { index: 4, len: 4 })
        ));
        assert!(matches!(
            shortest_path(&sats, 9, 0, &[]),
            Err(RoutingError::IndexOutOfRange { index: 9, len: 4 })
        ));
    }
}
