//! Materialized visibility topology
//!
//! Evaluates the same edge predicate as the lazy search once for every
//! satellite pair and stores the result in a petgraph `UnGraph`. Useful for
//! connectivity statistics and for cross-checking hop counts.

use crate::{Result, VisibilityGraph};
use constellation_geometry::Position3D;
use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary of a materialized topology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyStats {
    pub satellites: usize,
    pub links: usize,
    pub components: usize,
    /// Satellites with no visible neighbour
    pub isolated: usize,
    pub max_degree: usize,
}

/// Satellite visibility graph with one undirected edge per visible pair
pub struct Topology {
    graph: UnGraph<usize, ()>,
}

impl Topology {
    pub fn build(satellites: &[Position3D], relays: &[Position3D]) -> Result<Self> {
        let lazy = VisibilityGraph::new(satellites, relays);
        lazy.check_finite()?;

        let mut graph = UnGraph::with_capacity(satellites.len(), satellites.len() * 4);
        for index in 0..satellites.len() {
            graph.add_node(index);
        }

        for u in 0..satellites.len() {
            for v in (u + 1)..satellites.len() {
                if lazy.is_edge(u, v) {
                    graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
                }
            }
        }

        debug!(
            "Materialized topology: {} satellites, {} links (relays: {})",
            graph.node_count(),
            graph.edge_count(),
            relays.len()
        );

        Ok(Self { graph })
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Visible neighbours of `index`, ascending
    pub fn neighbors(&self, index: usize) -> Result<Vec<usize>> {
        self.check_index(index)?;
        let mut out: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(index))
            .map(|n| self.graph[n])
            .collect();
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }

    pub fn has_link(&self, u: usize, v: usize) -> bool {
        u < self.len()
            && v < self.len()
            && self
                .graph
                .find_edge(NodeIndex::new(u), NodeIndex::new(v))
                .is_some()
    }

    /// Minimum hop count between two satellites, `None` if disconnected
    pub fn hop_distance(&self, from: usize, to: usize) -> Result<Option<usize>> {
        self.check_index(from)?;
        self.check_index(to)?;

        let costs = dijkstra(&self.graph, NodeIndex::new(from), Some(NodeIndex::new(to)), |_| 1usize);
        Ok(costs.get(&NodeIndex::new(to)).copied())
    }

    pub fn stats(&self) -> TopologyStats {
        let degrees: Vec<usize> = self
            .graph
            .node_indices()
            .map(|n| self.graph.neighbors(n).count())
            .collect();

        TopologyStats {
            satellites: self.graph.node_count(),
            links: self.graph.edge_count(),
            components: connected_components(&self.graph),
            isolated: degrees.iter().filter(|d| **d == 0).count(),
            max_degree: degrees.iter().copied().max().unwrap_or(0),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(crate::RoutingError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}
