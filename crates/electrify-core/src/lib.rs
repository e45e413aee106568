//! # electrify-core: Cluster Network Model
//!
//! Provides the data structures shared by the grid-extension planner.
//!
//! ## Design Philosophy
//!
//! A planning network is an arena of records addressed by integer ids:
//! - **Nodes**: population clusters (one per settlement centroid)
//! - **Arcs**: straight-line segments between two clusters, either existing
//!   grid infrastructure or candidate distribution lines
//!
//! All cross references (arc → node, node → incident arcs) are plain ids, so the
//! network owns everything and never holds self-references. The candidate arcs
//! form a spanning tree, which gives exactly one simple path between any two
//! clusters.
//!
//! ## Quick Start
//!
//! ```rust
//! use electrify_core::*;
//!
//! let mut network = Network::new();
//! network.nodes.push(Node::new(NodeId::new(0), Coord::new(0, 0), 1_000.0, 5.0e5, true));
//! network.nodes.push(Node::new(NodeId::new(1), Coord::new(100, 0), 50.0, 1.0e4, false));
//! network.arcs.push(Arc::new(ArcId::new(0), Coord::new(0, 0), Coord::new(100, 0)));
//!
//! assert_eq!(network.arcs[0].length, 100.0);
//! assert!(!network.arcs[0].is_resolved());
//! ```
//!
//! ## Core Data Structures
//!
//! - [`Network`] - node and arc arenas
//! - [`Node`], [`Arc`] - cluster and line records
//! - Type-safe IDs: [`NodeId`], [`ArcId`]
//! - [`Coord`] - integer-snapped planar coordinate
//!
//! ## Modules
//!
//! - [`config`] - planner cost constants and their validation
//! - [`error`] - unified error type
//! - [`graph_utils`] - topology checks (spanning tree, components, degree)

use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod graph_utils;

pub use config::PlannerConfig;
pub use error::{ElectrifyError, ElectrifyResult};
pub use graph_utils::{topology_stats, TopologyStats};

// Newtype wrappers for IDs for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArcId(usize);

impl NodeId {
    #[inline]
    pub fn new(value: usize) -> Self {
        NodeId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl ArcId {
    #[inline]
    pub fn new(value: usize) -> Self {
        ArcId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node#{}", self.0)
    }
}

impl std::fmt::Display for ArcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arc#{}", self.0)
    }
}

/// Planar coordinate in projected units, snapped to whole units.
///
/// Arc endpoints are matched to clusters by exact equality of these values.
/// Two distinct centroids that truncate to the same coordinate cannot be told
/// apart, and the resolver reports the affected arc as ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Truncate projected floating-point coordinates toward zero.
    ///
    /// Saturates out-of-range values and maps NaN to 0; use [`Coord::try_snap`]
    /// for untrusted input.
    pub fn snap(x: f64, y: f64) -> Self {
        Self {
            x: x.trunc() as i64,
            y: y.trunc() as i64,
        }
    }

    /// Like [`Coord::snap`], but `None` for NaN, infinite or out-of-range values.
    pub fn try_snap(x: f64, y: f64) -> Option<Self> {
        // 2^63; i64 covers [-2^63, 2^63)
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        let fits = |v: f64| v.is_finite() && v.trunc() >= -LIMIT && v.trunc() < LIMIT;
        if fits(x) && fits(y) {
            Some(Self::snap(x, y))
        } else {
            None
        }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance(&self, other: &Coord) -> f64 {
        let dx = other.x as f64 - self.x as f64;
        let dy = other.y as f64 - self.y as f64;
        dx.hypot(dy)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A population cluster.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// Cluster centroid
    pub coord: Coord,
    /// Land area (m²)
    pub area: f64,
    pub population: f64,
    /// Within the grid proximity threshold before planning
    pub connected_initial: bool,
    /// Current decision; only ever moves from false to true
    pub connected_current: bool,
    /// Cost of serving the cluster with local generation (0 for connected clusters)
    pub off_grid_cost: f64,
    /// Arcs touching this cluster, ascending by arc id
    pub incident_arc_ids: Vec<ArcId>,
    /// Row of the cluster in the caller's input, for joining results back
    pub source_index: Option<usize>,
}

impl Node {
    pub fn new(id: NodeId, coord: Coord, population: f64, area: f64, connected: bool) -> Self {
        Self {
            id,
            coord,
            area,
            population,
            connected_initial: connected,
            connected_current: connected,
            off_grid_cost: 0.0,
            incident_arc_ids: Vec::new(),
            source_index: None,
        }
    }

    pub fn with_source_index(mut self, index: usize) -> Self {
        self.source_index = Some(index);
        self
    }

    /// Newly connected by the planner (not part of the grid at the start).
    pub fn is_new_connection(&self) -> bool {
        self.connected_current && !self.connected_initial
    }
}

/// A straight-line segment between two clusters.
#[derive(Debug, Clone, Serialize)]
pub struct Arc {
    pub id: ArcId,
    pub start_xy: Coord,
    pub end_xy: Coord,
    pub start_node_id: Option<NodeId>,
    pub end_node_id: Option<NodeId>,
    /// Connects two clusters that were on the grid before planning
    pub existing: bool,
    /// Part of the realized network (existing, or promoted by the planner)
    pub enabled: bool,
    pub length: f64,
}

impl Arc {
    /// New unresolved arc; treated as existing and enabled until classified.
    pub fn new(id: ArcId, start_xy: Coord, end_xy: Coord) -> Self {
        Self {
            id,
            start_xy,
            end_xy,
            start_node_id: None,
            end_node_id: None,
            existing: true,
            enabled: true,
            length: start_xy.distance(&end_xy),
        }
    }

    /// Both endpoints are attached to nodes.
    pub fn is_resolved(&self) -> bool {
        self.start_node_id.is_some() && self.end_node_id.is_some()
    }

    /// Neither endpoint is attached yet.
    pub fn is_unresolved(&self) -> bool {
        self.start_node_id.is_none() && self.end_node_id.is_none()
    }

    /// Node on the far side of `from`, if `from` is one of the resolved endpoints.
    pub fn other_end(&self, from: NodeId) -> Option<NodeId> {
        match (self.start_node_id, self.end_node_id) {
            (Some(start), Some(end)) if start == from => Some(end),
            (Some(start), Some(end)) if end == from => Some(start),
            _ => None,
        }
    }

    /// Candidate line the planner has not (yet) decided to build.
    pub fn is_candidate(&self) -> bool {
        !self.enabled
    }
}

/// The planning network: node and arc arenas indexed by their ids.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Network {
    pub nodes: Vec<Node>,
    pub arcs: Vec<Arc>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.value()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.value()]
    }

    #[inline]
    pub fn arc(&self, id: ArcId) -> &Arc {
        &self.arcs[id.value()]
    }

    #[inline]
    pub fn arc_mut(&mut self, id: ArcId) -> &mut Arc {
        &mut self.arcs[id.value()]
    }

    /// Disabled arcs incident to `node`, in incidence order.
    pub fn candidate_arcs_at(&self, node: NodeId) -> impl Iterator<Item = &Arc> + '_ {
        self.node(node)
            .incident_arc_ids
            .iter()
            .map(|id| self.arc(*id))
            .filter(|arc| arc.is_candidate())
    }

    /// Connected nodes with at least one disabled incident arc.
    pub fn frontier(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.connected_current)
            .filter(|n| self.candidate_arcs_at(n.id).next().is_some())
            .map(|n| n.id)
            .collect()
    }

    pub fn connected_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.connected_current).count()
    }

    /// Summary statistics of the current decision state.
    pub fn stats(&self) -> NetworkStats {
        let mut stats = NetworkStats {
            num_nodes: self.nodes.len(),
            num_arcs: self.arcs.len(),
            ..NetworkStats::default()
        };
        for node in &self.nodes {
            stats.total_population += node.population;
            if node.connected_initial {
                stats.initially_connected += 1;
            }
            if node.connected_current {
                stats.connected += 1;
                stats.connected_population += node.population;
            } else {
                stats.off_grid_cost += node.off_grid_cost;
            }
        }
        for arc in &self.arcs {
            if arc.existing {
                stats.existing_arcs += 1;
                stats.existing_length += arc.length;
            } else if arc.enabled {
                stats.new_arcs += 1;
                stats.new_length += arc.length;
            }
        }
        stats
    }
}

/// Statistics about a network's decision state
#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkStats {
    pub num_nodes: usize,
    pub num_arcs: usize,
    pub initially_connected: usize,
    pub connected: usize,
    pub existing_arcs: usize,
    pub new_arcs: usize,
    pub existing_length: f64,
    pub new_length: f64,
    pub total_population: f64,
    pub connected_population: f64,
    /// Off-grid cost of the clusters left unconnected
    pub off_grid_cost: f64,
}

impl std::fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} clusters ({} connected, {} initially), {} arcs ({} existing, {} new, {:.0} new length)",
            self.num_nodes,
            self.connected,
            self.initially_connected,
            self.num_arcs,
            self.existing_arcs,
            self.new_arcs,
            self.new_length
        )
    }
}
