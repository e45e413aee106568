//! Network construction errors.

use electrify_core::{ArcId, Coord, ElectrifyError, NodeId};
use thiserror::Error;

/// Errors raised while turning clusters and segments into a resolved network.
///
/// All of these are fatal for the current input: the pipeline stops rather
/// than plan over a half-resolved graph.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// No clusters survived intake
    #[error("no clusters to plan")]
    NoClusters,

    /// Segment whose two endpoints snap to the same coordinate
    #[error("{arc} has zero length at {coord}")]
    DegenerateSegment { arc: ArcId, coord: Coord },

    /// Segment endpoint that matches no cluster centroid
    #[error("{arc} endpoint {coord} does not match any cluster")]
    UnresolvedArc { arc: ArcId, coord: Coord },

    /// Segment endpoint matching several clusters at the same coordinate
    #[error("{arc} endpoint {coord} matches {} clusters", .nodes.len())]
    AmbiguousEndpoint {
        arc: ArcId,
        coord: Coord,
        nodes: Vec<NodeId>,
    },

    /// Cluster that no segment reaches
    #[error("{node} at {coord} is not touched by any segment")]
    IsolatedNode { node: NodeId, coord: Coord },

    /// Segment set is not a spanning tree over the clusters
    #[error("expected a spanning tree over {nodes} clusters, got {arcs} segments in {components} components")]
    NotATree {
        nodes: usize,
        arcs: usize,
        components: usize,
    },
}

impl From<BuildError> for ElectrifyError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::DegenerateSegment { .. } | BuildError::AmbiguousEndpoint { .. } => {
                ElectrifyError::Geometry(err.to_string())
            }
            _ => ElectrifyError::Topology(err.to_string()),
        }
    }
}
