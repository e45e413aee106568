//! NetworkBuilder: clusters and raw segments into node and arc arenas.
//!
//! The builder only lays out records. Endpoints stay unresolved until
//! [`crate::resolve::resolve_connectivity`] walks the tree from node 0.
//!
//! # Example
//! ```
//! use electrify_algo::builder::NetworkBuilder;
//! use electrify_algo::topology::Segment;
//! use electrify_core::Coord;
//!
//! let network = NetworkBuilder::new()
//!     .cluster(Coord::new(0, 0), 1000.0, 5.0, true)
//!     .cluster(Coord::new(100, 0), 50.0, 1.0, false)
//!     .segment(Segment::new(Coord::new(100, 0), Coord::new(0, 0)))
//!     .build()
//!     .unwrap();
//! assert_eq!(network.nodes.len(), 2);
//! assert!(network.arcs[0].is_unresolved());
//! ```

use electrify_core::{Arc, ArcId, Coord, Network, Node, NodeId};
use tracing::warn;

use crate::error::BuildError;
use crate::intake::Cluster;
use crate::topology::Segment;

/// Builder for an unresolved planning network.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    clusters: Vec<Cluster>,
    segments: Vec<Segment>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from clusters already ordered by [`crate::intake::prepare_clusters`].
    pub fn from_parts(clusters: Vec<Cluster>, segments: Vec<Segment>) -> Self {
        Self { clusters, segments }
    }

    /// Append a cluster; ids follow insertion order.
    pub fn cluster(mut self, coord: Coord, population: f64, area: f64, connected: bool) -> Self {
        let source_index = self.clusters.len();
        self.clusters.push(Cluster {
            coord,
            population,
            area,
            connected,
            source_index,
        });
        self
    }

    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    /// Lay out nodes (ids in cluster order) and arcs (ids in segment order).
    ///
    /// Node 0 always starts connected: it is the grid seed even when the
    /// input did not flag it. Arcs start existing and enabled with their
    /// length fixed; classification happens after resolution.
    pub fn build(self) -> Result<Network, BuildError> {
        if self.clusters.is_empty() {
            return Err(BuildError::NoClusters);
        }

        let mut network = Network::new();
        network.nodes.reserve(self.clusters.len());
        network.arcs.reserve(self.segments.len());

        for (index, cluster) in self.clusters.into_iter().enumerate() {
            let node = Node::new(
                NodeId::new(index),
                cluster.coord,
                cluster.population,
                cluster.area,
                cluster.connected,
            )
            .with_source_index(cluster.source_index);
            network.nodes.push(node);
        }

        let seed = &mut network.nodes[0];
        if !seed.connected_initial {
            warn!("{} at {} forced connected as grid seed", seed.id, seed.coord);
            seed.connected_initial = true;
            seed.connected_current = true;
        }

        for (index, segment) in self.segments.into_iter().enumerate() {
            let id = ArcId::new(index);
            if segment.start == segment.end {
                return Err(BuildError::DegenerateSegment {
                    arc: id,
                    coord: segment.start,
                });
            }
            network.arcs.push(Arc::new(id, segment.start, segment.end));
        }

        Ok(network)
    }
}
