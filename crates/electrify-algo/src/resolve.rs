//! ConnectivityResolver: attach arcs to the clusters they touch.
//!
//! Arcs arrive as bare coordinate pairs. Starting from the grid seed (node 0)
//! the resolver walks depth-first: at each node it scans, in arc id order,
//! every still-unresolved arc with an endpoint on the node's centroid, makes
//! the node that arc's start, finds the cluster at the far endpoint, and
//! descends into it before continuing the scan. Arcs end up oriented away from
//! the seed.
//!
//! Matching is exact on snapped coordinates. Near-duplicate centroids that
//! snap together are not merged or guessed at: the affected arc is reported
//! as ambiguous, and an endpoint with no cluster is reported as unresolved.

use std::collections::HashMap;

use electrify_core::{graph_utils, ArcId, Coord, Network, NodeId};
use tracing::debug;

use crate::error::BuildError;

/// Resolve arc endpoints, fill node incidence and classify arcs.
///
/// After a successful call every arc has two distinct endpoint nodes whose
/// centroids equal `start_xy`/`end_xy`, every node lists its incident arcs in
/// ascending id order, the arcs form a spanning tree, and every arc touching
/// a cluster that was not initially connected is a disabled candidate.
pub fn resolve_connectivity(network: &mut Network) -> Result<(), BuildError> {
    if network.nodes.is_empty() {
        return Err(BuildError::NoClusters);
    }

    let nodes_at = index_nodes(network);
    let arcs_at = index_arcs(network);

    // (node, position in that node's arc list)
    let mut stack: Vec<(NodeId, usize)> = vec![(NodeId::new(0), 0)];
    while let Some(&(node, cursor)) = stack.last() {
        let coord = network.node(node).coord;
        let touching = arcs_at.get(&coord).map(Vec::as_slice).unwrap_or(&[]);

        let next = touching
            .iter()
            .enumerate()
            .skip(cursor)
            .find(|(_, arc_id)| network.arc(**arc_id).is_unresolved())
            .map(|(position, arc_id)| (position, *arc_id));

        let Some((position, arc_id)) = next else {
            stack.pop();
            continue;
        };
        if let Some(top) = stack.last_mut() {
            top.1 = position + 1;
        }

        let far = attach(network, &nodes_at, node, arc_id)?;
        stack.push((far, 0));
    }

    check_resolution(network)?;
    fill_incidence(network);
    check_tree(network)?;
    classify_arcs(network);
    Ok(())
}

/// Make `node` the start of `arc_id` and find the cluster at the far endpoint.
fn attach(
    network: &mut Network,
    nodes_at: &HashMap<Coord, Vec<NodeId>>,
    node: NodeId,
    arc_id: ArcId,
) -> Result<NodeId, BuildError> {
    let coord = network.node(node).coord;
    let arc = network.arc_mut(arc_id);
    if arc.start_xy != coord {
        std::mem::swap(&mut arc.start_xy, &mut arc.end_xy);
    }
    let far_coord = arc.end_xy;

    let candidates: Vec<NodeId> = nodes_at
        .get(&far_coord)
        .map(|ids| ids.iter().copied().filter(|id| *id != node).collect())
        .unwrap_or_default();

    let far = match candidates.len() {
        0 => {
            return Err(BuildError::UnresolvedArc {
                arc: arc_id,
                coord: far_coord,
            })
        }
        1 => candidates[0],
        _ => {
            return Err(BuildError::AmbiguousEndpoint {
                arc: arc_id,
                coord: far_coord,
                nodes: candidates,
            })
        }
    };

    arc.start_node_id = Some(node);
    arc.end_node_id = Some(far);
    debug!("{} resolved {} -> {}", arc_id, node, far);
    Ok(far)
}

fn index_nodes(network: &Network) -> HashMap<Coord, Vec<NodeId>> {
    let mut index: HashMap<Coord, Vec<NodeId>> = HashMap::new();
    for node in &network.nodes {
        index.entry(node.coord).or_default().push(node.id);
    }
    index
}

/// Arc ids keyed by each raw endpoint, ascending.
fn index_arcs(network: &Network) -> HashMap<Coord, Vec<ArcId>> {
    let mut index: HashMap<Coord, Vec<ArcId>> = HashMap::new();
    for arc in &network.arcs {
        index.entry(arc.start_xy).or_default().push(arc.id);
        index.entry(arc.end_xy).or_default().push(arc.id);
    }
    index
}

fn check_resolution(network: &Network) -> Result<(), BuildError> {
    if let Some(arc) = network.arcs.iter().find(|arc| !arc.is_resolved()) {
        return Err(BuildError::UnresolvedArc {
            arc: arc.id,
            coord: arc.start_xy,
        });
    }
    Ok(())
}

fn fill_incidence(network: &mut Network) {
    for index in 0..network.arcs.len() {
        let arc = &network.arcs[index];
        let (id, start, end) = (arc.id, arc.start_node_id, arc.end_node_id);
        for node in [start, end].into_iter().flatten() {
            network.node_mut(node).incident_arc_ids.push(id);
        }
    }
}

fn check_tree(network: &Network) -> Result<(), BuildError> {
    if network.nodes.len() > 1 {
        if let Some(node) = network
            .nodes
            .iter()
            .find(|node| node.incident_arc_ids.is_empty())
        {
            return Err(BuildError::IsolatedNode {
                node: node.id,
                coord: node.coord,
            });
        }
    }

    let stats = graph_utils::topology_stats(network);
    if !stats.is_spanning_tree() {
        return Err(BuildError::NotATree {
            nodes: stats.node_count,
            arcs: stats.arc_count,
            components: stats.connected_components,
        });
    }
    Ok(())
}

/// Any arc touching a cluster that was off-grid at the start is a candidate.
fn classify_arcs(network: &mut Network) {
    for index in 0..network.nodes.len() {
        if network.nodes[index].connected_initial {
            continue;
        }
        for position in 0..network.nodes[index].incident_arc_ids.len() {
            let arc_id = network.nodes[index].incident_arc_ids[position];
            let arc = network.arc_mut(arc_id);
            arc.existing = false;
            arc.enabled = false;
        }
    }
}
