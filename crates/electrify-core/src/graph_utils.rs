use crate::{ArcId, Network, NodeId};
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashSet, VecDeque};

/// Topology summary of the resolved arc set (degree, components, tree check).
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyStats {
    pub node_count: usize,
    pub arc_count: usize,
    /// Arcs missing one or both endpoint nodes
    pub unresolved_arcs: usize,
    pub connected_components: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
}

impl TopologyStats {
    /// Exactly `n - 1` resolved arcs in a single component.
    pub fn is_spanning_tree(&self) -> bool {
        self.unresolved_arcs == 0
            && self.connected_components == 1
            && self.arc_count + 1 == self.node_count
    }
}

/// Build a petgraph view of the resolved arcs (node index == node id).
pub fn to_petgraph(network: &Network) -> UnGraph<NodeId, ArcId> {
    let mut graph = UnGraph::with_capacity(network.nodes.len(), network.arcs.len());
    for node in &network.nodes {
        graph.add_node(node.id);
    }
    for arc in &network.arcs {
        if let (Some(start), Some(end)) = (arc.start_node_id, arc.end_node_id) {
            graph.add_edge(NodeIndex::new(start.value()), NodeIndex::new(end.value()), arc.id);
        }
    }
    graph
}

/// Calculates degree distribution and component count over the resolved arcs.
pub fn topology_stats(network: &Network) -> TopologyStats {
    let graph = to_petgraph(network);
    let node_count = graph.node_count();
    let degrees: Vec<usize> = graph
        .node_indices()
        .map(|node| graph.edges(node).count())
        .collect();
    let min_degree = *degrees.iter().min().unwrap_or(&0);
    let max_degree = *degrees.iter().max().unwrap_or(&0);
    let avg_degree = if node_count == 0 {
        0.0
    } else {
        degrees.iter().copied().sum::<usize>() as f64 / node_count as f64
    };
    TopologyStats {
        node_count,
        arc_count: network.arcs.len(),
        unresolved_arcs: network.arcs.iter().filter(|a| !a.is_resolved()).count(),
        connected_components: connected_components(&graph),
        min_degree,
        avg_degree,
        max_degree,
    }
}

/// Nodes reachable from `start` through enabled arcs (breadth-first).
pub fn energized_from(network: &Network, start: NodeId) -> Vec<NodeId> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut members = Vec::new();
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }
        members.push(node);
        for arc_id in &network.node(node).incident_arc_ids {
            let arc = network.arc(*arc_id);
            if !arc.enabled {
                continue;
            }
            if let Some(next) = arc.other_end(node) {
                if !visited.contains(&next) {
                    queue.push_back(next);
                }
            }
        }
    }
    members.sort();
    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arc, Coord, Node};

    fn line(n: usize, resolve: bool) -> Network {
        let mut network = Network::new();
        for i in 0..n {
            network.nodes.push(Node::new(
                NodeId::new(i),
                Coord::new(i as i64 * 10, 0),
                100.0,
                1.0,
                i == 0,
            ));
        }
        for i in 0..n.saturating_sub(1) {
            let mut arc = Arc::new(
                ArcId::new(i),
                Coord::new(i as i64 * 10, 0),
                Coord::new((i as i64 + 1) * 10, 0),
            );
            if resolve {
                arc.start_node_id = Some(NodeId::new(i));
                arc.end_node_id = Some(NodeId::new(i + 1));
                network.nodes[i].incident_arc_ids.push(arc.id);
                network.nodes[i + 1].incident_arc_ids.push(arc.id);
            }
            network.arcs.push(arc);
        }
        network
    }

    #[test]
    fn test_line_is_spanning_tree() {
        let stats = topology_stats(&line(4, true));
        assert_eq!(stats.node_count, 4);
        assert_eq!(stats.arc_count, 3);
        assert_eq!(stats.connected_components, 1);
        assert_eq!(stats.min_degree, 1);
        assert_eq!(stats.max_degree, 2);
        assert!((stats.avg_degree - 1.5).abs() < 1e-12);
        assert!(stats.is_spanning_tree());
    }

    #[test]
    fn test_unresolved_arcs_break_tree() {
        let stats = topology_stats(&line(3, false));
        assert_eq!(stats.unresolved_arcs, 2);
        assert_eq!(stats.connected_components, 3);
        assert!(!stats.is_spanning_tree());
    }

    #[test]
    fn test_energized_follows_enabled_arcs() {
        let mut network = line(3, true);
        network.arcs[1].enabled = false;
        assert_eq!(
            energized_from(&network, NodeId::new(0)),
            vec![NodeId::new(0), NodeId::new(1)]
        );
    }
}
