//! Best-density path search from one frontier arc.
//!
//! Depth-first over disabled arcs into unconnected territory. Each stack frame
//! owns its branch accumulators, so an abandoned side branch never leaks into
//! a sibling. The best record lives outside the stack and is replaced
//! wholesale whenever a branch beats it.

use electrify_core::{ArcId, Network, NodeId};
use serde::Serialize;

/// Denominator floor so an empty path has density 0 instead of NaN.
pub const LENGTH_FLOOR: f64 = 1e-9;

/// A contiguous path of unconnected clusters reached from the frontier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathRecord {
    /// Cumulative population of `nodes`
    pub population: f64,
    /// Cumulative length of `arcs` plus [`LENGTH_FLOOR`]
    pub length: f64,
    /// Clusters in visiting order
    pub nodes: Vec<NodeId>,
    /// Arcs in visiting order; `arcs[i]` reaches `nodes[i]`
    pub arcs: Vec<ArcId>,
}

impl PathRecord {
    pub fn empty() -> Self {
        Self {
            population: 0.0,
            length: LENGTH_FLOOR,
            nodes: Vec::new(),
            arcs: Vec::new(),
        }
    }

    /// Population served per unit of new line.
    pub fn density(&self) -> f64 {
        self.population / self.length
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Line length without the floor.
    pub fn line_length(&self) -> f64 {
        (self.length - LENGTH_FLOOR).max(0.0)
    }
}

struct Frame {
    node: NodeId,
    via: ArcId,
    branch: PathRecord,
}

/// Find the highest-density path entering unconnected territory over `via`.
///
/// `from` is the connected end of `via`. Connected nodes stop a branch.
/// Children are explored in incidence order and a branch replaces the best
/// only when strictly denser, so ties go to the first branch found.
pub fn find_best(network: &Network, from: NodeId, via: ArcId) -> PathRecord {
    let mut best = PathRecord::empty();
    let Some(start) = network.arc(via).other_end(from) else {
        return best;
    };

    let mut stack = vec![Frame {
        node: start,
        via,
        branch: PathRecord::empty(),
    }];

    while let Some(Frame {
        node,
        via,
        mut branch,
    }) = stack.pop()
    {
        let cluster = network.node(node);
        if cluster.connected_current {
            continue;
        }

        branch.population += cluster.population;
        branch.length += network.arc(via).length;
        branch.nodes.push(node);
        branch.arcs.push(via);

        if branch.density() > best.density() {
            best = branch.clone();
        }

        let children: Vec<(NodeId, ArcId)> = network
            .candidate_arcs_at(node)
            .filter(|arc| arc.id != via)
            .filter_map(|arc| arc.other_end(node).map(|next| (next, arc.id)))
            .collect();

        // reversed so the first incident arc is popped first
        for (next, arc_id) in children.into_iter().rev() {
            stack.push(Frame {
                node: next,
                via: arc_id,
                branch: branch.clone(),
            });
        }
    }

    best
}
