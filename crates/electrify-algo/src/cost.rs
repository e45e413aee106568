//! Off-grid and grid-extension cost model.

use electrify_core::{ArcId, Network, Node, NodeId, PlannerConfig};
use serde::Serialize;

/// Cost of serving `node` with local generation and a microgrid.
///
/// `population × demand_per_person_kw_peak × generation_cost_per_kw
///  + area × microgrid_infrastructure_cost_per_area`
pub fn off_grid_cost(node: &Node, config: &PlannerConfig) -> f64 {
    node.population * config.generation_cost_per_person()
        + node.area * config.microgrid_infrastructure_cost_per_area
}

/// Set `off_grid_cost` on every node that is not currently connected.
///
/// Costs are computed once before planning and are not revisited as
/// neighbours connect; connected nodes keep whatever value they hold.
pub fn apply_off_grid_costs(network: &mut Network, config: &PlannerConfig) {
    for node in network.nodes.iter_mut().filter(|n| !n.connected_current) {
        node.off_grid_cost = off_grid_cost(node, config);
    }
}

/// Both sides of the extend-or-not comparison for one candidate path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateCost {
    /// New line plus grid distribution inside the clusters
    pub grid_cost: f64,
    /// Sum of the clusters' off-grid costs
    pub microgrid_cost: f64,
}

impl CandidateCost {
    /// Extension is strictly cheaper than local generation.
    pub fn favours_grid(&self) -> bool {
        self.grid_cost < self.microgrid_cost
    }

    pub fn savings(&self) -> f64 {
        self.microgrid_cost - self.grid_cost
    }
}

/// Cost a candidate made of `nodes` reached over `arcs`.
pub fn candidate_cost(
    network: &Network,
    nodes: &[NodeId],
    arcs: &[ArcId],
    config: &PlannerConfig,
) -> CandidateCost {
    let line_length: f64 = arcs.iter().map(|id| network.arc(*id).length).sum();
    let area: f64 = nodes.iter().map(|id| network.node(*id).area).sum();
    let microgrid_cost = nodes.iter().map(|id| network.node(*id).off_grid_cost).sum();
    CandidateCost {
        grid_cost: config.wire_cost_per_length * line_length
            + config.grid_infrastructure_cost_per_area * area,
        microgrid_cost,
    }
}
