//! Planner output records.

use electrify_core::{ArcId, NetworkStats, NodeId};
use serde::Serialize;

use crate::cost::CandidateCost;

/// A path promoted to the grid in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Promotion {
    /// Connected node the search started from
    pub root: NodeId,
    /// Frontier arc the search entered through
    pub via: ArcId,
    pub density: f64,
    pub population: f64,
    pub line_length: f64,
    pub cost: CandidateCost,
    pub nodes: Vec<NodeId>,
    pub arcs: Vec<ArcId>,
}

/// One sweep over the frontier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassReport {
    /// 1-based pass number
    pub pass: usize,
    /// Frontier arcs searched
    pub candidates_evaluated: usize,
    /// Candidates where extension beat local generation
    pub eligible: usize,
    /// Eligible candidates surviving conflict resolution, all promoted
    pub promotions: Vec<Promotion>,
}

impl PassReport {
    pub fn nodes_connected(&self) -> usize {
        self.promotions.iter().map(|p| p.nodes.len()).sum()
    }
}

/// Outcome of a full planning run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlanReport {
    /// Passes that promoted at least one candidate
    pub passes: Vec<PassReport>,
    /// Passes executed, including the final pass that found nothing
    pub passes_run: usize,
    /// Investment in new lines and grid distribution for promoted clusters
    pub grid_investment: f64,
    /// Off-grid cost avoided by the promoted clusters
    pub off_grid_cost_avoided: f64,
    /// Network state after planning
    pub stats: NetworkStats,
}

impl PlanReport {
    pub fn promotions(&self) -> impl Iterator<Item = &Promotion> {
        self.passes.iter().flat_map(|pass| pass.promotions.iter())
    }

    pub fn nodes_connected(&self) -> usize {
        self.passes.iter().map(PassReport::nodes_connected).sum()
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Grid Extension Plan\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Passes: {}\n", self.passes_run));
        s.push_str(&format!(
            "Clusters: {} ({} connected, {} newly)\n",
            self.stats.num_nodes,
            self.stats.connected,
            self.nodes_connected()
        ));
        s.push_str(&format!(
            "New lines: {} ({:.0} length)\n",
            self.stats.new_arcs, self.stats.new_length
        ));
        s.push_str(&format!("Grid investment: ${:.2}\n", self.grid_investment));
        s.push_str(&format!(
            "Off-grid cost avoided: ${:.2}\n",
            self.off_grid_cost_avoided
        ));
        s.push_str(&format!(
            "Remaining off-grid cost: ${:.2}\n",
            self.stats.off_grid_cost
        ));

        for pass in &self.passes {
            s.push_str(&format!(
                "\nPass {}: {} searched, {} eligible, {} promoted\n",
                pass.pass,
                pass.candidates_evaluated,
                pass.eligible,
                pass.promotions.len()
            ));
            for promotion in &pass.promotions {
                let nodes: Vec<String> = promotion
                    .nodes
                    .iter()
                    .map(|n| n.value().to_string())
                    .collect();
                s.push_str(&format!(
                    "  [CONNECT] from {} via {}: nodes [{}] density {:.3} (grid ${:.2} < off-grid ${:.2}, saves ${:.2})\n",
                    promotion.root,
                    promotion.via,
                    nodes.join(", "),
                    promotion.density,
                    promotion.cost.grid_cost,
                    promotion.cost.microgrid_cost,
                    promotion.cost.savings()
                ));
            }
        }
        s
    }
}
