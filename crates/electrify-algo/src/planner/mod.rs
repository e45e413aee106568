//! Greedy grid-extension planning
//!
//! Grows the grid outward from every connected cluster, one pass at a time.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ONE PASS                                                            │
//! │                                                                      │
//! │  search  (&Network)                                                  │
//! │    for each connected node, for each disabled incident arc:          │
//! │      best = densest path (population / length) into off-grid land   │
//! │      grid = wire × Σ length + grid_area × Σ area                     │
//! │      keep if grid < Σ off_grid_cost                                  │
//! │      overlapping keepers: higher density wins, earlier wins ties     │
//! │                                                                      │
//! │  promote (&mut Network)                                              │
//! │    nodes → connected, arcs → enabled                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passes repeat until one finds nothing worth building. Every promotion
//! connects at least one new cluster and nothing is ever disconnected, so
//! there is at most one productive pass per cluster.

mod report;
mod search;

pub use report::{PassReport, PlanReport, Promotion};
pub use search::{find_best, PathRecord, LENGTH_FLOOR};

use std::collections::HashSet;

use electrify_core::{ArcId, ElectrifyResult, Network, NodeId, PlannerConfig};
use tracing::{debug, info};

use crate::cost::{apply_off_grid_costs, candidate_cost, CandidateCost};

/// A searched path together with its cost comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub root: NodeId,
    pub via: ArcId,
    pub path: PathRecord,
    pub cost: CandidateCost,
}

impl Candidate {
    pub fn density(&self) -> f64 {
        self.path.density()
    }

    fn overlaps(&self, nodes: &HashSet<NodeId>) -> bool {
        self.path.nodes.iter().any(|n| nodes.contains(n))
    }

    fn into_promotion(self) -> Promotion {
        Promotion {
            root: self.root,
            via: self.via,
            density: self.path.density(),
            population: self.path.population,
            line_length: self.path.line_length(),
            cost: self.cost,
            nodes: self.path.nodes,
            arcs: self.path.arcs,
        }
    }
}

/// Candidates found by one read-only sweep.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    pub evaluated: usize,
    pub eligible: usize,
    /// Pairwise node-disjoint eligible candidates
    pub accepted: Vec<Candidate>,
}

/// Greedy planner bound to a validated configuration.
#[derive(Debug, Clone)]
pub struct GreedyExtensionPlanner {
    config: PlannerConfig,
}

impl GreedyExtensionPlanner {
    /// Validates the configuration up front so planning itself cannot fail.
    pub fn new(config: PlannerConfig) -> ElectrifyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Price off-grid service, then run passes until nothing is promoted.
    ///
    /// `network` must already be resolved. Running `plan` again on its own
    /// output promotes nothing.
    pub fn plan(&self, network: &mut Network) -> PlanReport {
        apply_off_grid_costs(network, &self.config);

        let mut report = PlanReport::default();
        loop {
            let pass = self.run_pass(network, report.passes_run + 1);
            report.passes_run += 1;
            if pass.promotions.is_empty() {
                break;
            }
            report.passes.push(pass);
        }

        let (investment, avoided) = report.promotions().fold((0.0, 0.0), |(i, a), p| {
            (i + p.cost.grid_cost, a + p.cost.microgrid_cost)
        });
        report.grid_investment = investment;
        report.off_grid_cost_avoided = avoided;
        report.stats = network.stats();
        info!(
            "planning finished after {} passes: {}",
            report.passes_run, report.stats
        );
        report
    }

    /// One sweep plus promotion of everything it accepted.
    pub fn run_pass(&self, network: &mut Network, pass: usize) -> PassReport {
        let sweep = self.sweep(network);
        info!(
            "pass {}: {} frontier arcs searched, {} eligible, {} accepted",
            pass,
            sweep.evaluated,
            sweep.eligible,
            sweep.accepted.len()
        );
        let promotions = promote(network, sweep.accepted);
        PassReport {
            pass,
            candidates_evaluated: sweep.evaluated,
            eligible: sweep.eligible,
            promotions,
        }
    }

    /// Search every frontier arc against a fixed snapshot of the network.
    ///
    /// Nodes are visited in id order and arcs in incidence order; that order
    /// decides density ties.
    pub fn sweep(&self, network: &Network) -> Sweep {
        let mut sweep = Sweep::default();
        for node in network.frontier() {
            for arc in network.candidate_arcs_at(node) {
                sweep.evaluated += 1;
                let path = find_best(network, node, arc.id);
                let cost = candidate_cost(network, &path.nodes, &path.arcs, &self.config);
                debug!(
                    "{} via {}: {} nodes, density {:.4}, grid {:.2} vs off-grid {:.2}",
                    node,
                    arc.id,
                    path.nodes.len(),
                    path.density(),
                    cost.grid_cost,
                    cost.microgrid_cost
                );
                if !cost.favours_grid() {
                    continue;
                }
                sweep.eligible += 1;
                offer(
                    &mut sweep.accepted,
                    Candidate {
                        root: node,
                        via: arc.id,
                        path,
                        cost,
                    },
                );
            }
        }
        sweep
    }
}

/// Add `candidate` unless an overlapping accepted candidate is at least as dense.
///
/// A strictly denser candidate displaces every accepted candidate it
/// overlaps, which keeps the accepted set pairwise node-disjoint.
fn offer(accepted: &mut Vec<Candidate>, candidate: Candidate) {
    let nodes: HashSet<NodeId> = candidate.path.nodes.iter().copied().collect();
    let density = candidate.density();
    if accepted
        .iter()
        .any(|other| other.overlaps(&nodes) && other.density() >= density)
    {
        debug!("{} via {} loses an overlap", candidate.root, candidate.via);
        return;
    }
    accepted.retain(|other| !other.overlaps(&nodes));
    accepted.push(candidate);
}

/// The only place planning mutates the network.
fn promote(network: &mut Network, accepted: Vec<Candidate>) -> Vec<Promotion> {
    accepted
        .into_iter()
        .map(|candidate| {
            for node in &candidate.path.nodes {
                network.node_mut(*node).connected_current = true;
            }
            for arc in &candidate.path.arcs {
                network.arc_mut(*arc).enabled = true;
            }
            candidate.into_promotion()
        })
        .collect()
}
