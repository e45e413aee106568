//! End-to-end planning from cluster records to decisions.

use electrify_core::{Coord, ElectrifyResult, Network, PlannerConfig};
use tracing::info;

use crate::builder::NetworkBuilder;
use crate::intake::{prepare_clusters, ClusterRecord};
use crate::planner::{GreedyExtensionPlanner, PlanReport};
use crate::resolve::resolve_connectivity;
use crate::topology::TopologySource;

/// Planned network plus the report of how it got there.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub network: Network,
    pub report: PlanReport,
}

/// Intake, topology, build, resolve and plan in one call.
///
/// The topology source receives centroids in node-id order (population
/// descending). Bad input rows and construction errors stop the run before
/// planning.
pub fn plan_electrification(
    records: &[ClusterRecord],
    source: &impl TopologySource,
    config: &PlannerConfig,
) -> ElectrifyResult<PlanOutcome> {
    let planner = GreedyExtensionPlanner::new(config.clone())?;

    let clusters = prepare_clusters(records, config)?;
    info!(
        "{} of {} clusters kept for planning",
        clusters.len(),
        records.len()
    );

    let points: Vec<Coord> = clusters.iter().map(|c| c.coord).collect();
    let segments = source.spanning_segments(&points)?;

    let mut network = NetworkBuilder::from_parts(clusters, segments).build()?;
    resolve_connectivity(&mut network)?;
    info!("network resolved: {}", network.stats());

    let report = planner.plan(&mut network);
    Ok(PlanOutcome { network, report })
}
