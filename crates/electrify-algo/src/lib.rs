//! # electrify-algo: Greedy Grid-Extension Planning
//!
//! Decides which off-grid population clusters should be reached by extending
//! the electricity grid along a candidate spanning tree, and which are better
//! served by local generation.
//!
//! ## Stages
//!
//! | Stage | Entry point | Mutates |
//! |-------|-------------|---------|
//! | Intake | [`intake::prepare_clusters`] | |
//! | Construction | [`builder::NetworkBuilder`] | builds a fresh network |
//! | Resolution | [`resolve::resolve_connectivity`] | endpoints, incidence, classification |
//! | Costing | [`cost::apply_off_grid_costs`] | `off_grid_cost` |
//! | Planning | [`planner::GreedyExtensionPlanner`] | `connected_current`, `enabled` |
//!
//! [`pipeline::plan_electrification`] runs them in order.
//!
//! ## Example
//!
//! ```
//! use electrify_algo::{plan_electrification, ClusterRecord, PrecomputedTopology, Segment};
//! use electrify_core::{Coord, PlannerConfig};
//!
//! let config = PlannerConfig {
//!     grid_distance_connected_threshold: 100.0,
//!     minimum_population: 0.0,
//!     demand_per_person_kw_peak: 1.0,
//!     generation_cost_per_kw: 1.0,
//!     microgrid_infrastructure_cost_per_area: 0.0,
//!     wire_cost_per_length: 1.0,
//!     grid_infrastructure_cost_per_area: 0.0,
//! };
//! let records = vec![
//!     ClusterRecord { x: 0.0, y: 0.0, population: 1000.0, area: 0.0, grid_distance: 0.0 },
//!     ClusterRecord { x: 10.0, y: 0.0, population: 100.0, area: 0.0, grid_distance: 500.0 },
//! ];
//! let topology = PrecomputedTopology::new(vec![Segment::new(Coord::new(0, 0), Coord::new(10, 0))]);
//!
//! let outcome = plan_electrification(&records, &topology, &config).unwrap();
//! assert!(outcome.network.nodes[1].connected_current);
//! println!("{}", outcome.report.summary());
//! ```

pub mod builder;
pub mod cost;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod planner;
pub mod resolve;
pub mod topology;

pub use builder::NetworkBuilder;
pub use cost::{apply_off_grid_costs, candidate_cost, off_grid_cost, CandidateCost};
pub use error::BuildError;
pub use intake::{prepare_clusters, Cluster, ClusterRecord};
pub use pipeline::{plan_electrification, PlanOutcome};
pub use planner::{GreedyExtensionPlanner, PassReport, PathRecord, PlanReport, Promotion};
pub use resolve::resolve_connectivity;
pub use topology::{PrecomputedTopology, Segment, TopologySource};
