//! Flat decision tables for joining results back to the input layers.

use electrify_core::{Arc, Network, Node};
use serde::{Deserialize, Serialize};

/// One row per cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRow {
    pub node_id: usize,
    /// Row in the cluster input table
    pub source_index: Option<usize>,
    pub x: i64,
    pub y: i64,
    pub population: f64,
    pub area: f64,
    pub connected_initial: bool,
    pub connected_current: bool,
    pub off_grid_cost: f64,
}

impl From<&Node> for NodeRow {
    fn from(node: &Node) -> Self {
        Self {
            node_id: node.id.value(),
            source_index: node.source_index,
            x: node.coord.x,
            y: node.coord.y,
            population: node.population,
            area: node.area,
            connected_initial: node.connected_initial,
            connected_current: node.connected_current,
            off_grid_cost: node.off_grid_cost,
        }
    }
}

/// One row per line segment, oriented away from the grid seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcRow {
    pub arc_id: usize,
    pub xs: i64,
    pub ys: i64,
    pub xe: i64,
    pub ye: i64,
    pub node_start: Option<usize>,
    pub node_end: Option<usize>,
    pub existing: bool,
    pub length: f64,
    pub enabled: bool,
}

impl From<&Arc> for ArcRow {
    fn from(arc: &Arc) -> Self {
        Self {
            arc_id: arc.id.value(),
            xs: arc.start_xy.x,
            ys: arc.start_xy.y,
            xe: arc.end_xy.x,
            ye: arc.end_xy.y,
            node_start: arc.start_node_id.map(|id| id.value()),
            node_end: arc.end_node_id.map(|id| id.value()),
            existing: arc.existing,
            length: arc.length,
            enabled: arc.enabled,
        }
    }
}

pub fn node_rows(network: &Network) -> Vec<NodeRow> {
    network.nodes.iter().map(NodeRow::from).collect()
}

pub fn arc_rows(network: &Network) -> Vec<ArcRow> {
    network.arcs.iter().map(ArcRow::from).collect()
}
