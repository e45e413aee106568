//! # electrify-io: Planning Tables
//!
//! Reads the inputs the planner needs from CSV and writes its decisions back
//! out as flat tables.
//!
//! | File | Direction | Columns |
//! |------|-----------|---------|
//! | clusters | in | `x`, `y`, `population`/`pop_sum`, `area`/`area_m2`, `grid_distance`/`grid_dist` |
//! | segments | in | `xs`, `ys`, `xe`, `ye` |
//! | `nodes.csv` / `nodes.json` | out | see [`tables::NodeRow`] |
//! | `arcs.csv` / `arcs.json` | out | see [`tables::ArcRow`] |
//! | `plan_report.json` | out | per-pass promotions and totals |
//!
//! Geometry stays as plain coordinates; no reprojection happens here.

pub mod export;
pub mod import;
pub mod tables;

pub use export::{write_arcs_csv, write_csv, write_json, write_nodes_csv, write_outputs};
pub use import::{load_topology, read_clusters_csv, read_segments_csv};
pub use tables::{arc_rows, node_rows, ArcRow, NodeRow};
