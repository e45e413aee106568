//! CSV and JSON writers for planning results.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use electrify_algo::PlanOutcome;
use electrify_core::Network;
use serde::Serialize;
use tracing::info;

use crate::tables::{arc_rows, node_rows};

pub const NODES_CSV: &str = "nodes.csv";
pub const ARCS_CSV: &str = "arcs.csv";
pub const NODES_JSON: &str = "nodes.json";
pub const ARCS_JSON: &str = "arcs.json";
pub const REPORT_JSON: &str = "plan_report.json";

/// Write serializable rows as CSV with a header taken from the field names.
pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating CSV writer for {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("writing CSV record to {}", path.display()))?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

/// Write any serializable value as pretty JSON.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("creating JSON file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing JSON to {}", path.display()))?;
    Ok(())
}

pub fn write_nodes_csv(path: impl AsRef<Path>, network: &Network) -> Result<()> {
    write_csv(path, &node_rows(network))
}

pub fn write_arcs_csv(path: impl AsRef<Path>, network: &Network) -> Result<()> {
    write_csv(path, &arc_rows(network))
}

/// Write node and arc tables (CSV and JSON) plus the plan report into `out_dir`.
///
/// Returns the paths written.
pub fn write_outputs(out_dir: &Path, outcome: &PlanOutcome) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| {
        format!(
            "failed to create output directory '{}'; check permissions",
            out_dir.display()
        )
    })?;

    let nodes = node_rows(&outcome.network);
    let arcs = arc_rows(&outcome.network);
    let paths: Vec<PathBuf> = [NODES_CSV, ARCS_CSV, NODES_JSON, ARCS_JSON, REPORT_JSON]
        .iter()
        .map(|name| out_dir.join(name))
        .collect();

    write_csv(&paths[0], &nodes)?;
    write_csv(&paths[1], &arcs)?;
    write_json(&paths[2], &nodes)?;
    write_json(&paths[3], &arcs)?;
    write_json(&paths[4], &outcome.report)?;

    info!(
        "wrote {} nodes and {} arcs under {}",
        nodes.len(),
        arcs.len(),
        out_dir.display()
    );
    Ok(paths)
}
