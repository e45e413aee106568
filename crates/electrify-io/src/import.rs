//! CSV readers for cluster records and candidate segments.

use std::path::Path;

use anyhow::{Context, Result};
use electrify_algo::{ClusterRecord, PrecomputedTopology, Segment};
use serde::Deserialize;
use tracing::debug;

/// Segment row with projected floating-point endpoints.
#[derive(Debug, Clone, Deserialize)]
struct SegmentRow {
    xs: f64,
    ys: f64,
    xe: f64,
    ye: f64,
}

/// Read cluster records.
///
/// Expects columns `x`, `y`, `population`, `area`, `grid_distance`; the
/// clustering step's `pop_sum`, `area_m2` and `grid_dist` are accepted too.
pub fn read_clusters_csv(path: impl AsRef<Path>) -> Result<Vec<ClusterRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening cluster table {}", path.display()))?;
    let mut records = Vec::new();
    for (row, record) in reader.deserialize().enumerate() {
        let record: ClusterRecord = record
            .with_context(|| format!("parsing cluster row {} in {}", row, path.display()))?;
        records.push(record);
    }
    debug!("read {} clusters from {}", records.len(), path.display());
    Ok(records)
}

/// Read candidate segments from columns `xs`, `ys`, `xe`, `ye`.
pub fn read_segments_csv(path: impl AsRef<Path>) -> Result<Vec<Segment>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening segment table {}", path.display()))?;
    let mut segments = Vec::new();
    for (row, record) in reader.deserialize().enumerate() {
        let record: SegmentRow = record
            .with_context(|| format!("parsing segment row {} in {}", row, path.display()))?;
        let segment = Segment::from_float(record.xs, record.ys, record.xe, record.ye)
            .with_context(|| format!("segment row {} in {}", row, path.display()))?;
        segments.push(segment);
    }
    debug!("read {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

/// Segment table as a topology source.
pub fn load_topology(path: impl AsRef<Path>) -> Result<PrecomputedTopology> {
    Ok(PrecomputedTopology::new(read_segments_csv(path)?))
}
