//! Cluster intake: population filter, initial grid classification and ordering.

use std::collections::HashMap;

use electrify_core::{Coord, ElectrifyError, ElectrifyResult, PlannerConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One settlement cluster as delivered by the upstream clustering step.
///
/// Coordinates are projected (metres in an equal-area projection); this crate
/// does no reprojection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    /// Centroid easting
    pub x: f64,
    /// Centroid northing
    pub y: f64,
    #[serde(alias = "pop_sum")]
    pub population: f64,
    #[serde(alias = "area_m2")]
    pub area: f64,
    /// Distance from the centroid to existing grid infrastructure
    #[serde(alias = "grid_dist")]
    pub grid_distance: f64,
}

/// A cluster accepted for planning, ready to become a [`electrify_core::Node`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub coord: Coord,
    pub population: f64,
    pub area: f64,
    pub connected: bool,
    /// Row of the record in the intake table
    pub source_index: usize,
}

/// Filter, classify and order cluster records.
///
/// Every row is checked first: coordinates and `grid_distance` must be
/// finite, population and area finite and non-negative. A bad row fails the
/// whole intake with [`ElectrifyError::Input`] naming the row.
///
/// Keeps clusters with strictly more people than `minimum_population`, marks
/// those within `grid_distance_connected_threshold` of the grid as connected,
/// and sorts by population descending (stable, so equal populations keep
/// their input order). The first cluster seeds node id 0.
pub fn prepare_clusters(
    records: &[ClusterRecord],
    config: &PlannerConfig,
) -> ElectrifyResult<Vec<Cluster>> {
    let mut clusters = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let coord = check_record(index, record)?;
        if record.population <= config.minimum_population {
            continue;
        }
        clusters.push(Cluster {
            coord,
            population: record.population,
            area: record.area,
            connected: record.grid_distance <= config.grid_distance_connected_threshold,
            source_index: index,
        });
    }

    let dropped = records.len() - clusters.len();
    if dropped > 0 {
        warn!(
            "dropped {} of {} clusters at or below minimum population {}",
            dropped,
            records.len(),
            config.minimum_population
        );
    }

    clusters.sort_by(|a, b| b.population.total_cmp(&a.population));

    let mut seen: HashMap<Coord, usize> = HashMap::new();
    for cluster in &clusters {
        if let Some(first) = seen.insert(cluster.coord, cluster.source_index) {
            warn!(
                "rows {} and {} snap to the same centroid {}",
                first, cluster.source_index, cluster.coord
            );
        }
    }

    if let Some(largest) = clusters.first() {
        if !largest.connected {
            warn!(
                "largest cluster (row {}, population {}) is not within the grid threshold; it will seed the grid",
                largest.source_index, largest.population
            );
        }
    }
    debug!("{} clusters ready for planning", clusters.len());
    Ok(clusters)
}

/// Snapped centroid of a row whose numeric fields are usable.
fn check_record(index: usize, record: &ClusterRecord) -> ElectrifyResult<Coord> {
    let bad = |what: String| ElectrifyError::Input(format!("cluster row {index}: {what}"));
    let coord = Coord::try_snap(record.x, record.y).ok_or_else(|| {
        bad(format!(
            "centroid ({}, {}) is not a finite coordinate",
            record.x, record.y
        ))
    })?;
    for (name, value) in [("population", record.population), ("area", record.area)] {
        if !value.is_finite() || value < 0.0 {
            return Err(bad(format!("{name} must be finite and non-negative, got {value}")));
        }
    }
    if !record.grid_distance.is_finite() {
        return Err(bad(format!(
            "grid_distance must be finite, got {}",
            record.grid_distance
        )));
    }
    Ok(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PlannerConfig {
        PlannerConfig {
            grid_distance_connected_threshold: 1000.0,
            minimum_population: 200.0,
            demand_per_person_kw_peak: 0.1,
            generation_cost_per_kw: 1000.0,
            microgrid_infrastructure_cost_per_area: 0.5,
            wire_cost_per_length: 20.0,
            grid_infrastructure_cost_per_area: 1.0,
        }
    }

    fn record(x: f64, population: f64, grid_distance: f64) -> ClusterRecord {
        ClusterRecord {
            x,
            y: 0.0,
            population,
            area: 10.0,
            grid_distance,
        }
    }

    #[test]
    fn test_filters_at_threshold() {
        let records = vec![record(0.0, 200.0, 0.0), record(1.0, 201.0, 0.0)];
        let clusters = prepare_clusters(&records, &config()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].source_index, 1);
    }

    #[test]
    fn test_classifies_and_sorts() {
        let records = vec![
            record(0.0, 300.0, 5000.0),
            record(1.5, 900.0, 1000.0),
            record(2.0, 300.0, 999.0),
        ];
        let clusters = prepare_clusters(&records, &config()).unwrap();
        let order: Vec<usize> = clusters.iter().map(|c| c.source_index).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert!(clusters[0].connected);
        assert!(!clusters[1].connected);
        assert!(clusters[2].connected);
        assert_eq!(clusters[0].coord, Coord::new(1, 0));
    }

    fn input_error(records: &[ClusterRecord]) -> String {
        match prepare_clusters(records, &config()) {
            Err(ElectrifyError::Input(message)) => message,
            other => panic!("expected an input error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_nan_centroid() {
        let mut bad = record(0.0, 900.0, 0.0);
        bad.y = f64::NAN;
        let message = input_error(&[record(5.0, 300.0, 0.0), bad]);
        assert!(message.contains("cluster row 1"));
        assert!(message.contains("centroid"));
    }

    #[test]
    fn test_rejects_infinite_centroid() {
        let message = input_error(&[record(f64::INFINITY, 900.0, 0.0)]);
        assert!(message.contains("cluster row 0"));
        let message = input_error(&[record(f64::NEG_INFINITY, 900.0, 0.0)]);
        assert!(message.contains("centroid"));
    }

    #[test]
    fn test_rejects_negative_area() {
        let mut bad = record(0.0, 900.0, 0.0);
        bad.area = -1000.0;
        assert!(input_error(&[bad]).contains("area"));
    }

    #[test]
    fn test_rejects_bad_population_even_when_filtered() {
        // NaN would otherwise fall out silently at the population filter
        assert!(input_error(&[record(0.0, f64::NAN, 0.0)]).contains("population"));
        assert!(input_error(&[record(0.0, -5.0, 0.0)]).contains("population"));
    }

    #[test]
    fn test_rejects_non_finite_grid_distance() {
        assert!(input_error(&[record(0.0, 900.0, f64::NAN)]).contains("grid_distance"));
        assert!(input_error(&[record(0.0, 900.0, f64::INFINITY)]).contains("grid_distance"));
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dropped_clusters_are_warned() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let records = vec![record(0.0, 900.0, 0.0), record(1.0, 150.0, 0.0)];
        let clusters = tracing::subscriber::with_default(subscriber, || {
            prepare_clusters(&records, &config()).unwrap()
        });
        assert_eq!(clusters.len(), 1);

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("dropped 1 of 2 clusters"));
    }
}
