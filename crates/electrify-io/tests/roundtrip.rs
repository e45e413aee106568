//! File-based planning run: CSV in, tables out

use std::fs;

use electrify_algo::plan_electrification;
use electrify_core::{Coord, PlannerConfig};
use electrify_io::{
    load_topology, read_clusters_csv, read_segments_csv, write_outputs, ArcRow, NodeRow,
};
use tempfile::tempdir;

const CLUSTERS: &str = "\
x,y,pop_sum,area_m2,grid_dist
100.9,0.0,50,1.0,9000
0.4,0.0,1000,1.0,0
200.2,0.0,500,1.0,9000
";

const SEGMENTS: &str = "\
xs,ys,xe,ye
200.2,0.0,100.9,0.0
0.4,0.0,100.9,0.0
";

fn config() -> PlannerConfig {
    PlannerConfig {
        grid_distance_connected_threshold: 100.0,
        minimum_population: 0.0,
        demand_per_person_kw_peak: 1.0,
        generation_cost_per_kw: 1.0,
        microgrid_infrastructure_cost_per_area: 0.0,
        wire_cost_per_length: 1.0,
        grid_infrastructure_cost_per_area: 0.0,
    }
}

#[test]
fn reads_clustering_column_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clusters.csv");
    fs::write(&path, CLUSTERS).unwrap();

    let records = read_clusters_csv(&path).unwrap();
    assert_eq!(records.len(), 3);
    assert!((records[1].population - 1000.0).abs() < 1e-12);
    assert!((records[0].grid_distance - 9000.0).abs() < 1e-12);
}

#[test]
fn reads_and_snaps_segments() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("segments.csv");
    fs::write(&path, SEGMENTS).unwrap();

    let segments = read_segments_csv(&path).unwrap();
    assert_eq!(segments[0].start, Coord::new(200, 0));
    assert_eq!(segments[1].end, Coord::new(100, 0));
}

#[test]
fn non_finite_segment_endpoint_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("segments.csv");
    fs::write(&path, "xs,ys,xe,ye\n0.0,0.0,10.0,0.0\n0.0,0.0,NaN,0.0\n").unwrap();
    let err = read_segments_csv(&path).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("segment row 1"));
    assert!(message.contains("non-finite"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let err = read_clusters_csv(dir.path().join("absent.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}

#[test]
fn malformed_row_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clusters.csv");
    fs::write(&path, "x,y,pop_sum,area_m2,grid_dist\n1.0,2.0,many,1.0,0\n").unwrap();
    let err = read_clusters_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("row 0"));
}

#[test]
fn plans_and_writes_tables() {
    let dir = tempdir().unwrap();
    let clusters = dir.path().join("clusters.csv");
    let segments = dir.path().join("segments.csv");
    fs::write(&clusters, CLUSTERS).unwrap();
    fs::write(&segments, SEGMENTS).unwrap();

    let records = read_clusters_csv(&clusters).unwrap();
    let topology = load_topology(&segments).unwrap();
    let outcome = plan_electrification(&records, &topology, &config()).unwrap();

    let out_dir = dir.path().join("out");
    let written = write_outputs(&out_dir, &outcome).unwrap();
    assert_eq!(written.len(), 5);
    assert!(written.iter().all(|p| p.exists()));

    let mut reader = csv::Reader::from_path(out_dir.join("nodes.csv")).unwrap();
    let nodes: Vec<NodeRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    // population order: rows 1, 2, 0
    let rows: Vec<Option<usize>> = nodes.iter().map(|n| n.source_index).collect();
    assert_eq!(rows, vec![Some(1), Some(2), Some(0)]);
    assert!(nodes.iter().all(|n| n.connected_current));
    assert!(!nodes[1].connected_initial);
    assert!((nodes[1].off_grid_cost - 500.0).abs() < 1e-9);

    let mut reader = csv::Reader::from_path(out_dir.join("arcs.csv")).unwrap();
    let arcs: Vec<ArcRow> = reader.deserialize().map(|r| r.unwrap()).collect();
    assert_eq!(arcs.len(), 2);
    // the segment listed as C->B is re-oriented B->C
    assert_eq!((arcs[0].xs, arcs[0].xe), (100, 200));
    assert_eq!(arcs[0].node_start, Some(2));
    assert_eq!(arcs[0].node_end, Some(1));
    assert!(arcs.iter().all(|a| a.enabled && !a.existing));

    let json = fs::read_to_string(out_dir.join("arcs.json")).unwrap();
    let from_json: Vec<ArcRow> = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, arcs);

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("plan_report.json")).unwrap())
            .unwrap();
    assert_eq!(report["passes"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["stats"]["new_arcs"], 2);
}
