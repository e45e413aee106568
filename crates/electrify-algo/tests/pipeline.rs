//! End-to-end runs from cluster records

use electrify_algo::{plan_electrification, ClusterRecord, PrecomputedTopology, Segment};
use electrify_core::{Coord, ElectrifyError, ElectrifyResult, PlannerConfig};

fn config() -> PlannerConfig {
    PlannerConfig {
        grid_distance_connected_threshold: 100.0,
        minimum_population: 10.0,
        demand_per_person_kw_peak: 1.0,
        generation_cost_per_kw: 1.0,
        microgrid_infrastructure_cost_per_area: 0.0,
        wire_cost_per_length: 1.0,
        grid_infrastructure_cost_per_area: 0.0,
    }
}

fn record(x: f64, population: f64, grid_distance: f64) -> ClusterRecord {
    ClusterRecord {
        x,
        y: 0.0,
        population,
        area: 1.0,
        grid_distance,
    }
}

fn records() -> Vec<ClusterRecord> {
    vec![
        record(10.7, 100.0, 5000.0),
        record(0.2, 1000.0, 5000.0),
        record(500.0, 5.0, 0.0),
        record(-20.9, 300.0, 50.0),
    ]
}

/// Every centroid joined straight to the first one.
fn star(points: &[Coord]) -> ElectrifyResult<Vec<Segment>> {
    let Some((first, rest)) = points.split_first() else {
        return Ok(Vec::new());
    };
    Ok(rest.iter().map(|p| Segment::new(*first, *p)).collect())
}

#[test]
fn plans_from_records() {
    let outcome = plan_electrification(&records(), &star, &config()).unwrap();
    let network = &outcome.network;

    // population order: row 1, row 3, row 0; row 2 is below the minimum
    assert_eq!(network.nodes.len(), 3);
    let rows: Vec<Option<usize>> = network.nodes.iter().map(|n| n.source_index).collect();
    assert_eq!(rows, vec![Some(1), Some(3), Some(0)]);
    assert_eq!(network.nodes[1].coord, Coord::new(-20, 0));

    // largest cluster seeds the grid even though it is far from it
    assert!(network.nodes[0].connected_initial);
    assert!(network.nodes[1].connected_initial);
    assert!(network.nodes[2].is_new_connection());

    assert!(network.arcs[0].existing && network.arcs[0].enabled);
    assert!(!network.arcs[1].existing && network.arcs[1].enabled);
    assert_eq!(outcome.report.nodes_connected(), 1);
    assert!((outcome.report.grid_investment - 10.0).abs() < 1e-9);
}

#[test]
fn precomputed_segments_in_any_orientation() {
    let topology = PrecomputedTopology::new(vec![
        Segment::from_float(-20.9, 0.0, 0.2, 0.0).unwrap(),
        Segment::from_float(10.7, 0.0, 0.2, 0.0).unwrap(),
    ]);
    let outcome = plan_electrification(&records(), &topology, &config()).unwrap();
    let arc = &outcome.network.arcs[1];
    assert_eq!(arc.start_xy, Coord::new(0, 0));
    assert_eq!(arc.end_xy, Coord::new(10, 0));
    assert!(outcome.network.nodes.iter().all(|n| n.connected_current));
}

#[test]
fn invalid_config_is_rejected_before_planning() {
    let mut config = config();
    config.generation_cost_per_kw = 0.0;
    let err = plan_electrification(&records(), &star, &config).unwrap_err();
    assert!(matches!(err, ElectrifyError::Config(_)));
}

#[test]
fn stray_segment_is_a_topology_error() {
    let topology = PrecomputedTopology::new(vec![
        Segment::new(Coord::new(0, 0), Coord::new(-20, 0)),
        Segment::new(Coord::new(0, 0), Coord::new(11, 0)),
    ]);
    let err = plan_electrification(&records(), &topology, &config()).unwrap_err();
    assert!(matches!(err, ElectrifyError::Topology(_)));
}

#[test]
fn coincident_centroids_are_a_geometry_error() {
    let mut records = records();
    records.push(record(10.2, 50.0, 5000.0));
    let err = plan_electrification(&records, &star, &config()).unwrap_err();
    assert!(matches!(err, ElectrifyError::Geometry(_)));
}

#[test]
fn topology_source_errors_propagate() {
    let failing = |_: &[Coord]| -> ElectrifyResult<Vec<Segment>> { Err("no tree".into()) };
    let err = plan_electrification(&records(), &failing, &config()).unwrap_err();
    assert_eq!(err.to_string(), "no tree");
}

#[test]
fn nothing_survives_intake() {
    let records = vec![record(0.0, 1.0, 0.0)];
    let err = plan_electrification(&records, &star, &config()).unwrap_err();
    assert!(matches!(err, ElectrifyError::Topology(_)));
}

#[test]
fn nan_centroid_is_not_snapped_to_origin() {
    let mut records = records();
    records[0].x = f64::NAN;
    let err = plan_electrification(&records, &star, &config()).unwrap_err();
    assert!(matches!(err, ElectrifyError::Input(ref m) if m.contains("cluster row 0")));
}

#[test]
fn negative_area_is_rejected() {
    let mut records = records();
    records[3].area = -1000.0;
    let err = plan_electrification(&records, &star, &config()).unwrap_err();
    assert!(matches!(err, ElectrifyError::Input(ref m) if m.contains("area")));
}

#[test]
fn infinite_centroids_fail_cleanly() {
    let mut records = records();
    records[0].x = f64::INFINITY;
    records[3].x = f64::NEG_INFINITY;
    let err = plan_electrification(&records, &star, &config()).unwrap_err();
    assert!(matches!(err, ElectrifyError::Input(_)));
}

#[test]
fn far_apart_centroids_do_not_overflow() {
    let records = vec![
        record(-9.0e18, 1000.0, 0.0),
        record(9.0e18, 500.0, 5000.0),
    ];
    let outcome = plan_electrification(&records, &star, &config()).unwrap();
    assert!(outcome.network.arcs[0].length > 1.7e19);
    assert!(!outcome.network.nodes[1].connected_current);
}
