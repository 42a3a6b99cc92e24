use serde_json::json;
use tsp_brute_force::{solve, solve_with_report, SolveConfig};
use tsp_core::{Distance, DistanceMatrix, INF};

fn fixture(value: serde_json::Value) -> DistanceMatrix {
    DistanceMatrix::from_json(&value.to_string()).unwrap()
}

#[test]
fn single_vertex_is_a_zero_length_tour() {
    let matrix = fixture(json!({ "size": 1, "weights": [[0]] }));
    for workers in 1..=3 {
        let report = solve_with_report(&matrix, &SolveConfig::with_workers(workers)).unwrap();
        assert_eq!(report.best.distance, Distance::ZERO);
        assert_eq!(report.best.tour.vertices(), &[0]);
        assert_eq!(report.active_workers, 0);
    }
}

#[test]
fn two_vertices_go_there_and_back() {
    let matrix = fixture(json!({ "size": 2, "weights": [[0, 5], [5, 0]] }));
    for workers in 1..=3 {
        let best = solve(&matrix, &SolveConfig::with_workers(workers)).unwrap();
        assert_eq!(best.distance, Distance::finite(10));
        assert_eq!(best.tour.vertices(), &[0, 1, 0]);
    }
}

#[test]
fn infeasible_pair_still_reports_the_only_tour() {
    let matrix = fixture(json!({ "size": 2, "weights": [[0, 5], [null, 0]] }));
    for workers in 1..=3 {
        let best = solve(&matrix, &SolveConfig::with_workers(workers)).unwrap();
        assert!(!best.is_feasible());
        assert_eq!(best.tour.vertices(), &[0, 1, 0]);
    }
}

#[test]
fn uniform_weights_cost_one_per_vertex() {
    let matrix = fixture(json!({
        "size": 4,
        "weights": [[0, 1, 1, 1], [1, 0, 1, 1], [1, 1, 0, 1], [1, 1, 1, 0]]
    }));
    for workers in 1..=4 {
        let best = solve(&matrix, &SolveConfig::with_workers(workers)).unwrap();
        assert_eq!(best.distance, Distance::finite(4));
        // Lowest worker owns the first move to vertex 1 and wins the tie.
        assert_eq!(best.tour.vertices(), &[0, 1, 2, 3, 0]);
    }
}

#[test]
fn isolated_start_is_infeasible_for_every_worker_count() {
    let matrix = fixture(json!({
        "size": 5,
        "weights": [
            [0, null, null, null, null],
            [3, 0, 4, 2, 7],
            [1, 4, 0, 9, 3],
            [8, 2, 6, 0, 1],
            [5, 5, 5, 5, 0]
        ]
    }));
    for workers in 1..=6 {
        let best = solve(&matrix, &SolveConfig::with_workers(workers)).unwrap();
        assert!(!best.is_feasible(), "workers={workers}");
        assert_eq!(best.distance, Distance::INF);
    }
}

#[test]
fn only_feasible_tour_is_found() {
    // The single feasible cycle is 0 -> 2 -> 1 -> 3 -> 0.
    let matrix = DistanceMatrix::from_rows(vec![
        vec![0, INF, 4, INF],
        vec![INF, 0, INF, 6],
        vec![INF, 5, 0, INF],
        vec![7, INF, INF, 0],
    ])
    .unwrap();
    for workers in 1..=3 {
        let best = solve(&matrix, &SolveConfig::with_workers(workers)).unwrap();
        assert_eq!(best.distance, Distance::finite(22));
        assert_eq!(best.tour.vertices(), &[0, 2, 1, 3, 0]);
    }
}

#[test]
fn asymmetric_instance_picks_the_cheap_orientation() {
    let matrix = fixture(json!({
        "size": 4,
        "weights": [
            [0, 1, 50, 50],
            [50, 0, 1, 50],
            [50, 50, 0, 1],
            [1, 50, 50, 0]
        ]
    }));
    let best = solve(&matrix, &SolveConfig::with_workers(2)).unwrap();
    assert_eq!(best.distance, Distance::finite(4));
    assert_eq!(best.tour.vertices(), &[0, 1, 2, 3, 0]);
}

#[test]
fn text_input_from_debug_mode_solves() {
    let text = "0 2 9 10\n1 0 6 4\n15 7 0 8\n6 3 12 0\n";
    let matrix = DistanceMatrix::from_text(4, text).unwrap();
    let best = solve(&matrix, &SolveConfig::sequential()).unwrap();
    // 0 -> 2 -> 3 -> 1 -> 0 = 9 + 8 + 3 + 1
    assert_eq!(best.distance, Distance::finite(21));
    assert_eq!(best.tour.vertices(), &[0, 2, 3, 1, 0]);
}
