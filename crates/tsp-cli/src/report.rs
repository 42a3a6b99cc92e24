use std::time::Duration;

use serde::Serialize;
use tsp_brute_force::SolveReport;
use tsp_core::{Distance, Tour};

pub fn render_text(report: &SolveReport, elapsed: Duration) -> String {
    let best = &report.best;
    let outcome = if best.is_feasible() {
        format!("Minimum distance: {}\nPath: {}\n", best.distance, best.tour)
    } else {
        "No feasible tour exists\n".to_owned()
    };
    format!("{outcome}Elapsed (excluding I/O): {:.6}s\n", elapsed.as_secs_f64())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    feasible: bool,
    distance: Distance,
    path: Option<&'a Tour>,
    elapsed_secs: f64,
    workers: usize,
    active_workers: usize,
}

pub fn render_json(report: &SolveReport, elapsed: Duration) -> serde_json::Result<String> {
    let feasible = report.best.is_feasible();
    serde_json::to_string(&JsonReport {
        feasible,
        distance: report.best.distance,
        path: feasible.then_some(&report.best.tour),
        elapsed_secs: elapsed.as_secs_f64(),
        workers: report.workers,
        active_workers: report.active_workers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsp_core::BestTour;

    fn report(best: BestTour) -> SolveReport {
        SolveReport { best, workers: 4, active_workers: 3 }
    }

    #[test]
    fn feasible_text_report_lists_distance_and_path() {
        let best = BestTour {
            distance: Distance::finite(17),
            tour: Tour::from_vertices(vec![0, 2, 3, 1, 0]),
        };
        let text = render_text(&report(best), Duration::from_millis(1500));
        assert_eq!(
            text,
            "Minimum distance: 17\nPath: 0 2 3 1 0\nElapsed (excluding I/O): 1.500000s\n"
        );
    }

    #[test]
    fn infeasible_text_report_has_no_path() {
        let text = render_text(&report(BestTour::empty(3).unwrap()), Duration::ZERO);
        assert!(text.starts_with("No feasible tour exists\n"));
        assert!(!text.contains("Path:"));
    }

    #[test]
    fn json_report_uses_null_for_infeasible() {
        let json = render_json(&report(BestTour::empty(3).unwrap()), Duration::ZERO).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["feasible"], false);
        assert!(value["distance"].is_null());
        assert!(value["path"].is_null());
        assert_eq!(value["active_workers"], 3);
    }

    #[test]
    fn json_report_carries_the_path() {
        let json = render_json(&report(BestTour::trivial()), Duration::ZERO).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["distance"], 0);
        assert_eq!(value["path"], serde_json::json!([0]));
    }
}
