use std::thread;

use crossbeam_channel::{bounded, Receiver};
use log::{debug, info, warn};
use tsp_core::{BestTour, DistanceMatrix, Error, GlobalBest, LocalBest, Result};

use crate::partition::{assignments, WorkerRange};
use crate::reduce::GlobalReducer;
use crate::search::search_worker;

/// How the search is spread: `workers` independent workers, each of which
/// may fan its first moves out over `threads_per_worker` threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolveConfig {
    pub workers: usize,
    pub threads_per_worker: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self { workers: 1, threads_per_worker: 1 }
    }
}

impl SolveConfig {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn with_workers(workers: usize) -> Self {
        Self { workers, ..Self::default() }
    }

    pub fn threads_per_worker(mut self, threads: usize) -> Self {
        self.threads_per_worker = threads;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::invalid_input("worker count must be at least 1"));
        }
        if self.threads_per_worker == 0 {
            return Err(Error::invalid_input("threads per worker must be at least 1"));
        }
        Ok(())
    }
}

/// The single message an active worker sends to the coordinator.
#[derive(Clone, Debug)]
pub struct WorkerReport {
    pub worker: usize,
    pub best: LocalBest,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveReport {
    pub best: GlobalBest,
    pub workers: usize,
    pub active_workers: usize,
}

pub fn solve(matrix: &DistanceMatrix, config: &SolveConfig) -> Result<GlobalBest> {
    Ok(solve_with_report(matrix, config)?.best)
}

/// Runs every active worker on its share of first moves and reduces their
/// local bests, in ascending worker order, into the global best.
pub fn solve_with_report(matrix: &DistanceMatrix, config: &SolveConfig) -> Result<SolveReport> {
    config.validate()?;
    let size = matrix.size();
    if size == 1 {
        return Ok(SolveReport {
            best: BestTour::trivial(),
            workers: config.workers,
            active_workers: 0,
        });
    }

    let assignments = assignments(size, config.workers);
    if assignments.len() < config.workers {
        warn!(
            "{} workers requested but only {} first moves exist; {} workers stay idle",
            config.workers,
            size - 1,
            config.workers - assignments.len()
        );
    }

    let (sender, receiver) = bounded::<Result<WorkerReport>>(assignments.len());
    let best = thread::scope(|scope| {
        for &(worker, range) in &assignments {
            let sender = sender.clone();
            let threads = config.threads_per_worker;
            scope.spawn(move || {
                debug!("worker {worker} searching first moves {range}");
                let report = search_worker(matrix, range, threads)
                    .map(|best| WorkerReport { worker, best });
                // Capacity equals the number of workers, so this never blocks;
                // it fails only once the coordinator has given up.
                let _ = sender.send(report);
            });
        }
        drop(sender);
        collect_reports(&receiver, &assignments, size)
    })?;

    info!(
        "reduced {} worker results: distance {}",
        assignments.len(),
        best.distance
    );
    Ok(SolveReport {
        best,
        workers: config.workers,
        active_workers: assignments.len(),
    })
}

/// Receives exactly one report per active worker and folds them in
/// ascending worker index, whatever order they arrived in.
fn collect_reports(
    receiver: &Receiver<Result<WorkerReport>>,
    assignments: &[(usize, WorkerRange)],
    size: usize,
) -> Result<GlobalBest> {
    let mut slots: Vec<Option<LocalBest>> = vec![None; assignments.len()];
    for received in 0..assignments.len() {
        let report = receiver.recv().map_err(|_| {
            Error::protocol(format!(
                "channel closed after {received} of {} worker reports",
                assignments.len()
            ))
        })??;
        let Some(position) = assignments
            .iter()
            .position(|&(worker, _)| worker == report.worker)
        else {
            return Err(Error::protocol(format!(
                "report from worker {} which has no assigned range",
                report.worker
            )));
        };
        if report.best.tour.len() != size + 1 {
            return Err(Error::protocol(format!(
                "worker {} reported a path of {} vertices, expected {}",
                report.worker,
                report.best.tour.len(),
                size + 1
            )));
        }
        let slot = &mut slots[position];
        if slot.is_some() {
            return Err(Error::protocol(format!(
                "worker {} reported more than once",
                report.worker
            )));
        }
        debug!("worker {} reported distance {}", report.worker, report.best.distance);
        *slot = Some(report.best);
    }

    let mut reducer = GlobalReducer::new();
    for best in slots.into_iter().flatten() {
        reducer.fold(best);
    }
    reducer
        .finish()
        .ok_or_else(|| Error::protocol("no worker reported a result"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(worker: usize, distance: i64, tour: Vec<usize>) -> Result<WorkerReport> {
        Ok(WorkerReport {
            worker,
            best: BestTour {
                distance: tsp_core::Distance::finite(distance),
                tour: tsp_core::Tour::from_vertices(tour),
            },
        })
    }

    fn two_workers() -> Vec<(usize, WorkerRange)> {
        vec![
            (0, WorkerRange { start: 1, end: 1 }),
            (1, WorkerRange { start: 2, end: 2 }),
        ]
    }

    #[test]
    fn reports_are_folded_by_worker_index_not_arrival() {
        let (sender, receiver) = bounded(2);
        sender.send(report(1, 6, vec![0, 2, 1, 0])).unwrap();
        sender.send(report(0, 6, vec![0, 1, 2, 0])).unwrap();
        let best = collect_reports(&receiver, &two_workers(), 3).unwrap();
        assert_eq!(best.tour.vertices(), &[0, 1, 2, 0]);
    }

    #[test]
    fn missing_report_is_a_protocol_error() {
        let (sender, receiver) = bounded(2);
        sender.send(report(0, 6, vec![0, 1, 2, 0])).unwrap();
        drop(sender);
        let err = collect_reports(&receiver, &two_workers(), 3).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn duplicate_report_is_a_protocol_error() {
        let (sender, receiver) = bounded(2);
        sender.send(report(0, 6, vec![0, 1, 2, 0])).unwrap();
        sender.send(report(0, 5, vec![0, 2, 1, 0])).unwrap();
        let err = collect_reports(&receiver, &two_workers(), 3).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn wrong_path_length_is_a_protocol_error() {
        let (sender, receiver) = bounded(2);
        sender.send(report(0, 6, vec![0, 1, 0])).unwrap();
        let err = collect_reports(&receiver, &two_workers(), 3).unwrap_err();
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn report_from_idle_worker_is_a_protocol_error() {
        let (sender, receiver) = bounded(2);
        sender.send(report(2, 6, vec![0, 1, 2, 0])).unwrap();
        let err = collect_reports(&receiver, &two_workers(), 3).unwrap_err();
        assert!(err.to_string().contains("no assigned range"));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let matrix = DistanceMatrix::random(4, 10, 1).unwrap();
        let err = solve(&matrix, &SolveConfig::with_workers(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn surplus_workers_cost_nothing() {
        let matrix = DistanceMatrix::random(4, 100, 42).unwrap();
        let sequential = solve(&matrix, &SolveConfig::sequential()).unwrap();
        for workers in [usize::MAX, 1 << 40] {
            let report = solve_with_report(&matrix, &SolveConfig::with_workers(workers)).unwrap();
            assert_eq!(report.workers, workers);
            assert_eq!(report.active_workers, 3);
            assert_eq!(report.best, sequential);
        }
    }

    #[test]
    fn report_counts_active_workers() {
        let matrix = DistanceMatrix::random(4, 10, 1).unwrap();
        let report = solve_with_report(&matrix, &SolveConfig::with_workers(5)).unwrap();
        assert_eq!(report.workers, 5);
        assert_eq!(report.active_workers, 3);
    }
}
