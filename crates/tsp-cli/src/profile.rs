use std::time::Instant;

use anyhow::{ensure, Context, Result};
use log::info;
use serde::Serialize;
use tsp_brute_force::{solve, SolveConfig};
use tsp_core::{DistanceMatrix, GlobalBest};

use crate::options::ProfileOptions;

/// One sequential-against-parallel comparison.
#[derive(Clone, Debug, Serialize)]
pub struct ProfileRecord {
    pub n: usize,
    pub workers: usize,
    pub sequential_secs: f64,
    pub parallel_secs: f64,
    pub speedup: f64,
    pub efficiency: f64,
    /// Parallel result differs from the sequential one.
    pub mismatch: bool,
}

pub fn run_profile(options: &ProfileOptions) -> Result<Vec<ProfileRecord>> {
    ensure!(options.min_n >= 1, "--min-n must be at least 1");
    ensure!(options.min_n <= options.max_n, "--min-n is larger than --max-n");
    ensure!(options.workers_from >= 1, "--workers-from must be at least 1");
    ensure!(
        options.workers_from <= options.workers_to,
        "--workers-from is larger than --workers-to"
    );

    let mut records = Vec::new();
    for n in options.min_n..=options.max_n {
        let matrix = DistanceMatrix::random(n, options.max_distance, options.seed)
            .with_context(|| format!("generating a graph of {n} vertices"))?;
        let (sequential, sequential_secs) = timed_solve(&matrix, SolveConfig::sequential())?;
        for workers in options.workers_from..=options.workers_to {
            let (parallel, parallel_secs) = timed_solve(&matrix, SolveConfig::with_workers(workers))?;
            let speedup = if parallel_secs > 0.0 { sequential_secs / parallel_secs } else { 0.0 };
            let record = ProfileRecord {
                n,
                workers,
                sequential_secs,
                parallel_secs,
                speedup,
                efficiency: speedup / workers as f64,
                mismatch: parallel != sequential,
            };
            info!(
                "n={n} workers={workers} speedup={:.2} efficiency={:.2}",
                record.speedup, record.efficiency
            );
            records.push(record);
        }
    }
    Ok(records)
}

fn timed_solve(matrix: &DistanceMatrix, config: SolveConfig) -> Result<(GlobalBest, f64)> {
    let started = Instant::now();
    let best = solve(matrix, &config)
        .with_context(|| format!("solving n={} with {} workers", matrix.size(), config.workers))?;
    Ok((best, started.elapsed().as_secs_f64()))
}
