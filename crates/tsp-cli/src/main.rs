mod logging;
mod options;
mod profile;
mod report;

use std::fs;
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use log::info;
use tsp_brute_force::solve_with_report;
use tsp_core::DistanceMatrix;

use options::{InputSource, Invocation, ProfileOptions, SolverOptions};

fn main() -> ExitCode {
    let invocation = match options::parse_args(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => err.exit(),
    };

    let outcome = match invocation {
        Invocation::MissingSize => {
            eprintln!("{}", options::cli().render_usage());
            return ExitCode::from(1);
        }
        Invocation::Solve(options) => run_solve(options),
        Invocation::Profile(options) => run_profile(options),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_solve(options: SolverOptions) -> Result<()> {
    logging::init_logger(&options.log)?;
    let matrix = load_matrix(&options)?;
    if options.input == InputSource::Stdin {
        print!("{matrix}");
    }
    info!(
        "solving n={} with {} workers x {} threads",
        matrix.size(),
        options.solve.workers,
        options.solve.threads_per_worker
    );

    let started = Instant::now();
    let report = solve_with_report(&matrix, &options.solve).context("search failed")?;
    let elapsed = started.elapsed();

    if options.json {
        println!("{}", report::render_json(&report, elapsed)?);
    } else {
        print!("{}", report::render_text(&report, elapsed));
    }
    Ok(())
}

fn load_matrix(options: &SolverOptions) -> Result<DistanceMatrix> {
    match (&options.input, options.size) {
        (InputSource::JsonFile(path), size) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading matrix file {}", path.display()))?;
            let matrix = DistanceMatrix::from_json(&json)
                .with_context(|| format!("parsing matrix file {}", path.display()))?;
            if let Some(size) = size {
                if size != matrix.size() {
                    bail!(
                        "size argument {size} does not match the {0}x{0} matrix in {1}",
                        matrix.size(),
                        path.display()
                    );
                }
            }
            Ok(matrix)
        }
        (InputSource::Stdin, Some(size)) => {
            DistanceMatrix::read_from(size, io::stdin().lock()).context("reading matrix from stdin")
        }
        (InputSource::Random { seed, max_distance }, Some(size)) => {
            DistanceMatrix::random(size, *max_distance, *seed)
                .with_context(|| format!("generating a graph of {size} vertices"))
        }
        (_, None) => bail!("vertex count is required"),
    }
}

fn run_profile(options: ProfileOptions) -> Result<()> {
    logging::init_logger(&options.log)?;
    let records = profile::run_profile(&options)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
