use std::ffi::OsString;
use std::path::PathBuf;

use clap::{arg, value_parser, ArgMatches, Command};
use log::LevelFilter;
use tsp_brute_force::SolveConfig;
use tsp_core::Weight;

pub fn cli() -> Command {
    Command::new("tsp-brute")
        .about("Exact minimum-cost closed tour over a directed graph by exhaustive search")
        .arg(arg!([N] "Number of vertices").value_parser(value_parser!(usize)))
        .arg(
            arg!(--workers <W> "Number of workers sharing the search [default: available cores]")
                .env("TSP_WORKERS")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(--threads <T> "Threads each worker fans its first moves out over")
                .env("TSP_THREADS")
                .default_value("1")
                .value_parser(value_parser!(usize)),
        )
        .arg(random_seed_arg())
        .arg(max_distance_arg())
        .arg(
            arg!(--stdin "Read the n x n matrix from stdin and echo it before solving")
                .conflicts_with("matrix"),
        )
        .arg(
            arg!(--matrix <PATH> "Read the matrix from a JSON file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(arg!(--json "Print the result as JSON"))
        .arg(
            arg!(--"log-level" <LEVEL> "Log level: off, error, warn, info, debug, trace")
                .global(true)
                .default_value("warn")
                .value_parser(value_parser!(LevelFilter)),
        )
        .arg(
            arg!(--"log-format" <FORMAT> "Log line format")
                .global(true)
                .default_value("compact")
                .value_parser(["compact", "pretty"]),
        )
        .arg(arg!(--"log-timestamp" "Prefix log lines with a millisecond timestamp").global(true))
        .subcommand(
            Command::new("profile")
                .about("Time sequential against parallel solves over a range of sizes")
                .arg(
                    arg!(--"min-n" <N> "Smallest instance size")
                        .default_value("2")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    arg!(--"max-n" <N> "Largest instance size")
                        .default_value("13")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    arg!(--"workers-from" <W> "Smallest parallel worker count")
                        .default_value("2")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    arg!(--"workers-to" <W> "Largest parallel worker count")
                        .default_value("4")
                        .value_parser(value_parser!(usize)),
                )
                .arg(random_seed_arg())
                .arg(max_distance_arg()),
        )
}

fn random_seed_arg() -> clap::Arg {
    arg!(--seed <SEED> "Seed of the random graph")
        .default_value("42")
        .value_parser(value_parser!(u64))
}

fn max_distance_arg() -> clap::Arg {
    arg!(--"max-distance" <M> "Largest random edge weight")
        .default_value("100")
        .value_parser(value_parser!(Weight))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value {
            "pretty" => Self::Pretty,
            _ => Self::Compact,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LogOptions {
    pub level: LevelFilter,
    pub format: LogFormat,
    pub timestamp: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputSource {
    Random { seed: u64, max_distance: Weight },
    Stdin,
    JsonFile(PathBuf),
}

#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Vertex count; taken from the file when reading JSON.
    pub size: Option<usize>,
    pub input: InputSource,
    pub solve: SolveConfig,
    pub json: bool,
    pub log: LogOptions,
}

#[derive(Clone, Debug)]
pub struct ProfileOptions {
    pub min_n: usize,
    pub max_n: usize,
    pub workers_from: usize,
    pub workers_to: usize,
    pub seed: u64,
    pub max_distance: Weight,
    pub log: LogOptions,
}

#[derive(Clone, Debug)]
pub enum Invocation {
    Solve(SolverOptions),
    Profile(ProfileOptions),
    /// No vertex count and nothing to take it from.
    MissingSize,
}

pub fn parse_args<I, T>(args: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = cli().try_get_matches_from(args)?;
    let log = log_options(&matches);

    if let Some(profile) = matches.subcommand_matches("profile") {
        return Ok(Invocation::Profile(ProfileOptions {
            min_n: required(profile, "min-n"),
            max_n: required(profile, "max-n"),
            workers_from: required(profile, "workers-from"),
            workers_to: required(profile, "workers-to"),
            seed: required(profile, "seed"),
            max_distance: required(profile, "max-distance"),
            log,
        }));
    }

    let input = if let Some(path) = matches.get_one::<PathBuf>("matrix") {
        InputSource::JsonFile(path.clone())
    } else if matches.get_flag("stdin") {
        InputSource::Stdin
    } else {
        InputSource::Random {
            seed: required(&matches, "seed"),
            max_distance: required(&matches, "max-distance"),
        }
    };
    let size = matches.get_one::<usize>("N").copied();
    if size.is_none() && !matches!(input, InputSource::JsonFile(_)) {
        return Ok(Invocation::MissingSize);
    }

    let workers = matches
        .get_one::<usize>("workers")
        .copied()
        .unwrap_or_else(default_workers);
    let solve = SolveConfig::with_workers(workers).threads_per_worker(required(&matches, "threads"));

    Ok(Invocation::Solve(SolverOptions {
        size,
        input,
        solve,
        json: matches.get_flag("json"),
        log,
    }))
}

fn log_options(matches: &ArgMatches) -> LogOptions {
    LogOptions {
        level: required(matches, "log-level"),
        format: LogFormat::parse(
            matches
                .get_one::<String>("log-format")
                .map(String::as_str)
                .unwrap_or("compact"),
        ),
        timestamp: matches.get_flag("log-timestamp"),
    }
}

/// Reads an argument that has a default value, so clap always fills it.
fn required<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> T {
    matches
        .get_one::<T>(id)
        .cloned()
        .unwrap_or_else(|| unreachable!("argument {id} has a default value"))
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}
