//! Exact brute-force solver for the directed TSP.
//!
//! Every tour starts and ends at vertex 0. The vertex visited second
//! ("first move") is what gets split across workers: each worker owns a
//! contiguous range of first moves, enumerates every ordering of the
//! remaining vertices for each of them, and reports one local best. The
//! coordinator folds the local bests in ascending worker order, so the
//! reported distance never depends on the worker count.

mod partition;
mod reduce;
mod search;
mod workers;

pub use partition::{active_workers, assignments, partition, worker_range, WorkerRange};
pub use reduce::GlobalReducer;
pub use search::{search_worker, PermutationSearch};
pub use workers::{solve, solve_with_report, SolveConfig, SolveReport, WorkerReport};
