use std::panic;
use std::thread;

use log::trace;
use tsp_core::{BestTour, DistanceMatrix, Result, Tour};

use crate::partition::WorkerRange;
use crate::reduce::GlobalReducer;

/// Exhaustive enumeration of tours with a fixed vertex at position 1.
///
/// Positions 0 and `n` of the path buffer always hold vertex 0. The
/// remaining positions are permuted in place by swap, recurse, swap back,
/// so every sibling branch starts from the same buffer.
pub struct PermutationSearch<'a> {
    matrix: &'a DistanceMatrix,
    size: usize,
    path: Vec<usize>,
    best: BestTour,
}

impl<'a> PermutationSearch<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Result<Self> {
        let size = matrix.size();
        Ok(Self {
            matrix,
            size,
            path: Tour::identity(size)?.into_vertices(),
            best: BestTour::empty(size)?,
        })
    }

    /// Enumerates every tour whose first move is `0 -> vertex`.
    pub fn search_first_move(&mut self, vertex: usize) {
        debug_assert!((1..self.size).contains(&vertex));
        self.path.swap(1, vertex);
        if self.size > 2 {
            self.permute(2);
        } else {
            // The only tour is [0, 1, 0]; report it even when infeasible.
            let distance = self.matrix.path_distance(&self.path);
            self.best.record(distance, &self.path);
        }
        self.path.swap(1, vertex);
    }

    pub fn search_range(&mut self, range: WorkerRange) {
        for vertex in range.vertices() {
            self.search_first_move(vertex);
        }
    }

    pub fn best(&self) -> &BestTour {
        &self.best
    }

    pub fn into_best(self) -> BestTour {
        self.best
    }

    fn permute(&mut self, start: usize) {
        let end = self.size - 1;
        if start == end {
            self.evaluate();
            return;
        }
        for i in start..=end {
            self.path.swap(start, i);
            self.permute(start + 1);
            self.path.swap(start, i);
        }
    }

    #[inline]
    fn evaluate(&mut self) {
        let distance = self.matrix.path_distance(&self.path);
        if self.best.offer(distance, &self.path) {
            trace!("local best improved to {distance} via {:?}", self.path);
        }
    }
}

/// Searches every first move in `range`, optionally spreading the first
/// moves over `threads` scoped threads.
///
/// Each first move is searched with its own buffer and best; the per-move
/// bests are folded in ascending vertex order, which reproduces the result
/// of a single sequential scan.
pub fn search_worker(
    matrix: &DistanceMatrix,
    range: WorkerRange,
    threads: usize,
) -> Result<BestTour> {
    let threads = threads.clamp(1, range.len().max(1));
    if threads == 1 {
        let mut search = PermutationSearch::new(matrix)?;
        search.search_range(range);
        return Ok(search.into_best());
    }

    let branches: Vec<usize> = range.vertices().collect();
    let per_thread: Vec<Result<Vec<(usize, BestTour)>>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..threads)
            .map(|offset| {
                let branches = &branches;
                scope.spawn(move || {
                    branches
                        .iter()
                        .skip(offset)
                        .step_by(threads)
                        .map(|&vertex| -> Result<(usize, BestTour)> {
                            let mut search = PermutationSearch::new(matrix)?;
                            search.search_first_move(vertex);
                            Ok((vertex, search.into_best()))
                        })
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .collect()
    });

    let mut branch_bests = Vec::with_capacity(branches.len());
    for bests in per_thread {
        branch_bests.extend(bests?);
    }
    branch_bests.sort_by_key(|&(vertex, _)| vertex);

    let mut reducer = GlobalReducer::new();
    for (_, best) in branch_bests {
        reducer.fold(best);
    }
    match reducer.finish() {
        Some(best) => Ok(best),
        None => BestTour::empty(matrix.size()),
    }
}
