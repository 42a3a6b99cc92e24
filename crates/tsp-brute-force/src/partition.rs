use std::fmt;
use std::ops::RangeInclusive;

/// Inclusive range of vertices a worker places at path position 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerRange {
    pub start: usize,
    pub end: usize,
}

impl WorkerRange {
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, vertex: usize) -> bool {
        (self.start..=self.end).contains(&vertex)
    }

    pub fn vertices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for WorkerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Position-1 vertices owned by `worker` out of `workers`, for an instance
/// of `size` vertices. `None` means the worker is idle and takes no part in
/// the search or the reduction.
///
/// Each worker gets `max(1, (size - 1) / workers)` consecutive vertices; the
/// last worker also absorbs the division remainder.
pub fn worker_range(size: usize, workers: usize, worker: usize) -> Option<WorkerRange> {
    if size < 2 || worker >= workers {
        return None;
    }
    let choices = size - 1;
    let base = (choices / workers).max(1);
    let start = 1 + worker * base;

    if worker == workers - 1 && choices >= workers {
        Some(WorkerRange { start, end: choices })
    } else if worker < choices {
        Some(WorkerRange { start, end: base * (worker + 1) })
    } else {
        None
    }
}

/// Ranges for every worker, in worker order. Lazy, so a huge worker count
/// costs nothing until iterated.
pub fn partition(
    size: usize,
    workers: usize,
) -> impl ExactSizeIterator<Item = Option<WorkerRange>> {
    (0..workers).map(move |worker| worker_range(size, workers, worker))
}

/// `(worker, range)` for the active workers only. Sized by the active
/// count, never by the requested worker count.
pub fn assignments(size: usize, workers: usize) -> Vec<(usize, WorkerRange)> {
    (0..active_workers(size, workers))
        .filter_map(|worker| worker_range(size, workers, worker).map(|range| (worker, range)))
        .collect()
}

/// Number of workers with a non-empty range. Active workers are always the
/// lowest-indexed ones.
pub fn active_workers(size: usize, workers: usize) -> usize {
    if size < 2 {
        0
    } else {
        workers.min(size - 1)
    }
}
