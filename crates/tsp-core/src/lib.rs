//! Shared types for the exact directed TSP: the distance matrix with its
//! no-edge sentinel, tour costs, closed tours and best-tour accumulators.

mod distance;
mod error;
mod matrix;
mod tour;

pub use distance::Distance;
pub use error::{try_filled_vec, Error, Result};
pub use matrix::{DistanceMatrix, Weight, INF, MAX_DISTANCE};
pub use tour::{BestTour, GlobalBest, LocalBest, Tour};
