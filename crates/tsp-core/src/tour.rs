use std::fmt;

use serde::{Deserialize, Serialize};

use crate::distance::Distance;
use crate::error::{try_filled_vec, Result};

/// Closed tour: vertex 0, a permutation of the other vertices, vertex 0.
///
/// A single-vertex instance has the one-element tour `[0]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// `[0, 1, ..., n - 1, 0]`, the starting buffer of the enumeration.
    pub fn identity(size: usize) -> Result<Self> {
        let mut vertices = try_filled_vec(size + 1, 0, "path buffer")?;
        for (slot, vertex) in vertices.iter_mut().zip(0..size) {
            *slot = vertex;
        }
        Ok(Self(vertices))
    }

    pub fn trivial() -> Self {
        Self(vec![0])
    }

    pub fn from_vertices(vertices: Vec<usize>) -> Self {
        Self(vertices)
    }

    pub fn vertices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vertices(self) -> Vec<usize> {
        self.0
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut vertices = self.0.iter();
        if let Some(first) = vertices.next() {
            write!(f, "{first}")?;
        }
        for vertex in vertices {
            write!(f, " {vertex}")?;
        }
        Ok(())
    }
}

/// Best tour seen so far. Serves as a worker's local best and as the global
/// best after reduction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTour {
    pub distance: Distance,
    pub tour: Tour,
}

pub type LocalBest = BestTour;
pub type GlobalBest = BestTour;

impl BestTour {
    /// An `INF` best with a zeroed `size + 1` path slot to copy improvements
    /// into.
    pub fn empty(size: usize) -> Result<Self> {
        Ok(Self {
            distance: Distance::INF,
            tour: Tour(try_filled_vec(size + 1, 0, "best path")?),
        })
    }

    pub fn trivial() -> Self {
        Self { distance: Distance::ZERO, tour: Tour::trivial() }
    }

    pub fn is_feasible(&self) -> bool {
        !self.distance.is_infinite()
    }

    /// Records `path` if `distance` is strictly smaller than the current best.
    /// Ties keep the earlier tour.
    #[inline]
    pub fn offer(&mut self, distance: Distance, path: &[usize]) -> bool {
        if distance < self.distance {
            self.distance = distance;
            self.tour.0.copy_from_slice(path);
            true
        } else {
            false
        }
    }

    /// Records `path` unconditionally, for instances with a single tour.
    pub fn record(&mut self, distance: Distance, path: &[usize]) {
        self.distance = distance;
        self.tour.0.copy_from_slice(path);
    }

    /// Replaces `self` with `other` if `other` is strictly better.
    pub fn merge(&mut self, other: BestTour) -> bool {
        if other.distance < self.distance {
            *self = other;
            true
        } else {
            false
        }
    }
}
