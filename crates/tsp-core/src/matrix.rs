use std::fmt;
use std::io::Read;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};

use crate::distance::Distance;
use crate::error::{try_filled_vec, Error, Result};

/// Edge weight as stored in the matrix.
pub type Weight = i32;

/// Sentinel weight meaning "no edge".
pub const INF: Weight = Weight::MAX;

/// Upper bound of randomly generated weights.
pub const MAX_DISTANCE: Weight = 100;

/// Square matrix of directed edge weights, flattened row-major.
///
/// The diagonal is 0 and off-diagonal entries are either a weight or
/// [`INF`]. The matrix is not required to be symmetric. Externally supplied
/// data is not validated beyond its shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MatrixFile", into = "MatrixFile")]
pub struct DistanceMatrix {
    size: usize,
    weights: Vec<Weight>,
}

impl DistanceMatrix {
    pub fn from_weights(size: usize, weights: Vec<Weight>) -> Result<Self> {
        let cells = cell_count(size)?;
        if weights.len() != cells {
            return Err(Error::invalid_input(format!(
                "expected {cells} weights for a {size}x{size} matrix, got {}",
                weights.len()
            )));
        }
        Ok(Self { size, weights })
    }

    pub fn from_rows(rows: Vec<Vec<Weight>>) -> Result<Self> {
        let size = rows.len();
        let mut weights = try_filled_vec(cell_count(size)?, 0, "distance matrix")?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(Error::invalid_input(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            weights[i * size..(i + 1) * size].copy_from_slice(row);
        }
        Ok(Self { size, weights })
    }

    /// Samples every off-diagonal weight uniformly from `0..=max_distance`
    /// with a seeded generator; a sampled 0 becomes [`INF`].
    pub fn random(size: usize, max_distance: Weight, seed: u64) -> Result<Self> {
        if max_distance < 1 {
            return Err(Error::invalid_input(format!(
                "max distance must be at least 1, got {max_distance}"
            )));
        }
        let mut weights = try_filled_vec(cell_count(size)?, 0, "distance matrix")?;
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    let sampled = rng.gen_range(0..=max_distance);
                    weights[i * size + j] = if sampled == 0 { INF } else { sampled };
                }
            }
        }
        Ok(Self { size, weights })
    }

    /// Parses `size * size` whitespace-separated integers in row-major order.
    /// The token `INF` is accepted as the sentinel. Tokens past the matrix
    /// are ignored.
    pub fn from_text(size: usize, text: &str) -> Result<Self> {
        let cells = cell_count(size)?;
        let mut weights = try_filled_vec(cells, 0, "distance matrix")?;
        let mut tokens = text.split_whitespace();
        for (cell, slot) in weights.iter_mut().enumerate() {
            let token = tokens.next().ok_or_else(|| {
                Error::invalid_input(format!(
                    "matrix input ended after {cell} of {cells} values"
                ))
            })?;
            *slot = parse_weight(token).ok_or_else(|| {
                Error::invalid_input(format!(
                    "value {cell} (row {}, column {}) is not an integer: {token:?}",
                    cell / size,
                    cell % size
                ))
            })?;
        }
        Ok(Self { size, weights })
    }

    pub fn read_from<R: Read>(size: usize, mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_text(size, &text)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn weight(&self, from: usize, to: usize) -> Weight {
        self.weights[from * self.size + to]
    }

    #[inline]
    pub fn is_edge(&self, from: usize, to: usize) -> bool {
        self.weight(from, to) != INF
    }

    pub fn row(&self, from: usize) -> &[Weight] {
        &self.weights[from * self.size..(from + 1) * self.size]
    }

    /// Sums the weights along consecutive entries of `path`, stopping at the
    /// first missing edge.
    pub fn path_distance(&self, path: &[usize]) -> Distance {
        let mut total: i64 = 0;
        for leg in path.windows(2) {
            let weight = self.weight(leg[0], leg[1]);
            if weight == INF {
                return Distance::INF;
            }
            total += i64::from(weight);
        }
        Distance::finite(total)
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            for &weight in self.row(i) {
                if weight == INF {
                    write!(f, "INF ")?;
                } else {
                    write!(f, "{weight} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn cell_count(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(Error::invalid_input("matrix size must be at least 1"));
    }
    size.checked_mul(size)
        .ok_or_else(|| Error::invalid_input(format!("matrix size {size} is too large")))
}

fn parse_weight(token: &str) -> Option<Weight> {
    if token.eq_ignore_ascii_case("inf") {
        return Some(INF);
    }
    token.parse().ok()
}

/// On-disk form: rows of weights, `null` for a missing edge.
#[derive(Serialize, Deserialize)]
struct MatrixFile {
    size: usize,
    weights: Vec<Vec<Option<Weight>>>,
}

impl TryFrom<MatrixFile> for DistanceMatrix {
    type Error = Error;

    fn try_from(file: MatrixFile) -> Result<Self> {
        if file.weights.len() != file.size {
            return Err(Error::invalid_input(format!(
                "matrix declares size {} but has {} rows",
                file.size,
                file.weights.len()
            )));
        }
        let rows = file
            .weights
            .into_iter()
            .map(|row| row.into_iter().map(|w| w.unwrap_or(INF)).collect())
            .collect();
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for MatrixFile {
    fn from(matrix: DistanceMatrix) -> Self {
        let weights = (0..matrix.size)
            .map(|i| {
                matrix
                    .row(i)
                    .iter()
                    .map(|&w| if w == INF { None } else { Some(w) })
                    .collect()
            })
            .collect();
        Self { size: matrix.size, weights }
    }
}
