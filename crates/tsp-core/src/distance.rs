use std::fmt;

use serde::{Deserialize, Serialize};

/// Total cost of a tour, or [`Distance::INF`] when the tour uses a missing
/// edge or no tour was evaluated.
///
/// Ordering places `INF` above every finite distance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub struct Distance(i64);

impl Distance {
    pub const INF: Self = Self(i64::MAX);
    pub const ZERO: Self = Self(0);

    #[inline]
    pub fn finite(value: i64) -> Self {
        debug_assert!(value != i64::MAX);
        Self(value)
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        self == Self::INF
    }

    pub fn value(self) -> Option<i64> {
        if self.is_infinite() {
            None
        } else {
            Some(self.0)
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Self::INF
    }
}

impl From<Option<i64>> for Distance {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::INF, Self)
    }
}

impl From<Distance> for Option<i64> {
    fn from(distance: Distance) -> Self {
        distance.value()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "INF"),
        }
    }
}
