// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Travelling-salesman routing: visit every city exactly once, starting and
//! ending at city 0, minimizing the total travelled distance.

use crate::{error::ModelError, index::CityIndex, matrix::Matrix};
use bramble_core::num::SolverNumeric;
use serde::{Deserialize, Serialize};

/// A square distance matrix with at least one city. Off-diagonal distances
/// are non-negative; the diagonal is only read for the single-city tour.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTspProblem<T>", into = "RawTspProblem<T>")]
#[serde(bound(
    serialize = "T: SolverNumeric + Serialize",
    deserialize = "T: SolverNumeric + Deserialize<'de>"
))]
pub struct TspProblem<T> {
    distances: Matrix<T>,
    min_edge: T,
}

impl<T> TspProblem<T>
where
    T: SolverNumeric,
{
    pub fn new(distances: Matrix<T>) -> Result<Self, ModelError> {
        if !distances.is_square() {
            return Err(ModelError::NotSquare {
                what: "distance matrix",
                rows: distances.num_rows(),
                cols: distances.num_cols(),
            });
        }
        let n = distances.num_rows();
        if n == 0 {
            return Err(ModelError::NoCities);
        }

        let mut min_edge: Option<T> = None;
        for from in 0..n {
            for to in 0..n {
                if from == to {
                    continue;
                }
                let d = distances.get(from, to);
                if d < T::zero() {
                    return Err(ModelError::NegativeDistance { from, to });
                }
                min_edge = Some(min_edge.map_or(d, |m| m.min(d)));
            }
        }

        Ok(Self {
            distances,
            min_edge: min_edge.unwrap_or_else(T::zero),
        })
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ModelError> {
        Self::new(Matrix::from_rows(rows)?)
    }

    #[inline]
    pub fn num_cities(&self) -> usize {
        self.distances.num_rows()
    }

    /// The fixed start and end city of every tour.
    #[inline]
    pub fn start_city(&self) -> CityIndex {
        CityIndex::new(0)
    }

    #[inline]
    pub fn distance(&self, from: CityIndex, to: CityIndex) -> T {
        self.distances.get(from.get(), to.get())
    }

    /// The smallest distance between two distinct cities, or zero for a
    /// single-city instance.
    #[inline]
    pub fn min_edge(&self) -> T {
        self.min_edge
    }

    #[inline]
    pub fn distances(&self) -> &Matrix<T> {
        &self.distances
    }

    /// The cost of a closed tour given as a sequence of cities, start
    /// repeated at the end.
    pub fn tour_cost(&self, tour: &[CityIndex]) -> T {
        tour.windows(2).fold(T::zero(), |acc, w| {
            acc.saturating_add(self.distance(w[0], w[1]))
        })
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawTspProblem<T> {
    distances: Vec<Vec<T>>,
}

impl<T> TryFrom<RawTspProblem<T>> for TspProblem<T>
where
    T: SolverNumeric,
{
    type Error = ModelError;

    fn try_from(raw: RawTspProblem<T>) -> Result<Self, Self::Error> {
        Self::from_rows(raw.distances)
    }
}

impl<T> From<TspProblem<T>> for RawTspProblem<T>
where
    T: Clone,
{
    fn from(problem: TspProblem<T>) -> Self {
        Self {
            distances: problem.distances.into(),
        }
    }
}
