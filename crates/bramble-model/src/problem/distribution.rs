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

//! Single-resource distribution: split a budget of identical units across
//! columns, maximizing the summed gain, spending the budget exactly.

use crate::{error::ModelError, index::ColumnIndex, matrix::Matrix};
use bramble_core::num::SolverNumeric;
use serde::{Deserialize, Serialize};

/// A gain table with `max_units + 1` rows and one column per recipient.
/// `gain(u, j)` is the payoff of giving `u` units to column `j`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawDistributionProblem<T>",
    into = "RawDistributionProblem<T>"
)]
#[serde(bound(
    serialize = "T: SolverNumeric + Serialize",
    deserialize = "T: SolverNumeric + Deserialize<'de>"
))]
pub struct DistributionProblem<T> {
    gains: Matrix<T>,
    total_units: usize,
}

impl<T> DistributionProblem<T>
where
    T: SolverNumeric,
{
    pub fn new(gains: Matrix<T>, total_units: usize) -> Result<Self, ModelError> {
        if gains.num_rows() == 0 {
            return Err(ModelError::EmptyGainTable);
        }
        if gains.num_cols() == 0 && total_units > 0 {
            return Err(ModelError::EmptyWithDemand { units: total_units });
        }
        Ok(Self { gains, total_units })
    }

    pub fn from_rows(rows: Vec<Vec<T>>, total_units: usize) -> Result<Self, ModelError> {
        Self::new(Matrix::from_rows(rows)?, total_units)
    }

    /// Creates an instance from a signed budget as it appears in external
    /// input, rejecting negative values.
    pub fn with_signed_budget(gains: Matrix<T>, total_units: i64) -> Result<Self, ModelError> {
        let units = usize::try_from(total_units).map_err(|_| ModelError::NegativeBudget)?;
        Self::new(gains, units)
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.gains.num_cols()
    }

    /// The largest number of units a single column may receive.
    #[inline]
    pub fn max_units(&self) -> usize {
        self.gains.num_rows() - 1
    }

    #[inline]
    pub fn total_units(&self) -> usize {
        self.total_units
    }

    #[inline]
    pub fn gain(&self, units: usize, column: ColumnIndex) -> T {
        self.gains.get(units, column.get())
    }

    /// The best gain a column can reach on its own, ignoring the shared budget.
    #[inline]
    pub fn column_max(&self, column: ColumnIndex) -> T {
        self.gains
            .column(column.get())
            .fold(T::min_value(), |best, g| best.max(g))
    }

    #[inline]
    pub fn gains(&self) -> &Matrix<T> {
        &self.gains
    }

    /// Whether the budget can be spent at all given the per-column maximum.
    #[inline]
    pub fn is_budget_reachable(&self) -> bool {
        self.total_units <= self.num_columns().saturating_mul(self.max_units())
    }

    /// The total gain of a distribution given as units per column.
    pub fn distribution_gain(&self, units: &[usize]) -> T {
        units.iter().enumerate().fold(T::zero(), |acc, (j, &u)| {
            acc.saturating_add(self.gain(u, ColumnIndex::new(j)))
        })
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawDistributionProblem<T> {
    gains: Vec<Vec<T>>,
    total_units: i64,
}

impl<T> TryFrom<RawDistributionProblem<T>> for DistributionProblem<T>
where
    T: SolverNumeric,
{
    type Error = ModelError;

    fn try_from(raw: RawDistributionProblem<T>) -> Result<Self, Self::Error> {
        Self::with_signed_budget(Matrix::from_rows(raw.gains)?, raw.total_units)
    }
}

impl<T> From<DistributionProblem<T>> for RawDistributionProblem<T>
where
    T: Clone,
{
    fn from(problem: DistributionProblem<T>) -> Self {
        Self {
            gains: problem.gains.into(),
            total_units: i64::try_from(problem.total_units).unwrap_or(i64::MAX),
        }
    }
}
