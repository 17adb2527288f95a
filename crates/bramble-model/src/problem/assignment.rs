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

//! One-to-one assignment: give every row exactly one column, using every
//! column exactly once, maximizing the summed profit.

use crate::{
    error::ModelError,
    index::{ColumnIndex, RowIndex},
    matrix::Matrix,
};
use serde::{Deserialize, Serialize};

/// A square profit matrix. `profit(r, c)` is the payoff of giving column `c`
/// to row `r`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignmentProblem<T>", into = "RawAssignmentProblem<T>")]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Copy + Deserialize<'de>"
))]
pub struct AssignmentProblem<T> {
    profits: Matrix<T>,
}

impl<T> AssignmentProblem<T>
where
    T: Copy,
{
    /// Creates an instance from a square profit matrix.
    pub fn new(profits: Matrix<T>) -> Result<Self, ModelError> {
        if !profits.is_square() {
            return Err(ModelError::NotSquare {
                what: "profit matrix",
                rows: profits.num_rows(),
                cols: profits.num_cols(),
            });
        }
        Ok(Self { profits })
    }

    /// Creates an instance from nested rows.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ModelError> {
        Self::new(Matrix::from_rows(rows)?)
    }

    /// The number of rows, which equals the number of columns.
    #[inline]
    pub fn size(&self) -> usize {
        self.profits.num_rows()
    }

    #[inline]
    pub fn profit(&self, row: RowIndex, column: ColumnIndex) -> T {
        self.profits.get(row.get(), column.get())
    }

    #[inline]
    pub fn profits(&self) -> &Matrix<T> {
        &self.profits
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawAssignmentProblem<T> {
    profits: Vec<Vec<T>>,
}

impl<T> TryFrom<RawAssignmentProblem<T>> for AssignmentProblem<T>
where
    T: Copy,
{
    type Error = ModelError;

    fn try_from(raw: RawAssignmentProblem<T>) -> Result<Self, Self::Error> {
        Self::from_rows(raw.profits)
    }
}

impl<T> From<AssignmentProblem<T>> for RawAssignmentProblem<T>
where
    T: Clone,
{
    fn from(problem: AssignmentProblem<T>) -> Self {
        Self {
            profits: problem.profits.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_matrix_is_accepted() {
        let p = AssignmentProblem::from_rows(vec![vec![1i64, 2], vec![3, 4]]).unwrap();
        assert_eq!(p.size(), 2);
        assert_eq!(p.profit(RowIndex::new(1), ColumnIndex::new(0)), 3);
    }

    #[test]
    fn test_non_square_matrix_is_rejected() {
        let err = AssignmentProblem::from_rows(vec![vec![1i64, 2, 3], vec![4, 5, 6]]).unwrap_err();
        assert_eq!(
            err,
            ModelError::NotSquare {
                what: "profit matrix",
                rows: 2,
                cols: 3
            }
        );
    }

    #[test]
    fn test_empty_instance_is_valid() {
        let p = AssignmentProblem::<i64>::from_rows(Vec::new()).unwrap();
        assert_eq!(p.size(), 0);
    }

    #[test]
    fn test_deserialize_validates() {
        let p: AssignmentProblem<i64> = toml::from_str("profits = [[5, 1], [2, 7]]").unwrap();
        assert_eq!(p.profit(RowIndex::new(1), ColumnIndex::new(1)), 7);
        assert!(toml::from_str::<AssignmentProblem<i64>>("profits = [[5, 1]]").is_err());
    }
}
