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

//! Dense row-major tables.
//!
//! `Matrix<T>` is the objective table behind the assignment, routing and
//! distribution instances. It is immutable once built and stores its entries
//! in one contiguous buffer, so row access is a single slice.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<T>>", into = "Vec<Vec<T>>")]
#[serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Copy + Deserialize<'de>"
))]
pub struct Matrix<T> {
    num_rows: usize,
    num_cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: Copy,
{
    /// Builds a matrix from a flat row-major buffer.
    pub fn new(num_rows: usize, num_cols: usize, data: Vec<T>) -> Result<Self, ModelError> {
        let expected = num_rows.saturating_mul(num_cols);
        if data.len() != expected {
            return Err(ModelError::ShapeMismatch {
                rows: num_rows,
                cols: num_cols,
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            num_rows,
            num_cols,
            data,
        })
    }

    /// Builds a matrix from nested rows. Every row must have the length of
    /// the first one.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ModelError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(num_rows.saturating_mul(num_cols));
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != num_cols {
                return Err(ModelError::RaggedMatrix {
                    row,
                    expected: num_cols,
                    found: entries.len(),
                });
            }
            data.extend(entries);
        }
        Ok(Self {
            num_rows,
            num_cols,
            data,
        })
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        debug_assert!(
            row < self.num_rows && col < self.num_cols,
            "called `Matrix::get` with index ({}, {}) out of bounds for shape {}x{}",
            row,
            col,
            self.num_rows,
            self.num_cols
        );
        self.data[row * self.num_cols + col]
    }

    /// Returns the entries of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Iterates over the rows in order.
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.num_rows).map(move |r| self.row(r))
    }

    /// Iterates over the entries of one column, top to bottom.
    #[inline]
    pub fn column(&self, col: usize) -> impl Iterator<Item = T> + '_ {
        (0..self.num_rows).map(move |r| self.get(r, col))
    }

    /// Returns the row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Matrix<T>
where
    T: Copy,
{
    type Error = ModelError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl<T> From<Matrix<T>> for Vec<Vec<T>>
where
    T: Clone,
{
    fn from(matrix: Matrix<T>) -> Self {
        if matrix.num_cols == 0 {
            return vec![Vec::new(); matrix.num_rows];
        }
        matrix
            .data
            .chunks(matrix.num_cols)
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}

impl<T> std::fmt::Debug for Matrix<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("num_rows", &self.num_rows)
            .field("num_cols", &self.num_cols)
            .finish()
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: Copy + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for r in 0..self.num_rows {
            for c in 0..self.num_cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>6}", self.get(r, c))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
