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

//! Validation errors raised while constructing problem instances.
//!
//! Every variant corresponds to malformed input that is rejected before any
//! search starts. An instance that is well formed but has no valid solution
//! is not an error; solvers report it as `SolverResult::Infeasible`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A table row does not have as many entries as the first row.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A flat buffer does not match the declared table shape.
    #[error("table of shape {rows}x{cols} needs {expected} entries, found {found}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
    /// A matrix that must be square is not.
    #[error("{what} must be square, got {rows}x{cols}")]
    NotSquare {
        what: &'static str,
        rows: usize,
        cols: usize,
    },
    /// Two parallel arrays have different lengths.
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("knapsack capacity must be non-negative")]
    NegativeCapacity,
    #[error("weight of item {item} must be positive")]
    NonPositiveWeight { item: usize },
    #[error("value of item {item} must be non-negative")]
    NegativeValue { item: usize },
    #[error("distance from city {from} to city {to} must be non-negative")]
    NegativeDistance { from: usize, to: usize },
    #[error("a routing instance needs at least one city")]
    NoCities,
    #[error("total units to distribute must be non-negative")]
    NegativeBudget,
    #[error("gain table must contain at least the zero-units row")]
    EmptyGainTable,
    #[error("cannot distribute {units} units over zero columns")]
    EmptyWithDemand { units: usize },
}
