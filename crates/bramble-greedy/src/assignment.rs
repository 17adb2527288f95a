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

//! Row-by-row assignment: each row takes the most profitable column that is
//! still free, the lowest column index winning ties.

use crate::{heuristic::GreedyHeuristic, outcome::GreedyOutcome};
use bramble_core::num::SolverNumeric;
use bramble_model::{
    index::{ColumnIndex, RowIndex},
    problem::AssignmentProblem,
    solution::AssignmentSolution,
};
use fixedbitset::FixedBitSet;
use std::marker::PhantomData;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct BestColumnGreedy<T> {
    used: FixedBitSet,
    _phantom: PhantomData<T>,
}

impl<T> BestColumnGreedy<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            used: FixedBitSet::new(),
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn preallocated(num_columns: usize) -> Self {
        Self {
            used: FixedBitSet::with_capacity(num_columns),
            _phantom: PhantomData,
        }
    }
}

impl<T> GreedyHeuristic<T> for BestColumnGreedy<T>
where
    T: SolverNumeric,
{
    type Problem = AssignmentProblem<T>;
    type Solution = AssignmentSolution<T>;

    fn name(&self) -> &str {
        "BestColumnGreedy"
    }

    fn construct(&mut self, problem: &Self::Problem) -> GreedyOutcome<Self::Solution> {
        let n = problem.size();
        self.used.clear();
        self.used.grow(n);

        let mut columns = Vec::with_capacity(n);
        let mut profit = T::zero();
        for row in RowIndex::range(n) {
            let mut best: Option<(ColumnIndex, T)> = None;
            for column in ColumnIndex::range(n) {
                if self.used.contains(column.get()) {
                    continue;
                }
                let p = problem.profit(row, column);
                if best.map_or(true, |(_, b)| p > b) {
                    best = Some((column, p));
                }
            }
            // A square matrix always leaves a free column for every row.
            let Some((column, p)) = best else {
                return GreedyOutcome::infeasible(columns.len());
            };
            self.used.insert(column.get());
            columns.push(column);
            profit = profit.saturating_add(p);
        }

        debug!(heuristic = "BestColumnGreedy", profit = %profit, "construction finished");
        GreedyOutcome::feasible(AssignmentSolution::new(columns, profit), n)
    }
}
