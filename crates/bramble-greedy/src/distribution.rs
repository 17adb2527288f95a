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

//! Marginal-gain distribution.
//!
//! Units are handed out one at a time. Each unit goes to the column whose
//! gain increases the most by receiving it, even when that increase is
//! negative; columns already at the table's maximum allocation are not
//! eligible. The lowest column index wins ties.

use crate::{heuristic::GreedyHeuristic, outcome::GreedyOutcome};
use bramble_core::num::SolverNumeric;
use bramble_model::{
    index::ColumnIndex, problem::DistributionProblem, solution::DistributionSolution,
};
use std::marker::PhantomData;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct MarginalGainGreedy<T> {
    units: Vec<usize>,
    _phantom: PhantomData<T>,
}

impl<T> MarginalGainGreedy<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn preallocated(num_columns: usize) -> Self {
        Self {
            units: Vec::with_capacity(num_columns),
            _phantom: PhantomData,
        }
    }
}

impl<T> MarginalGainGreedy<T>
where
    T: SolverNumeric,
{
    /// The eligible column with the largest marginal gain for one more unit.
    fn best_column(&self, problem: &DistributionProblem<T>) -> Option<ColumnIndex> {
        let max_units = problem.max_units();
        let mut best: Option<(ColumnIndex, T)> = None;
        for (j, &u) in self.units.iter().enumerate() {
            if u >= max_units {
                continue;
            }
            let column = ColumnIndex::new(j);
            let marginal = problem.gain(u + 1, column).saturating_sub(problem.gain(u, column));
            if best.map_or(true, |(_, b)| marginal > b) {
                best = Some((column, marginal));
            }
        }
        best.map(|(column, _)| column)
    }
}

impl<T> GreedyHeuristic<T> for MarginalGainGreedy<T>
where
    T: SolverNumeric,
{
    type Problem = DistributionProblem<T>;
    type Solution = DistributionSolution<T>;

    fn name(&self) -> &str {
        "MarginalGainGreedy"
    }

    fn construct(&mut self, problem: &Self::Problem) -> GreedyOutcome<Self::Solution> {
        self.units.clear();
        self.units.resize(problem.num_columns(), 0);

        let total = problem.total_units();
        for step in 0..total {
            let Some(column) = self.best_column(problem) else {
                debug!(
                    heuristic = "MarginalGainGreedy",
                    placed = step,
                    total,
                    "budget cannot be placed"
                );
                return GreedyOutcome::infeasible(step);
            };
            self.units[column.get()] += 1;
        }

        let gain = problem.distribution_gain(&self.units);
        debug!(heuristic = "MarginalGainGreedy", gain = %gain, "construction finished");
        GreedyOutcome::feasible(DistributionSolution::new(self.units.clone(), gain), total)
    }
}
