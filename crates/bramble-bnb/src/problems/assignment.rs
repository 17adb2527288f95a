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

//! Assignment search
//!
//! Rows are decided in order; a decision picks one unused column for the
//! current row. The bound of a state is its profit plus, for every row still
//! open, the best profit among the columns that are still unused. Candidates
//! carry the bound of the child they lead to, which lets the engine visit the
//! most promising column first and drop all weaker siblings at once.

use crate::problem::{Candidate, ObjectiveSense, SearchMode, SearchProblem};
use bramble_core::num::SolverNumeric;
use bramble_model::{
    index::{ColumnIndex, RowIndex},
    problem::AssignmentProblem,
    solution::AssignmentSolution,
};
use fixedbitset::FixedBitSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState<T> {
    row: usize,
    columns: Vec<ColumnIndex>,
    used: FixedBitSet,
    profit: T,
}

impl<T: Copy> AssignmentState<T> {
    /// The next row to decide.
    #[inline]
    pub fn row(&self) -> RowIndex {
        RowIndex::new(self.row)
    }

    #[inline]
    pub fn columns(&self) -> &[ColumnIndex] {
        &self.columns
    }

    #[inline]
    pub fn profit(&self) -> T {
        self.profit
    }

    #[inline]
    pub fn is_column_used(&self, column: ColumnIndex) -> bool {
        self.used.contains(column.get())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentUndo<T> {
    column: ColumnIndex,
    previous_profit: T,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentSearch<'a, T> {
    problem: &'a AssignmentProblem<T>,
}

impl<'a, T> AssignmentSearch<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new(problem: &'a AssignmentProblem<T>) -> Self {
        Self { problem }
    }

    /// Sum over rows `from_row..n` of the best profit among unused columns,
    /// additionally treating `excluded` as used.
    fn remaining_bound(
        &self,
        state: &AssignmentState<T>,
        from_row: usize,
        excluded: Option<usize>,
    ) -> T {
        let n = self.problem.size();
        let profits = self.problem.profits();
        let mut total = T::zero();
        for r in from_row..n {
            let best = profits
                .row(r)
                .iter()
                .enumerate()
                .filter(|(c, _)| !state.used.contains(*c) && Some(*c) != excluded)
                .map(|(_, p)| *p)
                .max();
            if let Some(best) = best {
                total = total.saturating_add(best);
            }
        }
        total
    }
}

impl<'a, T> SearchProblem<T> for AssignmentSearch<'a, T>
where
    T: SolverNumeric,
{
    type State = AssignmentState<T>;
    type Decision = ColumnIndex;
    type Undo = AssignmentUndo<T>;
    type Solution = AssignmentSolution<T>;

    fn name(&self) -> &str {
        "assignment"
    }

    fn sense(&self) -> ObjectiveSense {
        ObjectiveSense::Maximize
    }

    fn initial_state(&self, _mode: SearchMode) -> Self::State {
        let n = self.problem.size();
        AssignmentState {
            row: 0,
            columns: Vec::with_capacity(n),
            used: FixedBitSet::with_capacity(n),
            profit: T::zero(),
        }
    }

    #[inline]
    fn is_leaf(&self, state: &Self::State) -> bool {
        state.row == self.problem.size()
    }

    #[inline]
    fn leaf_objective(&self, state: &Self::State) -> Option<T> {
        Some(state.profit)
    }

    fn bound(&self, state: &Self::State) -> Option<T> {
        Some(
            state
                .profit
                .saturating_add(self.remaining_bound(state, state.row, None)),
        )
    }

    fn branch(
        &self,
        state: &Self::State,
        mode: SearchMode,
        out: &mut Vec<Candidate<Self::Decision, T>>,
    ) {
        let row = RowIndex::new(state.row);
        for c in 0..self.problem.size() {
            if state.used.contains(c) {
                continue;
            }
            let column = ColumnIndex::new(c);
            let candidate = if mode.is_bounded() {
                let bound = state
                    .profit
                    .saturating_add(self.problem.profit(row, column))
                    .saturating_add(self.remaining_bound(state, state.row + 1, Some(c)));
                Candidate::with_bound(column, bound)
            } else {
                Candidate::new(column)
            };
            out.push(candidate);
        }
    }

    fn apply(&self, state: &mut Self::State, column: Self::Decision) -> Self::Undo {
        debug_assert!(
            !state.used.contains(column.get()),
            "called `AssignmentSearch::apply` with column {} already in use",
            column
        );
        let previous_profit = state.profit;
        let profit = self.problem.profit(RowIndex::new(state.row), column);
        state.used.insert(column.get());
        state.columns.push(column);
        state.profit = state.profit.saturating_add(profit);
        state.row += 1;
        AssignmentUndo {
            column,
            previous_profit,
        }
    }

    fn undo(&self, state: &mut Self::State, undo: Self::Undo) {
        state.row -= 1;
        state.columns.pop();
        state.used.set(undo.column.get(), false);
        state.profit = undo.previous_profit;
    }

    fn extract_solution(&self, state: &Self::State, objective: T) -> Self::Solution {
        AssignmentSolution::new(state.columns.clone(), objective)
    }

    fn max_depth(&self) -> usize {
        self.problem.size()
    }

    fn max_branching(&self) -> usize {
        self.problem.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::BnbSolver;
    use bramble_model::solution::SolutionRecord;

    fn demo() -> AssignmentProblem<i64> {
        AssignmentProblem::from_rows(vec![
            vec![50, 70, 30, 60],
            vec![80, 40, 90, 50],
            vec![60, 30, 70, 80],
            vec![70, 80, 60, 40],
        ])
        .unwrap()
    }

    fn cols(v: &[usize]) -> Vec<ColumnIndex> {
        v.iter().map(|&c| ColumnIndex::new(c)).collect()
    }

    #[test]
    fn test_root_bound_is_sum_of_row_maxima() {
        let p = demo();
        let search = AssignmentSearch::new(&p);
        let state = search.initial_state(SearchMode::Bounded);
        assert_eq!(search.bound(&state), Some(70 + 90 + 80 + 80));
    }

    #[test]
    fn test_candidate_bounds_exclude_the_chosen_column() {
        let p = demo();
        let search = AssignmentSearch::new(&p);
        let state = search.initial_state(SearchMode::Bounded);
        let mut out = Vec::new();
        search.branch(&state, SearchMode::Bounded, &mut out);
        let bounds: Vec<i64> = out.iter().map(|c| c.bound.unwrap()).collect();
        // Column 1 for row 0: 70 + 90 + 80 + max(70, 60, 40) = 310.
        assert_eq!(bounds, vec![50 + 90 + 80 + 80, 310, 30 + 80 + 80 + 80, 60 + 90 + 70 + 80]);

        out.clear();
        search.branch(&state, SearchMode::Exhaustive, &mut out);
        assert!(out.iter().all(|c| c.bound.is_none()));
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_apply_undo_restores_state() {
        let p = demo();
        let search = AssignmentSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Bounded);
        let before = state.clone();
        let u1 = search.apply(&mut state, ColumnIndex::new(2));
        let u2 = search.apply(&mut state, ColumnIndex::new(0));
        assert_eq!(state.profit(), 30 + 80);
        assert!(state.is_column_used(ColumnIndex::new(2)));
        assert_eq!(state.row(), RowIndex::new(2));
        search.undo(&mut state, u2);
        search.undo(&mut state, u1);
        assert_eq!(state, before);
    }

    #[test]
    fn test_exhaustive_and_bounded_agree_on_demo() {
        let p = demo();
        let search = AssignmentSearch::new(&p);
        let mut solver = BnbSolver::new();

        let ex = solver.solve(&search, SearchMode::Exhaustive);
        let bb = solver.solve(&search, SearchMode::Bounded);

        let ex_sol = ex.solution().unwrap();
        let bb_sol = bb.solution().unwrap();
        assert_eq!(ex_sol.objective_value(), 310);
        assert_eq!(bb_sol.objective_value(), 310);
        assert_eq!(bb_sol.columns(), cols(&[1, 2, 3, 0]).as_slice());
        assert!(bb_sol.is_permutation());
        assert_eq!(ex.feasible_count(), 24);
        assert_eq!(bb.feasible_count(), 1);
        assert!(bb.statistics().siblings_skipped > 0);
    }

    #[test]
    fn test_empty_instance_has_single_empty_solution() {
        let p = AssignmentProblem::<i64>::from_rows(Vec::new()).unwrap();
        let search = AssignmentSearch::new(&p);
        let mut solver = BnbSolver::new();
        for mode in [SearchMode::Exhaustive, SearchMode::Bounded] {
            let out = solver.solve(&search, mode);
            let sol = out.solution().unwrap();
            assert_eq!(sol.objective_value(), 0);
            assert!(sol.columns().is_empty());
            assert_eq!(out.feasible_count(), 1);
        }
    }
}
