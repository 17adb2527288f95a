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

//! Resource distribution search
//!
//! Columns are decided left to right; a decision is the number of units the
//! column receives, from `min(max_units, remaining)` down to zero. Only
//! states that have placed the entire budget by the last column score. The
//! bound adds the best possible gain of every open column to the gain so far,
//! and declares a state infeasible when the open columns cannot absorb the
//! remaining units even at full allocation.

use crate::problem::{Candidate, ObjectiveSense, SearchMode, SearchProblem};
use bramble_core::num::SolverNumeric;
use bramble_model::{
    index::ColumnIndex, problem::DistributionProblem, solution::DistributionSolution,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionState<T> {
    column: usize,
    remaining: usize,
    gain: T,
    units: Vec<usize>,
}

impl<T: Copy> DistributionState<T> {
    /// The next column to decide.
    #[inline]
    pub fn column(&self) -> ColumnIndex {
        ColumnIndex::new(self.column)
    }

    /// Units not yet placed.
    #[inline]
    pub fn remaining_units(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub fn gain(&self) -> T {
        self.gain
    }

    #[inline]
    pub fn units(&self) -> &[usize] {
        &self.units
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionUndo<T> {
    units: usize,
    previous_gain: T,
}

#[derive(Debug, Clone)]
pub struct DistributionSearch<'a, T> {
    problem: &'a DistributionProblem<T>,
    /// `suffix_max[j]` is the sum of the column maxima of columns `j..m`.
    suffix_max: Vec<T>,
}

impl<'a, T> DistributionSearch<'a, T>
where
    T: SolverNumeric,
{
    pub fn new(problem: &'a DistributionProblem<T>) -> Self {
        let m = problem.num_columns();
        let mut suffix_max = vec![T::zero(); m + 1];
        for j in (0..m).rev() {
            suffix_max[j] = suffix_max[j + 1].saturating_add(problem.column_max(ColumnIndex::new(j)));
        }
        Self {
            problem,
            suffix_max,
        }
    }
}

impl<'a, T> SearchProblem<T> for DistributionSearch<'a, T>
where
    T: SolverNumeric,
{
    type State = DistributionState<T>;
    type Decision = usize;
    type Undo = DistributionUndo<T>;
    type Solution = DistributionSolution<T>;

    fn name(&self) -> &str {
        "distribution"
    }

    fn sense(&self) -> ObjectiveSense {
        ObjectiveSense::Maximize
    }

    fn initial_state(&self, _mode: SearchMode) -> Self::State {
        DistributionState {
            column: 0,
            remaining: self.problem.total_units(),
            gain: T::zero(),
            units: Vec::with_capacity(self.problem.num_columns()),
        }
    }

    #[inline]
    fn is_leaf(&self, state: &Self::State) -> bool {
        state.column == self.problem.num_columns()
    }

    #[inline]
    fn leaf_objective(&self, state: &Self::State) -> Option<T> {
        (state.remaining == 0).then_some(state.gain)
    }

    fn bound(&self, state: &Self::State) -> Option<T> {
        let open = self.problem.num_columns() - state.column;
        let capacity = open.saturating_mul(self.problem.max_units());
        if state.remaining > capacity {
            return None;
        }
        Some(state.gain.saturating_add(self.suffix_max[state.column]))
    }

    fn branch(
        &self,
        state: &Self::State,
        _mode: SearchMode,
        out: &mut Vec<Candidate<Self::Decision, T>>,
    ) {
        let most = self.problem.max_units().min(state.remaining);
        out.extend((0..=most).rev().map(Candidate::new));
    }

    fn apply(&self, state: &mut Self::State, units: Self::Decision) -> Self::Undo {
        debug_assert!(
            units <= state.remaining,
            "called `DistributionSearch::apply` with {} units but only {} remain",
            units,
            state.remaining
        );
        let previous_gain = state.gain;
        let gain = self.problem.gain(units, ColumnIndex::new(state.column));
        state.gain = state.gain.saturating_add(gain);
        state.units.push(units);
        state.remaining -= units;
        state.column += 1;
        DistributionUndo {
            units,
            previous_gain,
        }
    }

    fn undo(&self, state: &mut Self::State, undo: Self::Undo) {
        state.column -= 1;
        state.units.pop();
        state.remaining += undo.units;
        state.gain = undo.previous_gain;
    }

    fn extract_solution(&self, state: &Self::State, objective: T) -> Self::Solution {
        DistributionSolution::new(state.units.clone(), objective)
    }

    fn max_depth(&self) -> usize {
        self.problem.num_columns()
    }

    fn max_branching(&self) -> usize {
        self.problem.max_units() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::BnbSolver;
    use bramble_model::{result::TerminationReason, solution::SolutionRecord};

    fn demo() -> DistributionProblem<i64> {
        DistributionProblem::from_rows(
            vec![
                vec![0, 0, 0],
                vec![40, 30, 50],
                vec![70, 80, 90],
                vec![100, 110, 120],
                vec![120, 130, 140],
            ],
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_suffix_maxima() {
        let p = demo();
        let search = DistributionSearch::new(&p);
        assert_eq!(search.suffix_max, vec![390, 270, 140, 0]);
    }

    #[test]
    fn test_branch_is_descending_and_capped() {
        let p = demo();
        let search = DistributionSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Exhaustive);
        search.apply(&mut state, 3);
        let mut out = Vec::new();
        search.branch(&state, SearchMode::Exhaustive, &mut out);
        let amounts: Vec<usize> = out.iter().map(|c| c.decision).collect();
        assert_eq!(amounts, vec![1, 0]);
    }

    #[test]
    fn test_bound_detects_unplaceable_budget() {
        let p = demo();
        let search = DistributionSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Bounded);
        search.apply(&mut state, 0);
        search.apply(&mut state, 0);
        // One column left, at most 4 units: exactly enough.
        assert_eq!(search.bound(&state), Some(140));

        let p = DistributionProblem::from_rows(vec![vec![0i64, 0], vec![5, 5]], 3).unwrap();
        let search = DistributionSearch::new(&p);
        let state = search.initial_state(SearchMode::Bounded);
        assert_eq!(search.bound(&state), None);
    }

    #[test]
    fn test_leaf_requires_full_budget() {
        let p = demo();
        let search = DistributionSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Exhaustive);
        for _ in 0..3 {
            search.apply(&mut state, 1);
        }
        assert!(search.is_leaf(&state));
        assert_eq!(search.leaf_objective(&state), None);
    }

    #[test]
    fn test_apply_undo_restores_state() {
        let p = demo();
        let search = DistributionSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Bounded);
        let before = state.clone();
        let a = search.apply(&mut state, 2);
        let b = search.apply(&mut state, 1);
        assert_eq!(state.gain(), 70 + 30);
        assert_eq!(state.remaining_units(), 1);
        assert_eq!(state.units(), &[2, 1]);
        search.undo(&mut state, b);
        search.undo(&mut state, a);
        assert_eq!(state, before);
    }

    #[test]
    fn test_demo_optimum() {
        let p = demo();
        let search = DistributionSearch::new(&p);
        let mut solver = BnbSolver::new();

        let ex = solver.solve(&search, SearchMode::Exhaustive);
        let bb = solver.solve(&search, SearchMode::Bounded);
        for out in [&ex, &bb] {
            let sol = out.solution().unwrap();
            assert_eq!(sol.objective_value(), 170);
            assert_eq!(sol.units(), &[1, 2, 1]);
            assert_eq!(sol.total_units(), 4);
        }
        assert_eq!(ex.feasible_count(), 15);
        assert_eq!(bb.feasible_count(), 13);
    }

    #[test]
    fn test_unplaceable_budget_is_infeasible() {
        let p = DistributionProblem::from_rows(vec![vec![0i64, 0], vec![5, 5]], 3).unwrap();
        let search = DistributionSearch::new(&p);
        let mut solver = BnbSolver::new();
        for mode in [SearchMode::Exhaustive, SearchMode::Bounded] {
            let out = solver.solve(&search, mode);
            assert!(out.result().is_infeasible());
            assert_eq!(out.termination_reason(), TerminationReason::InfeasibilityProven);
            assert_eq!(out.feasible_count(), 0);
        }
    }
}
