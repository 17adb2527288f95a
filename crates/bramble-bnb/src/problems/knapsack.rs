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

//! 0/1 knapsack search
//!
//! One level per item with two decisions: take it (only if it still fits)
//! or leave it. In bounded mode items are decided in decreasing
//! value-to-weight order and "take" is tried first, which makes the
//! fractional relaxation both tight and cheap: it simply continues the
//! greedy fill from the current level. In exhaustive mode items are decided
//! in index order and "leave" comes first.

use crate::problem::{Candidate, ObjectiveSense, SearchMode, SearchProblem};
use bramble_core::num::{mul_div_floor, SolverNumeric};
use bramble_model::{index::ItemIndex, problem::KnapsackProblem, solution::KnapsackSolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnapsackDecision {
    pub item: ItemIndex,
    pub take: bool,
}

impl std::fmt::Display for KnapsackDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.take {
            write!(f, "take {}", self.item)
        } else {
            write!(f, "skip {}", self.item)
        }
    }
}

/// Undo token for a knapsack decision. Totals are restored from the
/// recorded values, since saturating additions cannot be subtracted back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnapsackUndo<T> {
    decision: KnapsackDecision,
    previous_value: T,
    previous_weight: T,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackState<T> {
    level: usize,
    remaining: T,
    value: T,
    weight: T,
    selected: Vec<ItemIndex>,
    ratio_ordered: bool,
}

impl<T: Copy> KnapsackState<T> {
    /// Number of items decided so far.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    #[inline]
    pub fn remaining_capacity(&self) -> T {
        self.remaining
    }

    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub fn weight(&self) -> T {
        self.weight
    }

    /// Taken items in decision order.
    #[inline]
    pub fn selected(&self) -> &[ItemIndex] {
        &self.selected
    }
}

#[derive(Debug, Clone)]
pub struct KnapsackSearch<'a, T> {
    problem: &'a KnapsackProblem<T>,
    ratio_order: Vec<ItemIndex>,
}

impl<'a, T> KnapsackSearch<'a, T>
where
    T: SolverNumeric,
{
    pub fn new(problem: &'a KnapsackProblem<T>) -> Self {
        Self {
            problem,
            ratio_order: problem.ratio_order(),
        }
    }

    /// The item decided at `level` under the state's ordering.
    #[inline]
    fn item_at(&self, state: &KnapsackState<T>, level: usize) -> ItemIndex {
        if state.ratio_ordered {
            self.ratio_order[level]
        } else {
            ItemIndex::new(level)
        }
    }

    /// Greedily fills the remaining capacity of `state` with `items`, taking
    /// the floor of the first item that only fits partially.
    fn fractional_fill<I>(&self, state: &KnapsackState<T>, items: I) -> T
    where
        I: IntoIterator<Item = ItemIndex>,
    {
        let mut capacity = state.remaining;
        let mut bound = state.value;
        for item in items {
            let weight = self.problem.weight(item);
            let value = self.problem.value(item);
            if weight <= capacity {
                capacity = capacity - weight;
                bound = bound.saturating_add(value);
            } else {
                bound = bound.saturating_add(mul_div_floor(value, capacity, weight));
                break;
            }
        }
        bound
    }
}

impl<'a, T> SearchProblem<T> for KnapsackSearch<'a, T>
where
    T: SolverNumeric,
{
    type State = KnapsackState<T>;
    type Decision = KnapsackDecision;
    type Undo = KnapsackUndo<T>;
    type Solution = KnapsackSolution<T>;

    fn name(&self) -> &str {
        "knapsack"
    }

    fn sense(&self) -> ObjectiveSense {
        ObjectiveSense::Maximize
    }

    fn initial_state(&self, mode: SearchMode) -> Self::State {
        KnapsackState {
            level: 0,
            remaining: self.problem.capacity(),
            value: T::zero(),
            weight: T::zero(),
            selected: Vec::with_capacity(self.problem.num_items()),
            ratio_ordered: mode.is_bounded(),
        }
    }

    #[inline]
    fn is_leaf(&self, state: &Self::State) -> bool {
        state.level == self.problem.num_items()
    }

    #[inline]
    fn leaf_objective(&self, state: &Self::State) -> Option<T> {
        Some(state.value)
    }

    /// Fractional relaxation over the undecided items, rounded down.
    fn bound(&self, state: &Self::State) -> Option<T> {
        let bound = if state.ratio_ordered {
            self.fractional_fill(state, self.ratio_order[state.level..].iter().copied())
        } else {
            let undecided = self
                .ratio_order
                .iter()
                .copied()
                .filter(|item| item.get() >= state.level);
            self.fractional_fill(state, undecided)
        };
        Some(bound)
    }

    fn branch(
        &self,
        state: &Self::State,
        mode: SearchMode,
        out: &mut Vec<Candidate<Self::Decision, T>>,
    ) {
        let item = self.item_at(state, state.level);
        let fits = self.problem.weight(item) <= state.remaining;
        let take = KnapsackDecision { item, take: true };
        let skip = KnapsackDecision { item, take: false };

        if mode.is_bounded() {
            if fits {
                out.push(Candidate::new(take));
            }
            out.push(Candidate::new(skip));
        } else {
            out.push(Candidate::new(skip));
            if fits {
                out.push(Candidate::new(take));
            }
        }
    }

    fn apply(&self, state: &mut Self::State, decision: Self::Decision) -> Self::Undo {
        let undo = KnapsackUndo {
            decision,
            previous_value: state.value,
            previous_weight: state.weight,
        };
        state.level += 1;
        if decision.take {
            let weight = self.problem.weight(decision.item);
            debug_assert!(
                weight <= state.remaining,
                "called `KnapsackSearch::apply` taking {} which does not fit",
                decision.item
            );
            state.selected.push(decision.item);
            state.remaining = state.remaining - weight;
            state.weight = state.weight.saturating_add(weight);
            state.value = state.value.saturating_add(self.problem.value(decision.item));
        }
        undo
    }

    fn undo(&self, state: &mut Self::State, undo: Self::Undo) {
        state.level -= 1;
        if undo.decision.take {
            state.selected.pop();
            state.remaining = state.remaining + self.problem.weight(undo.decision.item);
            state.weight = undo.previous_weight;
            state.value = undo.previous_value;
        }
    }

    fn extract_solution(&self, state: &Self::State, objective: T) -> Self::Solution {
        KnapsackSolution::new(state.selected.clone(), objective, state.weight)
    }

    fn max_depth(&self) -> usize {
        self.problem.num_items()
    }

    fn max_branching(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::BnbSolver;
    use bramble_model::solution::SolutionRecord;

    fn demo() -> KnapsackProblem<i64> {
        KnapsackProblem::new(vec![10, 20, 30, 40], vec![60, 100, 120, 80], 50).unwrap()
    }

    fn large_values() -> KnapsackProblem<i64> {
        KnapsackProblem::new(
            vec![9_000_000_000, 8_000_000_000, 2_000_000_000, 7_000_000_000],
            vec![10_000_000_000, 6_000_000_000, 3_000_000_000, 3_000_000_000],
            8_000_000_000,
        )
        .unwrap()
    }

    fn items(v: &[usize]) -> Vec<ItemIndex> {
        v.iter().map(|&i| ItemIndex::new(i)).collect()
    }

    #[test]
    fn test_root_bound_is_fractional_fill() {
        let p = demo();
        let search = KnapsackSearch::new(&p);
        let state = search.initial_state(SearchMode::Bounded);
        // 60 + 100 fill 30 of 50, then 20/30 of item 2: 120 * 20 / 30 = 80.
        assert_eq!(search.bound(&state), Some(240));
    }

    #[test]
    fn test_bound_rounds_down() {
        let p = KnapsackProblem::new(vec![3], vec![10], 2).unwrap();
        let search = KnapsackSearch::new(&p);
        let state = search.initial_state(SearchMode::Bounded);
        assert_eq!(search.bound(&state), Some(6));
    }

    #[test]
    fn test_branch_order_depends_on_mode() {
        let p = demo();
        let search = KnapsackSearch::new(&p);
        let state = search.initial_state(SearchMode::Exhaustive);
        let mut out = Vec::new();
        search.branch(&state, SearchMode::Exhaustive, &mut out);
        let takes: Vec<bool> = out.iter().map(|c| c.decision.take).collect();
        assert_eq!(takes, vec![false, true]);

        out.clear();
        let state = search.initial_state(SearchMode::Bounded);
        search.branch(&state, SearchMode::Bounded, &mut out);
        let takes: Vec<bool> = out.iter().map(|c| c.decision.take).collect();
        assert_eq!(takes, vec![true, false]);
    }

    #[test]
    fn test_only_skip_when_item_does_not_fit() {
        let p = KnapsackProblem::new(vec![60], vec![10], 50).unwrap();
        let search = KnapsackSearch::new(&p);
        let state = search.initial_state(SearchMode::Exhaustive);
        let mut out = Vec::new();
        search.branch(&state, SearchMode::Exhaustive, &mut out);
        assert_eq!(out.len(), 1);
        assert!(!out[0].decision.take);
    }

    #[test]
    fn test_apply_undo_restores_state() {
        let p = demo();
        let search = KnapsackSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Exhaustive);
        let before = state.clone();
        let a = search.apply(&mut state, KnapsackDecision { item: ItemIndex::new(0), take: true });
        let b = search.apply(&mut state, KnapsackDecision { item: ItemIndex::new(1), take: false });
        assert_eq!(state.value(), 60);
        assert_eq!(state.remaining_capacity(), 40);
        assert_eq!(state.level(), 2);
        search.undo(&mut state, b);
        search.undo(&mut state, a);
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo_restores_saturated_value() {
        let p = KnapsackProblem::new(vec![1i64, 1], vec![i64::MAX - 1, 5], 2).unwrap();
        let search = KnapsackSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Exhaustive);
        let a = search.apply(&mut state, KnapsackDecision { item: ItemIndex::new(0), take: true });
        let before = state.clone();
        let b = search.apply(&mut state, KnapsackDecision { item: ItemIndex::new(1), take: true });
        assert_eq!(state.value(), i64::MAX);
        search.undo(&mut state, b);
        assert_eq!(state, before);
        assert_eq!(state.value(), i64::MAX - 1);
        search.undo(&mut state, a);
        assert_eq!(state.value(), 0);
        assert_eq!(state.remaining_capacity(), 2);
    }

    #[test]
    fn test_bound_with_large_values() {
        let p = large_values();
        let search = KnapsackSearch::new(&p);
        let state = search.initial_state(SearchMode::Bounded);
        // Item 2 fills 2e9, then 6e9 of the 9e9 of item 0: 1e10 * 6e9 / 9e9.
        assert_eq!(search.bound(&state), Some(3_000_000_000 + 6_666_666_666));
    }

    #[test]
    fn test_large_values_agree_across_modes() {
        let p = large_values();
        let search = KnapsackSearch::new(&p);
        let mut solver = BnbSolver::new();

        let ex = solver.solve(&search, SearchMode::Exhaustive);
        let bb = solver.solve(&search, SearchMode::Bounded);
        assert_eq!(ex.result().objective_value(), Some(6_000_000_000));
        assert_eq!(bb.result().objective_value(), Some(6_000_000_000));
        assert_eq!(bb.solution().unwrap().items(), items(&[1]).as_slice());
    }

    #[test]
    fn test_demo_optimum() {
        let p = demo();
        let search = KnapsackSearch::new(&p);
        let mut solver = BnbSolver::new();

        let ex = solver.solve(&search, SearchMode::Exhaustive);
        let bb = solver.solve(&search, SearchMode::Bounded);
        for out in [&ex, &bb] {
            let sol = out.solution().unwrap();
            assert_eq!(sol.objective_value(), 220);
            assert_eq!(sol.items(), items(&[1, 2]).as_slice());
            assert_eq!(sol.total_weight(), 50);
        }
        assert_eq!(ex.feasible_count(), 9);
        assert_eq!(bb.feasible_count(), 3);
    }

    #[test]
    fn test_nothing_fits() {
        let p = KnapsackProblem::new(vec![5, 6], vec![10, 20], 4).unwrap();
        let search = KnapsackSearch::new(&p);
        let mut solver = BnbSolver::new();
        let out = solver.solve(&search, SearchMode::Bounded);
        let sol = out.solution().unwrap();
        assert_eq!(sol.value(), 0);
        assert!(sol.items().is_empty());
    }
}
