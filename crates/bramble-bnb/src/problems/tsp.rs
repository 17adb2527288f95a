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

//! Tour search for the travelling salesman problem.
//!
//! Tours start at city 0 and extend one unvisited city at a time, in
//! ascending city order. A path that covers every city is closed by the edge
//! back to the start. The bound is the path cost plus the cheapest edge of the
//! instance times the number of edges still missing, which is admissible
//! because every missing edge costs at least that much.

use crate::problem::{Candidate, ObjectiveSense, SearchMode, SearchProblem};
use bramble_core::num::SolverNumeric;
use bramble_model::{index::CityIndex, problem::TspProblem, solution::TourSolution};
use fixedbitset::FixedBitSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourState<T> {
    path: Vec<CityIndex>,
    visited: FixedBitSet,
    cost: T,
}

impl<T: Copy> TourState<T> {
    /// The open path, starting at the start city.
    #[inline]
    pub fn path(&self) -> &[CityIndex] {
        &self.path
    }

    #[inline]
    pub fn cost(&self) -> T {
        self.cost
    }

    #[inline]
    pub fn is_visited(&self, city: CityIndex) -> bool {
        self.visited.contains(city.get())
    }

    #[inline]
    fn last(&self) -> CityIndex {
        self.path[self.path.len() - 1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourUndo<T> {
    city: CityIndex,
    previous_cost: T,
}

#[derive(Debug, Clone, Copy)]
pub struct TspSearch<'a, T> {
    problem: &'a TspProblem<T>,
}

impl<'a, T> TspSearch<'a, T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new(problem: &'a TspProblem<T>) -> Self {
        Self { problem }
    }
}

impl<'a, T> SearchProblem<T> for TspSearch<'a, T>
where
    T: SolverNumeric,
{
    type State = TourState<T>;
    type Decision = CityIndex;
    type Undo = TourUndo<T>;
    type Solution = TourSolution<T>;

    fn name(&self) -> &str {
        "tsp"
    }

    fn sense(&self) -> ObjectiveSense {
        ObjectiveSense::Minimize
    }

    fn initial_state(&self, _mode: SearchMode) -> Self::State {
        let n = self.problem.num_cities();
        let start = self.problem.start_city();
        let mut path = Vec::with_capacity(n + 1);
        path.push(start);
        let mut visited = FixedBitSet::with_capacity(n);
        visited.insert(start.get());
        TourState {
            path,
            visited,
            cost: T::zero(),
        }
    }

    #[inline]
    fn is_leaf(&self, state: &Self::State) -> bool {
        state.path.len() == self.problem.num_cities()
    }

    #[inline]
    fn leaf_objective(&self, state: &Self::State) -> Option<T> {
        let closing = self
            .problem
            .distance(state.last(), self.problem.start_city());
        Some(state.cost.saturating_add(closing))
    }

    fn bound(&self, state: &Self::State) -> Option<T> {
        let missing = self.problem.num_cities() - state.path.len();
        Some(
            state
                .cost
                .saturating_add(self.problem.min_edge().saturating_mul(&T::from_count(missing))),
        )
    }

    fn branch(
        &self,
        state: &Self::State,
        _mode: SearchMode,
        out: &mut Vec<Candidate<Self::Decision, T>>,
    ) {
        out.extend(
            CityIndex::range(self.problem.num_cities())
                .filter(|&city| !state.is_visited(city))
                .map(Candidate::new),
        );
    }

    fn apply(&self, state: &mut Self::State, city: Self::Decision) -> Self::Undo {
        debug_assert!(
            !state.is_visited(city),
            "called `TspSearch::apply` with {} already on the path",
            city
        );
        let previous_cost = state.cost;
        state.cost = state
            .cost
            .saturating_add(self.problem.distance(state.last(), city));
        state.path.push(city);
        state.visited.insert(city.get());
        TourUndo {
            city,
            previous_cost,
        }
    }

    fn undo(&self, state: &mut Self::State, undo: Self::Undo) {
        state.path.pop();
        state.visited.set(undo.city.get(), false);
        state.cost = undo.previous_cost;
    }

    fn extract_solution(&self, state: &Self::State, objective: T) -> Self::Solution {
        let mut cities = Vec::with_capacity(state.path.len() + 1);
        cities.extend_from_slice(&state.path);
        cities.push(self.problem.start_city());
        TourSolution::new(cities, objective)
    }

    fn max_depth(&self) -> usize {
        self.problem.num_cities()
    }

    fn max_branching(&self) -> usize {
        self.problem.num_cities().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::BnbSolver;
    use bramble_model::solution::SolutionRecord;

    fn demo() -> TspProblem<i64> {
        TspProblem::from_rows(vec![
            vec![0, 10, 15, 20, 25],
            vec![10, 0, 35, 25, 30],
            vec![15, 35, 0, 30, 20],
            vec![20, 25, 30, 0, 15],
            vec![25, 30, 20, 15, 0],
        ])
        .unwrap()
    }

    fn tour(v: &[usize]) -> Vec<CityIndex> {
        v.iter().map(|&c| CityIndex::new(c)).collect()
    }

    #[test]
    fn test_root_bound_uses_cheapest_edge() {
        let p = demo();
        let search = TspSearch::new(&p);
        let state = search.initial_state(SearchMode::Bounded);
        assert_eq!(search.bound(&state), Some(4 * 10));
    }

    #[test]
    fn test_branch_lists_unvisited_in_order() {
        let p = demo();
        let search = TspSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Exhaustive);
        search.apply(&mut state, CityIndex::new(2));
        let mut out = Vec::new();
        search.branch(&state, SearchMode::Exhaustive, &mut out);
        let cities: Vec<CityIndex> = out.iter().map(|c| c.decision).collect();
        assert_eq!(cities, tour(&[1, 3, 4]));
    }

    #[test]
    fn test_apply_undo_restores_state() {
        let p = demo();
        let search = TspSearch::new(&p);
        let mut state = search.initial_state(SearchMode::Bounded);
        let before = state.clone();
        let a = search.apply(&mut state, CityIndex::new(3));
        let b = search.apply(&mut state, CityIndex::new(1));
        assert_eq!(state.cost(), 20 + 25);
        assert_eq!(state.path(), tour(&[0, 3, 1]).as_slice());
        search.undo(&mut state, b);
        search.undo(&mut state, a);
        assert_eq!(state, before);
    }

    #[test]
    fn test_demo_optimum() {
        let p = demo();
        let search = TspSearch::new(&p);
        let mut solver = BnbSolver::new();

        let ex = solver.solve(&search, SearchMode::Exhaustive);
        let bb = solver.solve(&search, SearchMode::Bounded);
        for out in [&ex, &bb] {
            let sol = out.solution().unwrap();
            assert_eq!(sol.objective_value(), 85);
            assert_eq!(sol.cities(), tour(&[0, 1, 3, 4, 2, 0]).as_slice());
            assert!(sol.is_hamiltonian_cycle(5, CityIndex::new(0)));
            assert_eq!(p.tour_cost(sol.cities()), 85);
        }
        assert_eq!(ex.feasible_count(), 24);
        assert_eq!(bb.feasible_count(), 15);
    }

    #[test]
    fn test_single_city_tour() {
        let p = TspProblem::from_rows(vec![vec![0i64]]).unwrap();
        let search = TspSearch::new(&p);
        let mut solver = BnbSolver::new();
        let out = solver.solve(&search, SearchMode::Bounded);
        let sol = out.solution().unwrap();
        assert_eq!(sol.cost(), 0);
        assert_eq!(sol.cities(), tour(&[0, 0]).as_slice());
        assert_eq!(out.feasible_count(), 1);
    }

    #[test]
    fn test_two_city_tour_is_out_and_back() {
        let p = TspProblem::from_rows(vec![vec![0i64, 7], vec![9, 0]]).unwrap();
        let search = TspSearch::new(&p);
        let mut solver = BnbSolver::new();
        let out = solver.solve(&search, SearchMode::Exhaustive);
        assert_eq!(out.solution().unwrap().cost(), 16);
        assert_eq!(out.feasible_count(), 1);
    }
}
