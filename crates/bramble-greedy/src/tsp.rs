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

//! Nearest-neighbour tour construction.
//!
//! Starting at city 0, repeatedly move to the closest unvisited city (lowest
//! index on ties) and finally return to the start.

use crate::{heuristic::GreedyHeuristic, outcome::GreedyOutcome};
use bramble_core::num::SolverNumeric;
use bramble_model::{index::CityIndex, problem::TspProblem, solution::TourSolution};
use fixedbitset::FixedBitSet;
use std::marker::PhantomData;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct NearestNeighborGreedy<T> {
    visited: FixedBitSet,
    _phantom: PhantomData<T>,
}

impl<T> NearestNeighborGreedy<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            visited: FixedBitSet::new(),
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn preallocated(num_cities: usize) -> Self {
        Self {
            visited: FixedBitSet::with_capacity(num_cities),
            _phantom: PhantomData,
        }
    }
}

impl<T> NearestNeighborGreedy<T>
where
    T: SolverNumeric,
{
    fn nearest_unvisited(&self, problem: &TspProblem<T>, from: CityIndex) -> Option<CityIndex> {
        let mut best: Option<(CityIndex, T)> = None;
        for city in CityIndex::range(problem.num_cities()) {
            if self.visited.contains(city.get()) {
                continue;
            }
            let d = problem.distance(from, city);
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((city, d));
            }
        }
        best.map(|(city, _)| city)
    }
}

impl<T> GreedyHeuristic<T> for NearestNeighborGreedy<T>
where
    T: SolverNumeric,
{
    type Problem = TspProblem<T>;
    type Solution = TourSolution<T>;

    fn name(&self) -> &str {
        "NearestNeighborGreedy"
    }

    fn construct(&mut self, problem: &Self::Problem) -> GreedyOutcome<Self::Solution> {
        let n = problem.num_cities();
        let start = problem.start_city();
        self.visited.clear();
        self.visited.grow(n);
        self.visited.insert(start.get());

        let mut tour = Vec::with_capacity(n + 1);
        tour.push(start);
        let mut current = start;
        let mut cost = T::zero();
        while let Some(next) = self.nearest_unvisited(problem, current) {
            cost = cost.saturating_add(problem.distance(current, next));
            self.visited.insert(next.get());
            tour.push(next);
            current = next;
        }
        cost = cost.saturating_add(problem.distance(current, start));
        tour.push(start);

        debug!(heuristic = "NearestNeighborGreedy", cost = %cost, "construction finished");
        GreedyOutcome::feasible(TourSolution::new(tour, cost), n.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bramble_model::solution::SolutionRecord;

    fn tour(v: &[usize]) -> Vec<CityIndex> {
        v.iter().map(|&c| CityIndex::new(c)).collect()
    }

    #[test]
    fn test_demo_instance() {
        let p = TspProblem::from_rows(vec![
            vec![0i64, 10, 15, 20, 25],
            vec![10, 0, 35, 25, 30],
            vec![15, 35, 0, 30, 20],
            vec![20, 25, 30, 0, 15],
            vec![25, 30, 20, 15, 0],
        ])
        .unwrap();
        let out = NearestNeighborGreedy::new().construct(&p);
        let sol = out.solution().unwrap();
        assert_eq!(sol.objective_value(), 85);
        assert_eq!(sol.cities(), tour(&[0, 1, 3, 4, 2, 0]).as_slice());
        assert!(sol.is_hamiltonian_cycle(5, CityIndex::new(0)));
    }

    #[test]
    fn test_asymmetric_closing_edge() {
        let p = TspProblem::from_rows(vec![
            vec![0i64, 1, 9],
            vec![9, 0, 1],
            vec![50, 9, 0],
        ])
        .unwrap();
        let sol = NearestNeighborGreedy::new()
            .construct(&p)
            .into_result()
            .into_solution()
            .unwrap();
        assert_eq!(sol.cities(), tour(&[0, 1, 2, 0]).as_slice());
        assert_eq!(sol.cost(), 52);
        assert_eq!(p.tour_cost(sol.cities()), 52);
    }

    #[test]
    fn test_single_city() {
        let p = TspProblem::from_rows(vec![vec![0i64]]).unwrap();
        let mut greedy = NearestNeighborGreedy::preallocated(1);
        let sol = greedy.construct(&p).into_result().into_solution().unwrap();
        assert_eq!(sol.cities(), tour(&[0, 0]).as_slice());
        assert_eq!(sol.cost(), 0);
    }
}
