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

//! Ratio greedy for the 0/1 knapsack: scan items by decreasing
//! value-to-weight ratio and take each one that still fits.

use crate::{heuristic::GreedyHeuristic, outcome::GreedyOutcome};
use bramble_core::num::SolverNumeric;
use bramble_model::{problem::KnapsackProblem, solution::KnapsackSolution};
use std::marker::PhantomData;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct RatioGreedy<T> {
    _phantom: PhantomData<T>,
}

impl<T> RatioGreedy<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> GreedyHeuristic<T> for RatioGreedy<T>
where
    T: SolverNumeric,
{
    type Problem = KnapsackProblem<T>;
    type Solution = KnapsackSolution<T>;

    fn name(&self) -> &str {
        "RatioGreedy"
    }

    fn construct(&mut self, problem: &Self::Problem) -> GreedyOutcome<Self::Solution> {
        let mut remaining = problem.capacity();
        let mut value = T::zero();
        let mut items = Vec::new();
        let order = problem.ratio_order();
        for &item in &order {
            let weight = problem.weight(item);
            if weight <= remaining {
                remaining = remaining - weight;
                value = value.saturating_add(problem.value(item));
                items.push(item);
            }
        }

        let weight = problem.capacity() - remaining;
        debug!(heuristic = "RatioGreedy", value = %value, weight = %weight, "construction finished");
        GreedyOutcome::feasible(KnapsackSolution::new(items, value, weight), order.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bramble_model::{index::ItemIndex, solution::SolutionRecord};

    #[test]
    fn test_demo_instance() {
        let p = KnapsackProblem::new(vec![10i64, 20, 30, 40], vec![60, 100, 120, 80], 50).unwrap();
        let out = RatioGreedy::new().construct(&p);
        let sol = out.solution().unwrap();
        // The optimum is 220 with items 1 and 2.
        assert_eq!(sol.objective_value(), 160);
        assert_eq!(sol.items(), &[ItemIndex::new(0), ItemIndex::new(1)]);
        assert_eq!(sol.total_weight(), 30);
    }

    #[test]
    fn test_skips_but_keeps_scanning() {
        let p = KnapsackProblem::new(vec![6i64, 5, 1], vec![60, 40, 1], 6).unwrap();
        let out = RatioGreedy::new().construct(&p);
        let sol = out.solution().unwrap();
        assert_eq!(sol.items(), &[ItemIndex::new(0)]);
        assert_eq!(sol.value(), 60);

        let p = KnapsackProblem::new(vec![7i64, 5, 1], vec![70, 40, 1], 6).unwrap();
        let sol = RatioGreedy::new().construct(&p).into_result().into_solution().unwrap();
        assert_eq!(sol.items(), &[ItemIndex::new(1), ItemIndex::new(2)]);
        assert_eq!(sol.value(), 41);
    }

    #[test]
    fn test_empty_instance() {
        let p = KnapsackProblem::<i64>::new(vec![], vec![], 10).unwrap();
        let out = RatioGreedy::new().construct(&p);
        assert_eq!(out.solution().unwrap().value(), 0);
        assert_eq!(out.feasible_count(), 1);
    }
}
