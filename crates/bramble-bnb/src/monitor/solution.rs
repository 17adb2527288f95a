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

//! Incumbent history
//!
//! `SolutionHistoryMonitor` records the objective of every incumbent
//! improvement together with the node count at which it happened. The
//! trajectory shows how quickly a candidate ordering finds strong solutions.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    problem::{SearchMode, SearchProblem},
    stats::BnbSolverStatistics,
};
use bramble_core::num::SolverNumeric;

/// One incumbent improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Improvement<T> {
    pub objective: T,
    pub nodes_explored: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionHistoryMonitor<T> {
    improvements: Vec<Improvement<T>>,
}

impl<T> SolutionHistoryMonitor<T>
where
    T: Copy,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            improvements: Vec::new(),
        }
    }

    #[inline]
    pub fn improvements(&self) -> &[Improvement<T>] {
        &self.improvements
    }

    /// The objective values in the order they were found.
    pub fn objectives(&self) -> Vec<T> {
        self.improvements.iter().map(|i| i.objective).collect()
    }

    #[inline]
    pub fn last(&self) -> Option<T> {
        self.improvements.last().map(|i| i.objective)
    }
}

impl<T, P> TreeSearchMonitor<T, P> for SolutionHistoryMonitor<T>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn name(&self) -> &str {
        "SolutionHistoryMonitor"
    }

    fn on_enter_search(&mut self, _problem: &P, _mode: SearchMode, _statistics: &BnbSolverStatistics<T>) {
        self.improvements.clear();
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn on_bound_computed(&mut self, _state: &P::State, _bound: T, _statistics: &BnbSolverStatistics<T>) {}

    fn on_prune(&mut self, _state: &P::State, _reason: PruneReason, _statistics: &BnbSolverStatistics<T>) {}

    fn on_decisions_enqueued(
        &mut self,
        _state: &P::State,
        _count: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_descend(
        &mut self,
        _state: &P::State,
        _decision: &P::Decision,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_backtrack(&mut self, _state: &P::State, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(
        &mut self,
        _solution: &P::Solution,
        objective: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        self.improvements.push(Improvement {
            objective,
            nodes_explored: statistics.nodes_explored,
        });
    }
}
