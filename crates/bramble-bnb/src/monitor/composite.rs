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

//! Fan-out monitor
//!
//! `CompositeTreeSearchMonitor` forwards every event to its children in
//! insertion order, so logging and solution recording can be combined in
//! one run without coupling them.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    problem::{SearchMode, SearchProblem},
    stats::BnbSolverStatistics,
};
use bramble_core::num::SolverNumeric;

type BoxedMonitor<'a, T, P> = Box<dyn TreeSearchMonitor<T, P> + 'a>;

pub struct CompositeTreeSearchMonitor<'a, T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    monitors: Vec<BoxedMonitor<'a, T, P>>,
}

impl<'a, T, P> Default for CompositeTreeSearchMonitor<'a, T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, P> CompositeTreeSearchMonitor<'a, T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T, P> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Builder-style variant of `add_monitor`.
    #[inline]
    pub fn with<M>(mut self, monitor: M) -> Self
    where
        M: TreeSearchMonitor<T, P> + 'a,
    {
        self.add_monitor(monitor);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T, P> FromIterator<BoxedMonitor<'a, T, P>> for CompositeTreeSearchMonitor<'a, T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn from_iter<I: IntoIterator<Item = BoxedMonitor<'a, T, P>>>(iter: I) -> Self {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T, P> std::fmt::Debug for CompositeTreeSearchMonitor<'a, T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.monitors.iter()).finish()
    }
}

impl<'a, T, P> TreeSearchMonitor<T, P> for CompositeTreeSearchMonitor<'a, T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, problem: &P, mode: SearchMode, statistics: &BnbSolverStatistics<T>) {
        for m in self.monitors.iter_mut() {
            m.on_enter_search(problem, mode, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for m in self.monitors.iter_mut() {
            m.on_exit_search(statistics);
        }
    }

    fn on_bound_computed(&mut self, state: &P::State, bound: T, statistics: &BnbSolverStatistics<T>) {
        for m in self.monitors.iter_mut() {
            m.on_bound_computed(state, bound, statistics);
        }
    }

    fn on_prune(&mut self, state: &P::State, reason: PruneReason, statistics: &BnbSolverStatistics<T>) {
        for m in self.monitors.iter_mut() {
            m.on_prune(state, reason, statistics);
        }
    }

    fn on_decisions_enqueued(
        &mut self,
        state: &P::State,
        count: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for m in self.monitors.iter_mut() {
            m.on_decisions_enqueued(state, count, statistics);
        }
    }

    fn on_descend(
        &mut self,
        state: &P::State,
        decision: &P::Decision,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for m in self.monitors.iter_mut() {
            m.on_descend(state, decision, statistics);
        }
    }

    fn on_backtrack(&mut self, state: &P::State, statistics: &BnbSolverStatistics<T>) {
        for m in self.monitors.iter_mut() {
            m.on_backtrack(state, statistics);
        }
    }

    fn on_solution_found(
        &mut self,
        solution: &P::Solution,
        objective: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for m in self.monitors.iter_mut() {
            m.on_solution_found(solution, objective, statistics);
        }
    }
}
