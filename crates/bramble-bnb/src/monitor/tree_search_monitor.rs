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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait and `PruneReason` for observing
//! branch-and-bound. Monitors see every lifecycle event of a run together
//! with the running `BnbSolverStatistics`; they observe only and cannot
//! alter or stop the search.
//!
//! Lifecycle
//! - enter → {bound/prune | decisions/descend/backtrack} → solution → exit
//!
//! Methods take `&mut self`; keep callbacks light, they run in the hot loop.

use crate::{
    problem::{SearchMode, SearchProblem},
    stats::BnbSolverStatistics,
};
use bramble_core::num::SolverNumeric;

/// Reasons for pruning a search state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The state has no valid completion.
    Infeasible,
    /// The state's bound cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Observer of a branch-and-bound run over problem `P`.
pub trait TreeSearchMonitor<T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn name(&self) -> &str;
    /// Called once before the root is expanded.
    fn on_enter_search(&mut self, problem: &P, mode: SearchMode, statistics: &BnbSolverStatistics<T>);
    /// Called once after the search space is exhausted.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);
    /// Called when the bound of a state is known.
    fn on_bound_computed(&mut self, state: &P::State, bound: T, statistics: &BnbSolverStatistics<T>);
    /// Called when a state or a candidate is pruned.
    fn on_prune(&mut self, state: &P::State, reason: PruneReason, statistics: &BnbSolverStatistics<T>);
    /// Called after the children of a state were pushed.
    fn on_decisions_enqueued(
        &mut self,
        state: &P::State,
        count: usize,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called after a decision was applied.
    fn on_descend(
        &mut self,
        state: &P::State,
        decision: &P::Decision,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called before a level is closed and its decision reverted.
    fn on_backtrack(&mut self, state: &P::State, statistics: &BnbSolverStatistics<T>);
    /// Called when the incumbent is replaced.
    fn on_solution_found(
        &mut self,
        solution: &P::Solution,
        objective: T,
        statistics: &BnbSolverStatistics<T>,
    );
}

impl<T, P, M> TreeSearchMonitor<T, P> for &mut M
where
    T: SolverNumeric,
    P: SearchProblem<T>,
    M: TreeSearchMonitor<T, P> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, problem: &P, mode: SearchMode, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(problem, mode, statistics)
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    fn on_bound_computed(&mut self, state: &P::State, bound: T, statistics: &BnbSolverStatistics<T>) {
        (**self).on_bound_computed(state, bound, statistics)
    }

    fn on_prune(&mut self, state: &P::State, reason: PruneReason, statistics: &BnbSolverStatistics<T>) {
        (**self).on_prune(state, reason, statistics)
    }

    fn on_decisions_enqueued(
        &mut self,
        state: &P::State,
        count: usize,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_decisions_enqueued(state, count, statistics)
    }

    fn on_descend(
        &mut self,
        state: &P::State,
        decision: &P::Decision,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_descend(state, decision, statistics)
    }

    fn on_backtrack(&mut self, state: &P::State, statistics: &BnbSolverStatistics<T>) {
        (**self).on_backtrack(state, statistics)
    }

    fn on_solution_found(
        &mut self,
        solution: &P::Solution,
        objective: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_solution_found(solution, objective, statistics)
    }
}

impl<T, P> std::fmt::Debug for dyn TreeSearchMonitor<T, P> + '_
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl<T, P> std::fmt::Display for dyn TreeSearchMonitor<T, P> + '_
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}
