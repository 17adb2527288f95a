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

use bramble_model::result::{SolverResult, TerminationReason};

/// The result of one greedy construction.
///
/// A constructed solution is always reported as `Feasible`: the heuristic
/// has no way to prove it optimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedyOutcome<S> {
    result: SolverResult<S>,
    steps: usize,
}

impl<S> GreedyOutcome<S> {
    /// A construction that produced `solution` after `steps` greedy choices.
    #[inline]
    pub fn feasible(solution: S, steps: usize) -> Self {
        Self {
            result: SolverResult::Feasible(solution),
            steps,
        }
    }

    /// A construction that could not complete.
    #[inline]
    pub fn infeasible(steps: usize) -> Self {
        Self {
            result: SolverResult::Infeasible,
            steps,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<S> {
        &self.result
    }

    /// Greedy constructions always run to completion.
    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        TerminationReason::HeuristicCompleted
    }

    /// One for a built solution, zero otherwise.
    #[inline]
    pub fn feasible_count(&self) -> u64 {
        u64::from(self.result.has_solution())
    }

    /// The number of greedy choices made.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn solution(&self) -> Option<&S> {
        self.result.solution()
    }

    #[inline]
    pub fn into_result(self) -> SolverResult<S> {
        self.result
    }
}

impl<S> std::fmt::Display for GreedyOutcome<S>
where
    S: bramble_model::solution::SolutionRecord,
    S::Value: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GreedyOutcome(result: {}, steps: {}, reason: {})",
            self.result,
            self.steps,
            self.termination_reason()
        )
    }
}
