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

use crate::solution::SolutionRecord;

/// The final answer of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<S> {
    /// No complete solution satisfies the instance.
    Infeasible,
    /// A solution whose objective is proven optimal.
    Optimal(S),
    /// A valid solution without an optimality proof.
    Feasible(S),
}

impl<S> SolverResult<S> {
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        !self.is_infeasible()
    }

    #[inline]
    pub fn solution(&self) -> Option<&S> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible => None,
        }
    }

    #[inline]
    pub fn into_solution(self) -> Option<S> {
        match self {
            SolverResult::Optimal(s) | SolverResult::Feasible(s) => Some(s),
            SolverResult::Infeasible => None,
        }
    }
}

impl<S> SolverResult<S>
where
    S: SolutionRecord,
{
    /// The objective value of the solution, if there is one.
    #[inline]
    pub fn objective_value(&self) -> Option<S::Value> {
        self.solution().map(SolutionRecord::objective_value)
    }
}

impl<S> std::fmt::Display for SolverResult<S>
where
    S: SolutionRecord,
    S::Value: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(s) => write!(f, "Optimal(objective={})", s.objective_value()),
            SolverResult::Feasible(s) => write!(f, "Feasible(objective={})", s.objective_value()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// The search space was exhausted with a solution in hand.
    OptimalityProven,
    /// The search space was exhausted without any valid complete solution.
    InfeasibilityProven,
    /// A one-shot heuristic finished its construction.
    HeuristicCompleted,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::HeuristicCompleted => write!(f, "Heuristic Completed"),
        }
    }
}
