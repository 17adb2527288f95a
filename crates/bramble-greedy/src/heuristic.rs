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

use crate::outcome::GreedyOutcome;
use bramble_core::num::SolverNumeric;

/// A constructive heuristic for problems of type `Self::Problem`.
///
/// Implementations may keep scratch buffers between calls; `construct`
/// always starts from a clean slate.
pub trait GreedyHeuristic<T>
where
    T: SolverNumeric,
{
    type Problem;
    type Solution;

    /// Returns the name of the heuristic.
    fn name(&self) -> &str;

    /// Builds one complete solution for `problem`.
    fn construct(&mut self, problem: &Self::Problem) -> GreedyOutcome<Self::Solution>;
}

impl<T, P, S> std::fmt::Debug for dyn GreedyHeuristic<T, Problem = P, Solution = S>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GreedyHeuristic({})", self.name())
    }
}

impl<T, P, S> std::fmt::Display for dyn GreedyHeuristic<T, Problem = P, Solution = S>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GreedyHeuristic({})", self.name())
    }
}
