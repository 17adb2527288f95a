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

use crate::stats::BnbSolverStatistics;
use bramble_model::result::{SolverResult, TerminationReason};

/// The outcome of one branch-and-bound run: the result, why the run ended,
/// how many complete solutions it visited and what it cost.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<S, T> {
    result: SolverResult<S>,
    termination_reason: TerminationReason,
    feasible_count: u64,
    statistics: BnbSolverStatistics<T>,
}

impl<S, T> BnbSolverOutcome<S, T> {
    /// The search space was exhausted with `solution` as the best.
    #[inline]
    pub fn optimal(solution: S, feasible_count: u64, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            feasible_count,
            statistics,
        }
    }

    /// The search space was exhausted without a valid complete solution.
    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            feasible_count: 0,
            statistics,
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<S> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// The number of complete valid solutions the run visited.
    #[inline]
    pub fn feasible_count(&self) -> u64 {
        self.feasible_count
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }

    #[inline]
    pub fn solution(&self) -> Option<&S> {
        self.result.solution()
    }

    #[inline]
    pub fn into_parts(self) -> (SolverResult<S>, u64, BnbSolverStatistics<T>) {
        (self.result, self.feasible_count, self.statistics)
    }
}

impl<S, T> std::fmt::Display for BnbSolverOutcome<S, T>
where
    S: bramble_model::solution::SolutionRecord,
    S::Value: std::fmt::Display,
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:             {}", self.result)?;
        writeln!(f, "Termination:        {}", self.termination_reason)?;
        writeln!(f, "Feasible solutions: {}", self.feasible_count)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bramble_model::solution::DistributionSolution;

    #[test]
    fn test_constructors() {
        let o: BnbSolverOutcome<_, i64> = BnbSolverOutcome::optimal(
            DistributionSolution::new(vec![1, 1], 5i64),
            3,
            BnbSolverStatistics::default(),
        );
        assert!(o.result().is_optimal());
        assert_eq!(o.termination_reason(), TerminationReason::OptimalityProven);
        assert_eq!(o.feasible_count(), 3);
        assert!(format!("{}", o).contains("Optimal(objective=5)"));

        let o: BnbSolverOutcome<DistributionSolution<i64>, i64> =
            BnbSolverOutcome::infeasible(BnbSolverStatistics::default());
        assert!(o.result().is_infeasible());
        assert_eq!(o.feasible_count(), 0);
        assert!(o.solution().is_none());
    }
}
