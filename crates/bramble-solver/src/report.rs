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

//! What a solve returns.

use crate::solver::Strategy;
use bramble_bnb::stats::BnbSolverStatistics;
use bramble_core::num::SolverNumeric;
use bramble_model::{
    result::{SolverResult, TerminationReason},
    solution::SolutionRecord,
};
use std::time::Duration;

/// The outcome of one `Solver` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveReport<S, T> {
    problem: &'static str,
    strategy: Strategy,
    result: SolverResult<S>,
    termination_reason: TerminationReason,
    feasible_solutions: u64,
    elapsed: Duration,
    statistics: Option<BnbSolverStatistics<T>>,
}

impl<S, T> SolveReport<S, T>
where
    T: SolverNumeric,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        problem: &'static str,
        strategy: Strategy,
        result: SolverResult<S>,
        termination_reason: TerminationReason,
        feasible_solutions: u64,
        elapsed: Duration,
        statistics: Option<BnbSolverStatistics<T>>,
    ) -> Self {
        Self {
            problem,
            strategy,
            result,
            termination_reason,
            feasible_solutions,
            elapsed,
            statistics,
        }
    }

    /// The problem family that was solved, e.g. `"knapsack"`.
    #[inline]
    pub fn problem(&self) -> &'static str {
        self.problem
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<S> {
        &self.result
    }

    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// Complete valid solutions visited. For the greedy strategy this is
    /// one, or zero if the construction failed.
    #[inline]
    pub fn feasible_solutions(&self) -> u64 {
        self.feasible_solutions
    }

    /// Wall-clock time of the run.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Engine counters; `None` for the greedy strategy.
    #[inline]
    pub fn statistics(&self) -> Option<&BnbSolverStatistics<T>> {
        self.statistics.as_ref()
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

impl<S, T> SolveReport<S, T>
where
    S: SolutionRecord<Value = T>,
    T: SolverNumeric,
{
    #[inline]
    pub fn objective_value(&self) -> Option<T> {
        self.result.objective_value()
    }
}

impl<S, T> std::fmt::Display for SolveReport<S, T>
where
    S: SolutionRecord<Value = T> + std::fmt::Display,
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solve Report ({} / {})", self.problem, self.strategy)?;
        writeln!(f, "  Result:              {}", self.result)?;
        writeln!(f, "  Termination:         {}", self.termination_reason)?;
        writeln!(f, "  Feasible solutions:  {}", self.feasible_solutions)?;
        writeln!(f, "  Elapsed:             {:.3} ms", self.elapsed.as_secs_f64() * 1e3)?;
        if let Some(stats) = &self.statistics {
            writeln!(f, "  Nodes explored:      {}", stats.nodes_explored)?;
            writeln!(f, "  Bound prunings:      {}", stats.prunings_bound)?;
        }
        if let Some(solution) = self.result.solution() {
            write!(f, "{}", solution)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bramble_model::solution::DistributionSolution;

    #[test]
    fn test_accessors_and_display() {
        let report: SolveReport<DistributionSolution<i64>, i64> = SolveReport::new(
            "distribution",
            Strategy::Greedy,
            SolverResult::Feasible(DistributionSolution::new(vec![2, 0, 2], 160)),
            TerminationReason::HeuristicCompleted,
            1,
            Duration::from_micros(1500),
            None,
        );
        assert_eq!(report.problem(), "distribution");
        assert_eq!(report.objective_value(), Some(160));
        assert_eq!(report.feasible_solutions(), 1);
        assert!(report.statistics().is_none());

        let text = report.to_string();
        assert!(text.contains("distribution / greedy"));
        assert!(text.contains("Feasible(objective=160)"));
        assert!(text.contains("1.500 ms"));
        assert!(!text.contains("Nodes explored"));
    }

    #[test]
    fn test_display_includes_engine_counters() {
        let mut stats = BnbSolverStatistics::<i64>::default();
        stats.on_node_explored();
        stats.on_pruning_bound();
        let report: SolveReport<DistributionSolution<i64>, i64> = SolveReport::new(
            "distribution",
            Strategy::BranchAndBound,
            SolverResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            0,
            Duration::ZERO,
            Some(stats),
        );
        let text = report.to_string();
        assert!(text.contains("Infeasible"));
        assert!(text.contains("Nodes explored:      1"));
        assert!(text.contains("Bound prunings:      1"));
    }
}
