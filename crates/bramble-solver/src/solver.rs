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

//! # Strategy Facade
//!
//! `Solver` runs one of three strategies on any instance implementing
//! `Solvable`:
//!
//! - `Greedy`: a one-shot constructive heuristic, reported as `Feasible`.
//! - `Exhaustive`: the engine without bound pruning; proves optimality by
//!   visiting every complete solution.
//! - `BranchAndBound`: the engine with bound pruning; same optimum, usually
//!   far fewer visited solutions.
//!
//! Every run is timed with a monotonic clock and summarized in a
//! `SolveReport`.
//!
//! ## Usage
//!
//! ```rust
//! use bramble_model::problem::KnapsackProblem;
//! use bramble_solver::solver::{Solver, Strategy};
//!
//! let knapsack = KnapsackProblem::new(vec![10i64, 20, 30], vec![60, 100, 120], 50).unwrap();
//! let solver = Solver::default();
//! let report = solver.solve_with(&knapsack, Strategy::BranchAndBound);
//! assert_eq!(report.objective_value(), Some(220));
//! ```

use crate::{config::SolverConfig, error::SolverError, report::SolveReport};
use bramble_bnb::{
    bnb::BnbSolver,
    monitor::log::LogTreeSearchMonitor,
    problem::{SearchMode, SearchProblem},
    problems::{AssignmentSearch, DistributionSearch, KnapsackSearch, TspSearch},
    result::BnbSolverOutcome,
};
use bramble_core::num::SolverNumeric;
use bramble_greedy::{
    assignment::BestColumnGreedy, distribution::MarginalGainGreedy, heuristic::GreedyHeuristic,
    knapsack::RatioGreedy, outcome::GreedyOutcome, tsp::NearestNeighborGreedy,
};
use bramble_model::{
    loading::{FromTokens, ProblemLoader},
    problem::{AssignmentProblem, DistributionProblem, KnapsackProblem, TspProblem},
    solution::{
        AssignmentSolution, DistributionSolution, KnapsackSolution, SolutionRecord, TourSolution,
    },
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// How an instance is solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Greedy,
    Exhaustive,
    #[default]
    BranchAndBound,
}

impl Strategy {
    /// All strategies, cheapest first.
    pub const ALL: [Strategy; 3] = [
        Strategy::Greedy,
        Strategy::Exhaustive,
        Strategy::BranchAndBound,
    ];

    /// The engine mode of an exact strategy; `None` for `Greedy`.
    #[inline]
    pub fn search_mode(self) -> Option<SearchMode> {
        match self {
            Strategy::Greedy => None,
            Strategy::Exhaustive => Some(SearchMode::Exhaustive),
            Strategy::BranchAndBound => Some(SearchMode::Bounded),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::Exhaustive => write!(f, "exhaustive"),
            Strategy::BranchAndBound => write!(f, "branch-and-bound"),
        }
    }
}

/// An instance that can be solved by every strategy.
pub trait Solvable<T>
where
    T: SolverNumeric,
{
    type Solution: SolutionRecord<Value = T>;

    /// The problem family, used in reports and logs.
    fn problem_name(&self) -> &'static str;

    fn run_greedy(&self) -> GreedyOutcome<Self::Solution>;

    fn run_search(
        &self,
        mode: SearchMode,
        config: &SolverConfig,
    ) -> BnbSolverOutcome<Self::Solution, T>;
}

/// Runs the engine on `problem`, honouring preallocation and logging.
fn run_engine<T, P>(problem: &P, mode: SearchMode, config: &SolverConfig) -> BnbSolverOutcome<P::Solution, T>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    let mut solver = if config.preallocate {
        BnbSolver::preallocated(problem.max_depth(), problem.max_branching())
    } else {
        BnbSolver::new()
    };

    if config.log.enabled {
        let monitor = LogTreeSearchMonitor::new(config.log.interval(), config.log.clock_check_mask);
        solver.solve_with_monitor(problem, mode, monitor)
    } else {
        solver.solve(problem, mode)
    }
}

impl<T> Solvable<T> for AssignmentProblem<T>
where
    T: SolverNumeric,
{
    type Solution = AssignmentSolution<T>;

    fn problem_name(&self) -> &'static str {
        "assignment"
    }

    fn run_greedy(&self) -> GreedyOutcome<Self::Solution> {
        BestColumnGreedy::preallocated(self.size()).construct(self)
    }

    fn run_search(&self, mode: SearchMode, config: &SolverConfig) -> BnbSolverOutcome<Self::Solution, T> {
        run_engine(&AssignmentSearch::new(self), mode, config)
    }
}

impl<T> Solvable<T> for KnapsackProblem<T>
where
    T: SolverNumeric,
{
    type Solution = KnapsackSolution<T>;

    fn problem_name(&self) -> &'static str {
        "knapsack"
    }

    fn run_greedy(&self) -> GreedyOutcome<Self::Solution> {
        RatioGreedy::new().construct(self)
    }

    fn run_search(&self, mode: SearchMode, config: &SolverConfig) -> BnbSolverOutcome<Self::Solution, T> {
        run_engine(&KnapsackSearch::new(self), mode, config)
    }
}

impl<T> Solvable<T> for TspProblem<T>
where
    T: SolverNumeric,
{
    type Solution = TourSolution<T>;

    fn problem_name(&self) -> &'static str {
        "tsp"
    }

    fn run_greedy(&self) -> GreedyOutcome<Self::Solution> {
        NearestNeighborGreedy::preallocated(self.num_cities()).construct(self)
    }

    fn run_search(&self, mode: SearchMode, config: &SolverConfig) -> BnbSolverOutcome<Self::Solution, T> {
        run_engine(&TspSearch::new(self), mode, config)
    }
}

impl<T> Solvable<T> for DistributionProblem<T>
where
    T: SolverNumeric,
{
    type Solution = DistributionSolution<T>;

    fn problem_name(&self) -> &'static str {
        "distribution"
    }

    fn run_greedy(&self) -> GreedyOutcome<Self::Solution> {
        MarginalGainGreedy::preallocated(self.num_columns()).construct(self)
    }

    fn run_search(&self, mode: SearchMode, config: &SolverConfig) -> BnbSolverOutcome<Self::Solution, T> {
        run_engine(&DistributionSearch::new(self), mode, config)
    }
}

/// Runs strategies on instances according to a `SolverConfig`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Creates a solver from a TOML configuration file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, SolverError> {
        Ok(Self::new(SolverConfig::load(path)?))
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `instance` with the configured default strategy.
    #[inline]
    pub fn solve<T, I>(&self, instance: &I) -> SolveReport<I::Solution, T>
    where
        T: SolverNumeric,
        I: Solvable<T>,
    {
        self.solve_with(instance, self.config.strategy)
    }

    /// Solves `instance` with an explicit strategy.
    pub fn solve_with<T, I>(&self, instance: &I, strategy: Strategy) -> SolveReport<I::Solution, T>
    where
        T: SolverNumeric,
        I: Solvable<T>,
    {
        let problem = instance.problem_name();
        info!(problem, strategy = %strategy, "solve started");
        let start = Instant::now();

        let report = match strategy.search_mode() {
            None => {
                let outcome = instance.run_greedy();
                let elapsed = start.elapsed();
                let reason = outcome.termination_reason();
                let feasible = outcome.feasible_count();
                SolveReport::new(
                    problem,
                    strategy,
                    outcome.into_result(),
                    reason,
                    feasible,
                    elapsed,
                    None,
                )
            }
            Some(mode) => {
                let outcome = instance.run_search(mode, &self.config);
                let elapsed = start.elapsed();
                let reason = outcome.termination_reason();
                let (result, feasible, stats) = outcome.into_parts();
                SolveReport::new(problem, strategy, result, reason, feasible, elapsed, Some(stats))
            }
        };

        if report.result().is_infeasible() {
            warn!(problem, strategy = %strategy, "no valid solution exists");
        }
        info!(
            problem,
            strategy = %strategy,
            result = %report.result(),
            feasible = report.feasible_solutions(),
            elapsed_ms = report.elapsed().as_secs_f64() * 1e3,
            "solve finished"
        );
        report
    }

    /// Loads an instance in the whitespace token format and solves it with
    /// the configured strategy.
    pub fn solve_file<T, I>(&self, path: impl AsRef<Path>) -> Result<SolveReport<I::Solution, T>, SolverError>
    where
        T: SolverNumeric,
        I: Solvable<T> + FromTokens,
    {
        let instance: I = ProblemLoader::new().from_path(path)?;
        Ok(self.solve(&instance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bramble_model::{
        index::{CityIndex, ColumnIndex},
        result::TerminationReason,
    };

    type IntegerType = i64;

    fn assignment() -> AssignmentProblem<IntegerType> {
        AssignmentProblem::from_rows(vec![
            vec![50, 70, 30, 60],
            vec![80, 40, 90, 50],
            vec![60, 30, 70, 80],
            vec![70, 80, 60, 40],
        ])
        .unwrap()
    }

    fn knapsack() -> KnapsackProblem<IntegerType> {
        KnapsackProblem::new(vec![10, 20, 30, 40], vec![60, 100, 120, 80], 50).unwrap()
    }

    fn tsp() -> TspProblem<IntegerType> {
        TspProblem::from_rows(vec![
            vec![0, 10, 15, 20, 25],
            vec![10, 0, 35, 25, 30],
            vec![15, 35, 0, 30, 20],
            vec![20, 25, 30, 0, 15],
            vec![25, 30, 20, 15, 0],
        ])
        .unwrap()
    }

    fn distribution() -> DistributionProblem<IntegerType> {
        DistributionProblem::from_rows(
            vec![
                vec![0, 0, 0],
                vec![40, 30, 50],
                vec![70, 80, 90],
                vec![100, 110, 120],
                vec![120, 130, 140],
            ],
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_strategy_modes_and_names() {
        assert_eq!(Strategy::Greedy.search_mode(), None);
        assert_eq!(Strategy::Exhaustive.search_mode(), Some(SearchMode::Exhaustive));
        assert_eq!(Strategy::BranchAndBound.search_mode(), Some(SearchMode::Bounded));
        assert_eq!(Strategy::default(), Strategy::BranchAndBound);
        assert_eq!(Strategy::BranchAndBound.to_string(), "branch-and-bound");
    }

    #[test]
    fn test_assignment_demo() {
        let solver = Solver::default();
        let p = assignment();

        let greedy = solver.solve_with(&p, Strategy::Greedy);
        assert!(greedy.result().is_feasible());
        assert_eq!(greedy.objective_value(), Some(310));
        assert_eq!(greedy.termination_reason(), TerminationReason::HeuristicCompleted);
        assert_eq!(greedy.feasible_solutions(), 1);
        assert!(greedy.statistics().is_none());

        let ex = solver.solve_with(&p, Strategy::Exhaustive);
        assert!(ex.result().is_optimal());
        assert_eq!(ex.objective_value(), Some(310));
        assert_eq!(ex.feasible_solutions(), 24);

        let bb = solver.solve_with(&p, Strategy::BranchAndBound);
        assert_eq!(bb.objective_value(), Some(310));
        assert_eq!(bb.feasible_solutions(), 1);
        let columns: Vec<ColumnIndex> = [1, 2, 3, 0].into_iter().map(ColumnIndex::new).collect();
        assert_eq!(bb.solution().unwrap().columns(), columns.as_slice());
        assert_eq!(bb.statistics().unwrap().max_depth, 4);
    }

    #[test]
    fn test_knapsack_demo() {
        let solver = Solver::default();
        let p = knapsack();
        assert_eq!(solver.solve_with(&p, Strategy::Greedy).objective_value(), Some(160));
        let ex = solver.solve_with(&p, Strategy::Exhaustive);
        let bb = solver.solve_with(&p, Strategy::BranchAndBound);
        assert_eq!(ex.objective_value(), Some(220));
        assert_eq!(bb.objective_value(), Some(220));
        assert_eq!((ex.feasible_solutions(), bb.feasible_solutions()), (9, 3));
    }

    #[test]
    fn test_tsp_demo() {
        let solver = Solver::default();
        let p = tsp();
        for strategy in Strategy::ALL {
            let report = solver.solve_with(&p, strategy);
            assert_eq!(report.objective_value(), Some(85), "strategy {}", strategy);
            assert!(report
                .solution()
                .unwrap()
                .is_hamiltonian_cycle(5, CityIndex::new(0)));
        }
        assert_eq!(solver.solve_with(&p, Strategy::Exhaustive).feasible_solutions(), 24);
        assert_eq!(solver.solve_with(&p, Strategy::BranchAndBound).feasible_solutions(), 15);
    }

    #[test]
    fn test_distribution_demo() {
        let solver = Solver::default();
        let p = distribution();
        let greedy = solver.solve_with(&p, Strategy::Greedy);
        assert_eq!(greedy.solution().unwrap().units(), &[2, 0, 2]);
        assert_eq!(greedy.objective_value(), Some(160));

        let ex = solver.solve_with(&p, Strategy::Exhaustive);
        let bb = solver.solve_with(&p, Strategy::BranchAndBound);
        assert_eq!(ex.solution().unwrap().units(), &[1, 2, 1]);
        assert_eq!(bb.solution().unwrap().units(), &[1, 2, 1]);
        assert_eq!((ex.feasible_solutions(), bb.feasible_solutions()), (15, 13));
    }

    #[test]
    fn test_configured_strategy_is_default() {
        let solver = Solver::new(SolverConfig::new().with_strategy(Strategy::Exhaustive));
        let report = solver.solve(&knapsack());
        assert_eq!(report.strategy(), Strategy::Exhaustive);
        assert_eq!(report.feasible_solutions(), 9);
    }

    #[test]
    fn test_preallocation_and_logging_do_not_change_results() {
        let plain = Solver::new(SolverConfig::new().with_preallocation(false));
        let logged = Solver::new(SolverConfig::new().with_logging(true));
        let p = tsp();
        let a = plain.solve_with(&p, Strategy::BranchAndBound);
        let b = logged.solve_with(&p, Strategy::BranchAndBound);
        assert_eq!(a.result(), b.result());
        assert_eq!(a.feasible_solutions(), b.feasible_solutions());
    }

    #[test]
    fn test_infeasible_distribution_is_not_an_error() {
        let p = DistributionProblem::from_rows(vec![vec![0i64, 0], vec![1, 1]], 5).unwrap();
        let solver = Solver::default();
        for strategy in Strategy::ALL {
            let report = solver.solve_with(&p, strategy);
            assert!(report.result().is_infeasible(), "strategy {}", strategy);
            assert_eq!(report.feasible_solutions(), 0);
        }
        assert_eq!(
            solver
                .solve_with(&p, Strategy::Exhaustive)
                .termination_reason(),
            TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_solve_file_reports_missing_file() {
        let solver = Solver::default();
        let err = solver
            .solve_file::<IntegerType, KnapsackProblem<IntegerType>>("/nonexistent/instance.txt")
            .unwrap_err();
        assert!(matches!(err, SolverError::Loader(_)));
    }
}
