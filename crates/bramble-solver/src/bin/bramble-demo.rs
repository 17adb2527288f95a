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

//! Runs every strategy on the four demo instances and prints the reports.
//!
//! Usage: `bramble-demo [config.toml]`. Log verbosity follows `RUST_LOG`
//! (default `info`); `RUST_LOG=bramble_bnb=debug` also shows engine events.

use bramble_model::problem::{
    AssignmentProblem, DistributionProblem, KnapsackProblem, TspProblem,
};
use bramble_model::solution::SolutionRecord;
use bramble_solver::{
    config::SolverConfig,
    error::SolverError,
    solver::{Solvable, Solver, Strategy},
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

fn run_all<I>(solver: &Solver, title: &str, instance: &I)
where
    I: Solvable<i64>,
    I::Solution: std::fmt::Display,
{
    println!("=== {} ===", title);
    for strategy in Strategy::ALL {
        let report = solver.solve_with(instance, strategy);
        println!("{}", report);
    }
}

fn main() -> Result<(), SolverError> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    let solver = Solver::new(config);

    let assignment = AssignmentProblem::from_rows(vec![
        vec![50i64, 70, 30, 60],
        vec![80, 40, 90, 50],
        vec![60, 30, 70, 80],
        vec![70, 80, 60, 40],
    ])?;
    run_all(&solver, "Assignment (maximize profit)", &assignment);

    let knapsack = KnapsackProblem::new(vec![10i64, 20, 30, 40], vec![60, 100, 120, 80], 50)?;
    run_all(&solver, "0/1 Knapsack (capacity 50)", &knapsack);

    let tsp = TspProblem::from_rows(vec![
        vec![0i64, 10, 15, 20, 25],
        vec![10, 0, 35, 25, 30],
        vec![15, 35, 0, 30, 20],
        vec![20, 25, 30, 0, 15],
        vec![25, 30, 20, 15, 0],
    ])?;
    run_all(&solver, "Travelling salesman (5 cities)", &tsp);

    let distribution = DistributionProblem::from_rows(
        vec![
            vec![0i64, 0, 0],
            vec![40, 30, 50],
            vec![70, 80, 90],
            vec![100, 110, 120],
            vec![120, 130, 140],
        ],
        4,
    )?;
    run_all(&solver, "Resource distribution (4 units)", &distribution);

    let greedy = solver.solve_with(&distribution, Strategy::Greedy);
    let exact = solver.solve_with(&distribution, Strategy::BranchAndBound);
    if let (Some(g), Some(e)) = (greedy.solution(), exact.solution()) {
        println!(
            "Greedy distribution reaches {} of the optimal {}.",
            g.objective_value(),
            e.objective_value()
        );
    }

    Ok(())
}
