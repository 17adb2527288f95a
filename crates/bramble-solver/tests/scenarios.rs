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

//! End-to-end scenarios: instances loaded from text, seeded random instances
//! checked against brute-force references, and cross-strategy properties.

use bramble_model::{
    index::CityIndex,
    loading::ProblemLoader,
    problem::{AssignmentProblem, DistributionProblem, KnapsackProblem, TspProblem},
    result::TerminationReason,
    solution::SolutionRecord,
};
use bramble_solver::{
    config::SolverConfig,
    error::SolverError,
    solver::{Solver, Strategy},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn for_each_permutation(items: &mut Vec<usize>, k: usize, visit: &mut impl FnMut(&[usize])) {
    if k == items.len() {
        visit(items);
        return;
    }
    for i in k..items.len() {
        items.swap(k, i);
        for_each_permutation(items, k + 1, visit);
        items.swap(k, i);
    }
}

fn brute_force_assignment(rows: &[Vec<i64>]) -> i64 {
    let n = rows.len();
    let mut best = i64::MIN;
    let mut perm: Vec<usize> = (0..n).collect();
    for_each_permutation(&mut perm, 0, &mut |p| {
        let total = p.iter().enumerate().map(|(r, &c)| rows[r][c]).sum();
        best = best.max(total);
    });
    best
}

fn brute_force_knapsack(weights: &[i64], values: &[i64], capacity: i64) -> i64 {
    let n = weights.len();
    (0u32..(1 << n))
        .filter_map(|mask| {
            let (w, v) = (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .fold((0, 0), |(w, v), i| (w + weights[i], v + values[i]));
            (w <= capacity).then_some(v)
        })
        .max()
        .unwrap_or(0)
}

fn brute_force_tsp(d: &[Vec<i64>]) -> i64 {
    let n = d.len();
    if n == 1 {
        return d[0][0];
    }
    let mut best = i64::MAX;
    let mut rest: Vec<usize> = (1..n).collect();
    for_each_permutation(&mut rest, 0, &mut |p| {
        let mut cost = d[0][p[0]];
        for w in p.windows(2) {
            cost += d[w[0]][w[1]];
        }
        cost += d[p[p.len() - 1]][0];
        best = best.min(cost);
    });
    best
}

fn brute_force_distribution(gains: &[Vec<i64>], total: usize) -> Option<i64> {
    fn go(gains: &[Vec<i64>], col: usize, remaining: usize) -> Option<i64> {
        let columns = gains[0].len();
        if col == columns {
            return (remaining == 0).then_some(0);
        }
        (0..=remaining.min(gains.len() - 1))
            .filter_map(|u| go(gains, col + 1, remaining - u).map(|g| g + gains[u][col]))
            .max()
    }
    go(gains, 0, total)
}

fn random_rows(rng: &mut ChaCha8Rng, rows: usize, cols: usize, lo: i64, hi: i64) -> Vec<Vec<i64>> {
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.random_range(lo..=hi)).collect())
        .collect()
}

#[test]
fn loaded_instances_solve_to_known_optima() {
    let solver = Solver::default();

    let assignment: AssignmentProblem<i64> = ProblemLoader::new()
        .from_str("4\n50 70 30 60\n80 40 90 50\n60 30 70 80\n70 80 60 40\n")
        .unwrap();
    assert_eq!(solver.solve(&assignment).objective_value(), Some(310));

    let knapsack: KnapsackProblem<i64> = ProblemLoader::new()
        .from_str("# items capacity\n4 50\n10 20 30 40\n60 100 120 80\n")
        .unwrap();
    assert_eq!(solver.solve(&knapsack).objective_value(), Some(220));

    let tsp: TspProblem<i64> = ProblemLoader::new()
        .from_str(
            "5\n0 10 15 20 25\n10 0 35 25 30\n15 35 0 30 20\n20 25 30 0 15\n25 30 20 15 0\n",
        )
        .unwrap();
    assert_eq!(solver.solve(&tsp).objective_value(), Some(85));

    let distribution: DistributionProblem<i64> = ProblemLoader::new()
        .from_str("4 3 4\n0 0 0\n40 30 50\n70 80 90\n100 110 120\n120 130 140\n")
        .unwrap();
    let report = solver.solve(&distribution);
    assert_eq!(report.objective_value(), Some(170));
    assert_eq!(report.solution().unwrap().units(), &[1, 2, 1]);
}

#[test]
fn solve_file_reads_the_token_format() {
    let path = std::env::temp_dir().join(format!("bramble-scenario-{}.txt", std::process::id()));
    std::fs::write(&path, "3 5\n1 2 3\n2 5 6\n").unwrap();
    let solver = Solver::new(SolverConfig::new().with_strategy(Strategy::Exhaustive));
    let report = solver.solve_file::<i64, KnapsackProblem<i64>>(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    // Items 1 and 2 weigh 5 and are worth 11.
    assert_eq!(report.objective_value(), Some(11));
    assert_eq!(report.feasible_solutions(), 7);
}

#[test]
fn malformed_input_is_rejected_before_solving() {
    let solver = Solver::default();
    let path = std::env::temp_dir().join(format!("bramble-bad-{}.txt", std::process::id()));
    std::fs::write(&path, "2\n0 1\n1\n").unwrap();
    let err = solver.solve_file::<i64, TspProblem<i64>>(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(err, SolverError::Loader(_)));

    assert!(TspProblem::<i64>::from_rows(vec![]).is_err());
    assert!(KnapsackProblem::<i64>::new(vec![0], vec![1], 3).is_err());
    assert!(AssignmentProblem::<i64>::from_rows(vec![vec![1, 2]]).is_err());
}

#[test]
fn random_assignment_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let solver = Solver::default();
    for _ in 0..10 {
        let n = rng.random_range(1..=6);
        let rows = random_rows(&mut rng, n, n, -20, 100);
        let expected = brute_force_assignment(&rows);
        let p = AssignmentProblem::from_rows(rows).unwrap();

        let ex = solver.solve_with(&p, Strategy::Exhaustive);
        let bb = solver.solve_with(&p, Strategy::BranchAndBound);
        let greedy = solver.solve_with(&p, Strategy::Greedy);
        assert_eq!(ex.objective_value(), Some(expected));
        assert_eq!(bb.objective_value(), Some(expected));
        assert!(greedy.objective_value().unwrap() <= expected);
        assert!(bb.solution().unwrap().is_permutation());
        assert_eq!(ex.feasible_solutions(), (1..=n as u64).product::<u64>());
        assert!(bb.feasible_solutions() <= ex.feasible_solutions());
    }
}

#[test]
fn random_knapsack_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let solver = Solver::default();
    for _ in 0..10 {
        let n = rng.random_range(0..=12);
        let weights: Vec<i64> = (0..n).map(|_| rng.random_range(1..=25)).collect();
        let values: Vec<i64> = (0..n).map(|_| rng.random_range(0..=40)).collect();
        let capacity = rng.random_range(0..=80);
        let expected = brute_force_knapsack(&weights, &values, capacity);
        let p = KnapsackProblem::new(weights, values, capacity).unwrap();

        let ex = solver.solve_with(&p, Strategy::Exhaustive);
        let bb = solver.solve_with(&p, Strategy::BranchAndBound);
        let greedy = solver.solve_with(&p, Strategy::Greedy);
        assert_eq!(ex.objective_value(), Some(expected));
        assert_eq!(bb.objective_value(), Some(expected));
        assert!(greedy.objective_value().unwrap() <= expected);

        let best = bb.solution().unwrap();
        assert!(best.total_weight() <= capacity);
        assert_eq!(p.total_weight(best.items()), best.total_weight());
        assert!(bb.feasible_solutions() <= ex.feasible_solutions());
    }
}

#[test]
fn knapsack_with_large_values_is_solved_exactly() {
    let weights = vec![9_000_000_000i64, 8_000_000_000, 2_000_000_000, 7_000_000_000];
    let values = vec![10_000_000_000i64, 6_000_000_000, 3_000_000_000, 3_000_000_000];
    let capacity = 8_000_000_000;
    let expected = brute_force_knapsack(&weights, &values, capacity);
    assert_eq!(expected, 6_000_000_000);

    let p = KnapsackProblem::new(weights, values, capacity).unwrap();
    let solver = Solver::default();
    let ex = solver.solve_with(&p, Strategy::Exhaustive);
    let bb = solver.solve_with(&p, Strategy::BranchAndBound);
    assert_eq!(ex.objective_value(), Some(expected));
    assert_eq!(bb.objective_value(), Some(expected));
    assert_eq!(bb.termination_reason(), TerminationReason::OptimalityProven);

    let greedy = solver.solve_with(&p, Strategy::Greedy);
    assert_eq!(greedy.objective_value(), Some(3_000_000_000));
}

#[test]
fn random_tsp_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let solver = Solver::default();
    for _ in 0..10 {
        let n = rng.random_range(1..=7);
        let mut d = random_rows(&mut rng, n, n, 1, 60);
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = 0;
        }
        let expected = brute_force_tsp(&d);
        let p = TspProblem::from_rows(d).unwrap();

        let ex = solver.solve_with(&p, Strategy::Exhaustive);
        let bb = solver.solve_with(&p, Strategy::BranchAndBound);
        let greedy = solver.solve_with(&p, Strategy::Greedy);
        assert_eq!(ex.objective_value(), Some(expected));
        assert_eq!(bb.objective_value(), Some(expected));
        assert!(greedy.objective_value().unwrap() >= expected);

        for report in [&ex, &bb, &greedy] {
            let tour = report.solution().unwrap();
            assert!(tour.is_hamiltonian_cycle(n, CityIndex::new(0)));
            assert_eq!(p.tour_cost(tour.cities()), tour.objective_value());
        }
        assert_eq!(
            ex.feasible_solutions(),
            (1..n.max(1) as u64).product::<u64>()
        );
    }
}

#[test]
fn random_distribution_matches_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let solver = Solver::default();
    for _ in 0..12 {
        let max_units = rng.random_range(1..=4);
        let columns = rng.random_range(1..=4);
        let mut gains = random_rows(&mut rng, max_units + 1, columns, 0, 50);
        gains[0].iter_mut().for_each(|g| *g = 0);
        let total = rng.random_range(0..=max_units * columns + 2);
        let expected = brute_force_distribution(&gains, total);
        let p = DistributionProblem::from_rows(gains, total).unwrap();

        let ex = solver.solve_with(&p, Strategy::Exhaustive);
        let bb = solver.solve_with(&p, Strategy::BranchAndBound);
        let greedy = solver.solve_with(&p, Strategy::Greedy);
        assert_eq!(ex.objective_value(), expected);
        assert_eq!(bb.objective_value(), expected);

        match expected {
            Some(best) => {
                let units = bb.solution().unwrap();
                assert_eq!(units.total_units(), total);
                assert!(units.units().iter().all(|&u| u <= max_units));
                assert!(greedy.objective_value().unwrap() <= best);
                assert_eq!(bb.termination_reason(), TerminationReason::OptimalityProven);
            }
            None => {
                assert!(ex.result().is_infeasible());
                assert!(greedy.result().is_infeasible());
                assert_eq!(bb.termination_reason(), TerminationReason::InfeasibilityProven);
            }
        }
    }
}
