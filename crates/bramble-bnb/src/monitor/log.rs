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

//! Progress logging for long searches.
//!
//! `LogTreeSearchMonitor` emits one structured `tracing` event per
//! `log_interval` while the search runs, plus one event per incumbent
//! improvement and a summary at exit. The wall clock is only read when the
//! node counter has all bits of `clock_check_mask` cleared, which keeps the
//! hot loop free of syscalls.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    problem::{SearchMode, SearchProblem},
    stats::BnbSolverStatistics,
};
use bramble_core::num::SolverNumeric;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_objective: Option<T>,
    lines_logged: u64,
}

impl<T> LogTreeSearchMonitor<T> {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            best_objective: None,
            lines_logged: 0,
        }
    }

    #[inline]
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    #[inline]
    pub fn clock_check_mask(&self) -> u64 {
        self.clock_check_mask
    }

    /// The number of progress events emitted during the last run.
    #[inline]
    pub fn lines_logged(&self) -> u64 {
        self.lines_logged
    }
}

impl<T> LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn log_progress(&mut self, stats: &BnbSolverStatistics<T>, depth_hint: u64) {
        let now = Instant::now();
        let best = self
            .best_objective
            .map_or_else(|| "-".to_string(), |b| b.to_string());
        info!(
            elapsed_s = now.duration_since(self.start_time).as_secs_f32(),
            nodes = stats.nodes_explored,
            depth = depth_hint,
            best = %best,
            backtracks = stats.backtracks,
            pruned_bound = stats.prunings_bound,
            pruned_infeasible = stats.prunings_infeasible,
            feasible = stats.feasible_solutions,
            "search progress"
        );
        self.last_log_time = now;
        self.lines_logged = self.lines_logged.saturating_add(1);
    }
}

impl<T> Default for LogTreeSearchMonitor<T> {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl<T, P> TreeSearchMonitor<T, P> for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, problem: &P, mode: SearchMode, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_objective = None;
        self.lines_logged = 0;
        info!(problem = problem.name(), mode = %mode, "search started");
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        let best = self
            .best_objective
            .map_or_else(|| "-".to_string(), |b| b.to_string());
        info!(
            elapsed_s = self.start_time.elapsed().as_secs_f32(),
            nodes = statistics.nodes_explored,
            feasible = statistics.feasible_solutions,
            best = %best,
            "search finished"
        );
    }

    fn on_bound_computed(&mut self, _state: &P::State, _bound: T, _statistics: &BnbSolverStatistics<T>) {}

    fn on_prune(&mut self, _state: &P::State, _reason: PruneReason, _statistics: &BnbSolverStatistics<T>) {}

    fn on_decisions_enqueued(
        &mut self,
        _state: &P::State,
        _count: usize,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_descend(
        &mut self,
        _state: &P::State,
        _decision: &P::Decision,
        statistics: &BnbSolverStatistics<T>,
    ) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress(statistics, statistics.max_depth);
        }
    }

    fn on_backtrack(&mut self, _state: &P::State, _statistics: &BnbSolverStatistics<T>) {}

    fn on_solution_found(
        &mut self,
        _solution: &P::Solution,
        objective: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        self.best_objective = Some(objective);
        debug!(
            objective = %objective,
            nodes = statistics.nodes_explored,
            "new incumbent"
        );
    }
}
