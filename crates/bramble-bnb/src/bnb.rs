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

//! Depth-first branch-and-bound engine.
//!
//! `BnbSolver` runs any `SearchProblem` to completion and returns the best
//! complete solution together with the number of complete solutions it
//! visited. The same traversal serves both modes: `Exhaustive` never looks at
//! bounds and so visits the whole solution space, `Bounded` skips every
//! subtree whose bound cannot strictly beat the incumbent.
//!
//! The recursion is flattened into two frame-structured buffers owned by the
//! solver: a stack of pending candidates and a trail of undo tokens. One
//! frame of each is opened per descent and closed per backtrack, so the state
//! is always restored in strict stack order. Both buffers are cleared but
//! keep their capacity after a run, which makes repeated solves cheap.

use crate::{
    incumbent::Incumbent,
    monitor::{
        no_op::NoOperationMonitor,
        tree_search_monitor::{PruneReason, TreeSearchMonitor},
    },
    problem::{Candidate, SearchMode, SearchProblem},
    result::BnbSolverOutcome,
    stack::SearchStack,
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use bramble_core::num::SolverNumeric;
use bramble_model::result::TerminationReason;
use tracing::debug;

type CandidateOf<T, P> = Candidate<<P as SearchProblem<T>>::Decision, T>;

/// A branch-and-bound solver for problems of type `P`.
///
/// Note that this is just the execution engine: what the tree looks like,
/// how candidates are ordered and how states are bounded is entirely up to
/// the `SearchProblem`.
pub struct BnbSolver<T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    trail: SearchTrail<P::Undo>,
    stack: SearchStack<CandidateOf<T, P>>,
    candidates: Vec<CandidateOf<T, P>>,
}

impl<T, P> Default for BnbSolver<T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P> std::fmt::Debug for BnbSolver<T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BnbSolver")
            .field("trail", &format_args!("{}", self.trail))
            .field("stack", &format_args!("{}", self.stack))
            .finish()
    }
}

impl<T, P> BnbSolver<T, P>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
            candidates: Vec::new(),
        }
    }

    /// Creates a solver with buffers sized for a tree of the given depth and
    /// fan-out.
    ///
    /// # Note
    ///
    /// Every solve ensures sufficient capacity for its problem anyway; this
    /// only moves the allocations to construction time.
    #[inline]
    pub fn preallocated(max_depth: usize, max_branching: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(max_depth),
            stack: SearchStack::preallocated(max_depth, max_branching),
            candidates: Vec::with_capacity(max_branching),
        }
    }

    /// Searches `problem` in the given mode without observers.
    #[inline]
    pub fn solve(&mut self, problem: &P, mode: SearchMode) -> BnbSolverOutcome<P::Solution, T> {
        self.solve_with_monitor(problem, mode, NoOperationMonitor)
    }

    /// Searches `problem` in the given mode, reporting every event to
    /// `monitor`. Pass `&mut monitor` to inspect it afterwards.
    pub fn solve_with_monitor<M>(
        &mut self,
        problem: &P,
        mode: SearchMode,
        mut monitor: M,
    ) -> BnbSolverOutcome<P::Solution, T>
    where
        M: TreeSearchMonitor<T, P>,
    {
        let session = BnbSolverSearchSession::new(self, problem, mode, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// The memory currently held by the solver's buffers in bytes.
    #[inline]
    pub fn allocated_memory_bytes(&self) -> usize {
        self.trail.allocated_memory_bytes()
            + self.stack.allocated_memory_bytes()
            + self.candidates.capacity() * std::mem::size_of::<CandidateOf<T, P>>()
    }

    /// Clears the buffers, keeping their allocations.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
        self.candidates.clear();
    }
}

/// The state and logic of a single search run.
struct BnbSolverSearchSession<'a, T, P, M>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    solver: &'a mut BnbSolver<T, P>,
    problem: &'a P,
    mode: SearchMode,
    monitor: &'a mut M,
    state: P::State,
    incumbent: Incumbent<T, P::Solution>,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, T, P, M> std::fmt::Display for BnbSolverSearchSession<'a, T, P, M>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let best = match self.incumbent.best_objective() {
            Some(b) => b.to_string(),
            None => "none".to_string(),
        };
        write!(
            f,
            "SearchSession(problem: {}, mode: {}, best_objective: {}, feasible: {}, nodes: {})",
            self.problem.name(),
            self.mode,
            best,
            self.incumbent.feasible_count(),
            self.stats.nodes_explored
        )
    }
}

impl<'a, T, P, M> BnbSolverSearchSession<'a, T, P, M>
where
    T: SolverNumeric,
    P: SearchProblem<T>,
    M: TreeSearchMonitor<T, P>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T, P>,
        problem: &'a P,
        mode: SearchMode,
        monitor: &'a mut M,
    ) -> Self {
        Self {
            solver,
            problem,
            mode,
            monitor,
            state: problem.initial_state(mode),
            incumbent: Incumbent::new(problem.sense()),
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    fn run(mut self) -> BnbSolverOutcome<P::Solution, T> {
        debug!(problem = self.problem.name(), mode = %self.mode, "branch-and-bound started");
        self.monitor
            .on_enter_search(self.problem, self.mode, &self.stats);

        self.initialize();

        let termination_reason = loop {
            if self.solver.stack.is_current_level_empty() {
                if self.solver.stack.depth() <= 1 {
                    break if self.incumbent.has_solution() {
                        TerminationReason::OptimalityProven
                    } else {
                        TerminationReason::InfeasibilityProven
                    };
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        debug!("{}", self);
        self.finalize_result(termination_reason)
    }

    /// Consumes the session and packs the incumbent into an outcome.
    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome<P::Solution, T> {
        let (solution, feasible_count) = self.incumbent.into_parts();
        match (reason, solution) {
            (TerminationReason::OptimalityProven, Some(solution)) => {
                BnbSolverOutcome::optimal(solution, feasible_count, self.stats)
            }
            _ => BnbSolverOutcome::infeasible(self.stats),
        }
    }

    /// Opens the root frame and expands the root.
    fn initialize(&mut self) {
        let max_depth = self.problem.max_depth();
        let max_branching = self.problem.max_branching();
        self.solver.trail.ensure_capacity(max_depth);
        self.solver.stack.ensure_capacity(max_depth, max_branching);
        if self.solver.candidates.capacity() < max_branching {
            self.solver
                .candidates
                .reserve(max_branching - self.solver.candidates.len());
        }

        // Root frame. Crucial to have this before pushing decisions!
        self.solver.trail.push_frame();
        self.solver.stack.push_frame();
        self.stats.on_node_explored();

        if self.problem.is_leaf(&self.state) {
            self.handle_leaf();
            return;
        }

        if self.mode.is_bounded() {
            match self.problem.bound(&self.state) {
                Some(bound) => {
                    self.stats.set_root_bound(bound);
                    self.monitor
                        .on_bound_computed(&self.state, bound, &self.stats);
                }
                None => {
                    self.stats.on_pruning_infeasible();
                    self.monitor
                        .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
                    return;
                }
            }
        }

        self.expand();
    }

    /// Closes the current level and reverts the decision that opened it.
    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        let problem = self.problem;
        let state = &mut self.state;
        self.solver.trail.backtrack(|undo| problem.undo(state, undo));
        self.solver.stack.pop_frame();
    }

    /// Pops the next candidate of the current level and either descends into
    /// it or, if its bound already fails, drops it with all its siblings.
    #[inline]
    fn process_next_decision(&mut self) {
        let Some(candidate) = self.solver.stack.pop() else {
            return;
        };

        if self.mode.is_bounded() {
            if let Some(bound) = candidate.bound {
                if !self.incumbent.can_improve(bound) {
                    // Siblings are sorted best-first, none of them can do better.
                    let skipped = self.solver.stack.clear_current_level();
                    self.stats.on_pruning_bound();
                    self.stats.on_siblings_skipped(skipped);
                    self.monitor
                        .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
                    return;
                }
            }
        }

        self.descend(candidate);
    }

    /// Applies a candidate, opens a new level and evaluates the child.
    fn descend(&mut self, candidate: CandidateOf<T, P>) {
        self.solver.trail.push_frame();
        let undo = self.problem.apply(&mut self.state, candidate.decision);
        self.solver.trail.record(undo);
        self.solver.stack.push_frame();

        self.stats.on_node_explored();
        self.stats
            .on_depth_update(self.solver.stack.depth().saturating_sub(1) as u64);
        self.monitor
            .on_descend(&self.state, &candidate.decision, &self.stats);

        if self.problem.is_leaf(&self.state) {
            // The empty level is closed by the main loop.
            self.handle_leaf();
            return;
        }

        if self.mode.is_bounded() && self.should_backtrack_after_descend(candidate.bound) {
            self.backtrack_step();
            return;
        }

        self.expand();
    }

    /// Node-level bound test. A bound carried by the candidate is reused.
    #[inline]
    fn should_backtrack_after_descend(&mut self, carried: Option<T>) -> bool {
        let bound = match carried.or_else(|| self.problem.bound(&self.state)) {
            Some(bound) => bound,
            None => {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
                return true;
            }
        };

        self.monitor
            .on_bound_computed(&self.state, bound, &self.stats);

        if !self.incumbent.can_improve(bound) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
            return true;
        }
        false
    }

    /// Generates the children of the current state and pushes them so that
    /// the first one to visit ends up on top.
    fn expand(&mut self) {
        let mut candidates = std::mem::take(&mut self.solver.candidates);
        candidates.clear();
        self.problem.branch(&self.state, self.mode, &mut candidates);

        debug_assert!(
            candidates.iter().all(|c| c.bound.is_some())
                || candidates.iter().all(|c| c.bound.is_none()),
            "problem '{}' attached bounds to only some of its candidates",
            self.problem.name()
        );

        if self.mode.is_bounded() && candidates.first().is_some_and(|c| c.bound.is_some()) {
            let sense = self.incumbent.sense();
            candidates.sort_by(|a, b| sense.best_first(&a.bound, &b.bound));
        }

        let count = candidates.len();
        self.solver.stack.extend(candidates.drain(..).rev());
        self.solver.candidates = candidates;

        self.stats.on_decisions_generated(count);
        self.monitor
            .on_decisions_enqueued(&self.state, count, &self.stats);
    }

    /// Scores a complete state and installs it if it strictly improves.
    fn handle_leaf(&mut self) {
        let Some(objective) = self.problem.leaf_objective(&self.state) else {
            self.stats.on_pruning_infeasible();
            self.monitor
                .on_prune(&self.state, PruneReason::Infeasible, &self.stats);
            return;
        };

        self.incumbent.record_feasible();
        self.stats.on_feasible_solution();

        if self.incumbent.can_improve(objective) {
            let solution = self.problem.extract_solution(&self.state, objective);
            self.stats.on_solution_found();
            self.monitor
                .on_solution_found(&solution, objective, &self.stats);
            debug!(objective = %objective, nodes = self.stats.nodes_explored, "new incumbent");
            self.incumbent.install(objective, solution);
        }
    }
}
