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

use std::time::Duration;

/// Statistics collected during one run of the branch-and-bound engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Total nodes visited, root included.
    pub nodes_explored: u64,
    /// Total levels closed, whether after a leaf, a prune or exhaustion.
    pub backtracks: u64,
    /// Total candidates generated.
    pub decisions_generated: u64,
    /// The deepest level reached; the root is level 0.
    pub max_depth: u64,
    /// States without any valid completion, including rejected leaves.
    pub prunings_infeasible: u64,
    /// Subtrees skipped because their bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Sorted siblings skipped together with a failing candidate.
    pub siblings_skipped: u64,
    /// Complete valid solutions visited.
    pub feasible_solutions: u64,
    /// Times the incumbent was replaced.
    pub solutions_found: u64,
    /// The bound of the root node, when the run computed one.
    pub root_bound: Option<T>,
    pub time_total: Duration,
}

impl<T> Default for BnbSolverStatistics<T> {
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            backtracks: 0,
            decisions_generated: 0,
            max_depth: 0,
            prunings_infeasible: 0,
            prunings_bound: 0,
            siblings_skipped: 0,
            feasible_solutions: 0,
            solutions_found: 0,
            root_bound: None,
            time_total: Duration::ZERO,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_decisions_generated(&mut self, count: usize) {
        self.decisions_generated = self.decisions_generated.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_siblings_skipped(&mut self, count: usize) {
        self.siblings_skipped = self.siblings_skipped.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_feasible_solution(&mut self) {
        self.feasible_solutions = self.feasible_solutions.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_root_bound(&mut self, bound: T) {
        self.root_bound = Some(bound);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bramble-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:   {}", self.decisions_generated)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Siblings skipped:      {}", self.siblings_skipped)?;
        writeln!(f, "  Feasible solutions:    {}", self.feasible_solutions)?;
        writeln!(f, "  Incumbent updates:     {}", self.solutions_found)?;
        match &self.root_bound {
            Some(b) => writeln!(f, "  Root bound:            {}", b)?,
            None => writeln!(f, "  Root bound:            -")?,
        }
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut s: BnbSolverStatistics<i64> = BnbSolverStatistics::default();
        s.on_node_explored();
        s.on_node_explored();
        s.on_backtrack();
        s.on_decisions_generated(3);
        s.on_depth_update(4);
        s.on_depth_update(2);
        s.on_pruning_bound();
        s.on_pruning_infeasible();
        s.on_siblings_skipped(5);
        s.on_feasible_solution();
        s.on_solution_found();
        s.set_root_bound(42);

        assert_eq!(s.nodes_explored, 2);
        assert_eq!(s.backtracks, 1);
        assert_eq!(s.decisions_generated, 3);
        assert_eq!(s.max_depth, 4);
        assert_eq!(s.prunings_bound, 1);
        assert_eq!(s.prunings_infeasible, 1);
        assert_eq!(s.siblings_skipped, 5);
        assert_eq!(s.feasible_solutions, 1);
        assert_eq!(s.solutions_found, 1);
        assert_eq!(s.root_bound, Some(42));
    }

    #[test]
    fn test_display_lists_counters() {
        let s: BnbSolverStatistics<i64> = BnbSolverStatistics::default();
        let out = format!("{}", s);
        assert!(out.contains("Nodes explored:"));
        assert!(out.contains("Root bound:            -"));
    }
}
