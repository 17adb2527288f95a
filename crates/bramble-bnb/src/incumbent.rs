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

//! The best complete solution of a search run.
//!
//! The incumbent starts empty, which acts as minus infinity for maximization
//! and plus infinity for minimization: any bound can improve on it. It is
//! replaced only by strictly better solutions, so among equal-valued
//! solutions the first one found wins.

use crate::problem::ObjectiveSense;
use bramble_core::num::SolverNumeric;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incumbent<T, S> {
    sense: ObjectiveSense,
    best_objective: Option<T>,
    best_solution: Option<S>,
    feasible_count: u64,
}

impl<T, S> Incumbent<T, S>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new(sense: ObjectiveSense) -> Self {
        Self {
            sense,
            best_objective: None,
            best_solution: None,
            feasible_count: 0,
        }
    }

    #[inline]
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    /// Whether a subtree bounded by `bound` may still contain a strictly
    /// better solution.
    #[inline]
    pub fn can_improve(&self, bound: T) -> bool {
        match self.best_objective {
            None => true,
            Some(best) => self.sense.is_better(bound, best),
        }
    }

    /// Counts one complete valid solution.
    #[inline]
    pub fn record_feasible(&mut self) {
        self.feasible_count = self.feasible_count.saturating_add(1);
    }

    /// Installs a new best solution.
    #[inline]
    pub fn install(&mut self, objective: T, solution: S) {
        debug_assert!(
            self.can_improve(objective),
            "called `Incumbent::install` with a non-improving objective {}",
            objective
        );
        self.best_objective = Some(objective);
        self.best_solution = Some(solution);
    }

    #[inline]
    pub fn best_objective(&self) -> Option<T> {
        self.best_objective
    }

    #[inline]
    pub fn best_solution(&self) -> Option<&S> {
        self.best_solution.as_ref()
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        self.best_solution.is_some()
    }

    #[inline]
    pub fn feasible_count(&self) -> u64 {
        self.feasible_count
    }

    /// Consumes the incumbent, returning its solution and feasible count.
    #[inline]
    pub fn into_parts(self) -> (Option<S>, u64) {
        (self.best_solution, self.feasible_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_incumbent_accepts_everything() {
        let max: Incumbent<i64, ()> = Incumbent::new(ObjectiveSense::Maximize);
        assert!(max.can_improve(i64::MIN));
        let min: Incumbent<i64, ()> = Incumbent::new(ObjectiveSense::Minimize);
        assert!(min.can_improve(i64::MAX));
        assert!(!max.has_solution());
    }

    #[test]
    fn test_ties_do_not_improve() {
        let mut inc = Incumbent::new(ObjectiveSense::Maximize);
        inc.install(10i64, "first");
        assert!(!inc.can_improve(10));
        assert!(inc.can_improve(11));
        assert_eq!(inc.best_solution(), Some(&"first"));

        let mut inc = Incumbent::new(ObjectiveSense::Minimize);
        inc.install(10i64, "first");
        assert!(!inc.can_improve(10));
        assert!(inc.can_improve(9));
    }

    #[test]
    fn test_feasible_count_and_parts() {
        let mut inc = Incumbent::new(ObjectiveSense::Maximize);
        inc.record_feasible();
        inc.record_feasible();
        inc.install(3i64, vec![1, 2]);
        assert_eq!(inc.feasible_count(), 2);
        assert_eq!(inc.best_objective(), Some(3));
        let (solution, count) = inc.into_parts();
        assert_eq!(solution, Some(vec![1, 2]));
        assert_eq!(count, 2);
    }
}
