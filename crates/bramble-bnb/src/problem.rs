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

//! The contract between the engine and a concrete problem.
//!
//! A `SearchProblem` describes a tree: an initial state, the candidates that
//! extend a state, how to apply and revert one candidate, when a state is a
//! complete solution and what it is worth. In bounded mode it also provides
//! an optimistic estimate of the best completion of a state.

use bramble_core::num::SolverNumeric;
use std::cmp::Ordering;

/// How the engine treats bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Visit every complete solution. Bounds are never consulted.
    Exhaustive,
    /// Skip subtrees whose bound cannot beat the incumbent.
    Bounded,
}

impl SearchMode {
    #[inline]
    pub fn is_bounded(self) -> bool {
        matches!(self, SearchMode::Bounded)
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Exhaustive => write!(f, "Exhaustive"),
            SearchMode::Bounded => write!(f, "Bounded"),
        }
    }
}

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectiveSense {
    Maximize,
    Minimize,
}

impl ObjectiveSense {
    /// Whether `candidate` is strictly better than `reference`.
    #[inline]
    pub fn is_better<T: Ord>(self, candidate: T, reference: T) -> bool {
        match self {
            ObjectiveSense::Maximize => candidate > reference,
            ObjectiveSense::Minimize => candidate < reference,
        }
    }

    /// Orders two values so that the better one comes first.
    #[inline]
    pub fn best_first<T: Ord>(self, a: &T, b: &T) -> Ordering {
        match self {
            ObjectiveSense::Maximize => b.cmp(a),
            ObjectiveSense::Minimize => a.cmp(b),
        }
    }
}

impl std::fmt::Display for ObjectiveSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveSense::Maximize => write!(f, "Maximize"),
            ObjectiveSense::Minimize => write!(f, "Minimize"),
        }
    }
}

/// A branching choice, optionally carrying the bound of the child it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate<D, T> {
    pub decision: D,
    pub bound: Option<T>,
}

impl<D, T> Candidate<D, T> {
    /// A candidate without a bound.
    #[inline]
    pub fn new(decision: D) -> Self {
        Self {
            decision,
            bound: None,
        }
    }

    /// A candidate whose child is known to be bounded by `bound`.
    #[inline]
    pub fn with_bound(decision: D, bound: T) -> Self {
        Self {
            decision,
            bound: Some(bound),
        }
    }
}

/// A problem the branch-and-bound engine can search.
///
/// Implementations must keep `apply` and `undo` exact inverses: after
/// `let u = apply(s, d); undo(s, u)` the state is indistinguishable from
/// before. `bound` must be admissible: no completion of the state may be
/// better than the value it returns. Returning `None` from `bound` declares
/// that the state has no valid completion at all.
pub trait SearchProblem<T>
where
    T: SolverNumeric,
{
    /// The mutable partial solution.
    type State;
    /// One branching choice.
    type Decision: Copy + std::fmt::Debug;
    /// What `undo` needs to revert one `apply`.
    type Undo;
    /// The record extracted at an improving leaf.
    type Solution;

    fn name(&self) -> &str;

    fn sense(&self) -> ObjectiveSense;

    /// The empty partial solution the search starts from.
    fn initial_state(&self, mode: SearchMode) -> Self::State;

    /// Whether every stage of the state has been decided.
    fn is_leaf(&self, state: &Self::State) -> bool;

    /// The objective of a complete state, or `None` if the completed state is
    /// not a valid solution.
    fn leaf_objective(&self, state: &Self::State) -> Option<T>;

    /// An optimistic estimate of the best objective reachable from `state`.
    fn bound(&self, state: &Self::State) -> Option<T>;

    /// Pushes the legal candidates of a non-leaf state into `out`, in the
    /// order they should be visited.
    fn branch(
        &self,
        state: &Self::State,
        mode: SearchMode,
        out: &mut Vec<Candidate<Self::Decision, T>>,
    );

    fn apply(&self, state: &mut Self::State, decision: Self::Decision) -> Self::Undo;

    fn undo(&self, state: &mut Self::State, undo: Self::Undo);

    /// Snapshots a complete state worth `objective`.
    fn extract_solution(&self, state: &Self::State, objective: T) -> Self::Solution;

    /// The maximum depth of the tree, used for preallocation.
    fn max_depth(&self) -> usize;

    /// The maximum number of candidates of one node, used for preallocation.
    fn max_branching(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_better_is_strict() {
        assert!(ObjectiveSense::Maximize.is_better(5, 4));
        assert!(!ObjectiveSense::Maximize.is_better(4, 4));
        assert!(ObjectiveSense::Minimize.is_better(3, 4));
        assert!(!ObjectiveSense::Minimize.is_better(4, 4));
    }

    #[test]
    fn test_best_first_sorting_is_stable() {
        let mut v = vec![(2, 'a'), (5, 'b'), (2, 'c'), (7, 'd')];
        v.sort_by(|x, y| ObjectiveSense::Maximize.best_first(&x.0, &y.0));
        assert_eq!(v, vec![(7, 'd'), (5, 'b'), (2, 'a'), (2, 'c')]);
        v.sort_by(|x, y| ObjectiveSense::Minimize.best_first(&x.0, &y.0));
        assert_eq!(v, vec![(2, 'a'), (2, 'c'), (5, 'b'), (7, 'd')]);
    }

    #[test]
    fn test_candidate_constructors() {
        let c: Candidate<usize, i64> = Candidate::new(3);
        assert_eq!(c.bound, None);
        let c = Candidate::with_bound(3usize, 9i64);
        assert_eq!(c.bound, Some(9));
        assert!(SearchMode::Bounded.is_bounded());
        assert!(!SearchMode::Exhaustive.is_bounded());
    }
}
