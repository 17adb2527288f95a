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

//! Bramble-BnB: depth-first branch-and-bound
//!
//! One generic search engine shared by four problem specializations. The
//! engine owns the control loop; a `SearchProblem` supplies the state shape,
//! candidate generation, bounds and leaf scoring.
//!
//! Core flow
//! - Wrap an instance in its search adapter (`problems::*`).
//! - Pick a `SearchMode`: `Exhaustive` disables the bound test and visits
//!   every complete solution, `Bounded` prunes with admissible bounds.
//! - Run `bnb::BnbSolver`, optionally with a `monitor`.
//!
//! Design highlights
//! - State is mutated in place and restored through an undo trail, so only
//!   one path of the tree is materialized at a time.
//! - Pending decisions live on a frame-structured stack instead of the call
//!   stack; depth is bounded by memory, not by recursion limits.
//! - The incumbent only changes on strict improvement, so results are
//!   deterministic given a deterministic candidate order.
//!
//! Assumptions and guarantees
//! - Bounds must be admissible (never worse than the best completion).
//! - A problem attaches bounds to all of its candidates or to none.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `problem`: the contract a problem implements.
//! - `problems`: assignment, knapsack, routing and distribution.
//! - `monitor`: tree-search observers.
//! - `result`: solver outcomes.
//! - `stats`: counters and timing.

pub mod bnb;
pub mod incumbent;
pub mod monitor;
pub mod problem;
pub mod problems;
pub mod result;
mod stack;
pub mod stats;
mod trail;
