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

//! # Bramble Model
//!
//! Immutable problem data for the four problems the bramble solvers handle:
//! one-to-one assignment, 0/1 knapsack, travelling-salesman routing and
//! single-resource distribution. Instances are validated on construction, so
//! every search receives data whose dimensions are consistent.
//!
//! Module map
//! - `matrix`: dense row-major objective tables.
//! - `problem`: the four validated instance types.
//! - `solution`: problem-specific solution records.
//! - `result`: solver results and termination reasons.
//! - `loading`: whitespace-delimited text loaders.
//! - `error`: the validation error type.

pub mod error;
pub mod index;
pub mod loading;
pub mod matrix;
pub mod problem;
pub mod result;
pub mod solution;
