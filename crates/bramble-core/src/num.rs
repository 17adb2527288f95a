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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for objective values. Profits, weights, distances
//! and gains are all carried as a signed primitive integer so the engine can
//! stay generic while keeping exact arithmetic. Accumulation goes through the
//! saturating operations of `num_traits` so pathological inputs clamp
//! instead of wrapping.
//!
//! `i128` is supported but slow on most platforms; tests and the demo use `i64`.

use num_traits::{FromPrimitive, PrimInt, SaturatingMul, Signed, ToPrimitive};
use std::{cmp::Ordering, hash::Hash};

/// A trait alias for the integer types objective values can be expressed in.
/// These are usually the signed integer types `i8`, `i16`, `i32`, `i64` and `isize`.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + ToPrimitive
    + SaturatingMul
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + Hash
{
    /// Converts a count (e.g. a number of remaining cities) into `Self`,
    /// saturating at `Self::max_value()` if it does not fit.
    #[inline]
    fn from_count(count: usize) -> Self {
        Self::from_usize(count).unwrap_or_else(Self::max_value)
    }
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + ToPrimitive
        + SaturatingMul
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + Hash
{
}

/// Sums the values of an iterator with saturating addition.
#[inline]
pub fn saturating_sum<T, I>(values: I) -> T
where
    T: SolverNumeric,
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .fold(T::zero(), |acc, v| acc.saturating_add(v))
}

/// Computes `a * b / c` rounded down for `a, b >= 0` and `c > 0`.
///
/// The product is formed in `i128`. If it does not fit there, or the
/// quotient does not fit back into `T`, the result clamps to
/// `T::max_value()`, which keeps it usable as an upper bound.
#[inline]
pub fn mul_div_floor<T>(a: T, b: T, c: T) -> T
where
    T: SolverNumeric,
{
    debug_assert!(a >= T::zero() && b >= T::zero() && c > T::zero());
    let wide = match (a.to_i128(), b.to_i128(), c.to_i128()) {
        (Some(a), Some(b), Some(c)) => a.checked_mul(b).map(|p| p / c),
        _ => None,
    };
    wide.and_then(T::from_i128).unwrap_or_else(T::max_value)
}

/// Compares the ratios `a / b` and `c / d` exactly, for `a, c >= 0` and
/// `b, d > 0`.
///
/// Works on the continued-fraction expansion of both ratios, so nothing is
/// ever multiplied and no precision is lost for any width of `T`.
pub fn compare_ratios<T>(a: T, b: T, c: T, d: T) -> Ordering
where
    T: SolverNumeric,
{
    debug_assert!(a >= T::zero() && c >= T::zero() && b > T::zero() && d > T::zero());
    let (mut a, mut b, mut c, mut d) = (a, b, c, d);
    loop {
        let (qa, qc) = (a / b, c / d);
        if qa != qc {
            return qa.cmp(&qc);
        }
        let (ra, rc) = (a % b, c % d);
        match (ra.is_zero(), rc.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            // ra/b against rc/d orders the same way as d/rc against b/ra.
            (false, false) => (a, b, c, d) = (d, rc, b, ra),
        }
    }
}
