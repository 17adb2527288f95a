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

//! Text loaders for problem instances.
//!
//! Instances are whitespace-delimited integer streams. Line breaks carry no
//! meaning and everything after a `#` on a line is a comment. Each instance
//! type defines its own token order through `FromTokens`:
//!
//! ```raw
//! assignment:    n  p_1_1 ... p_n_n
//! knapsack:      n capacity  w_1 ... w_n  v_1 ... v_n
//! tsp:           n  d_1_1 ... d_n_n
//! distribution:  max_units columns total_units  g_0_1 ... g_max_columns
//! ```
//!
//! Tables are read row by row. Parsed data goes through the regular
//! constructors, so loaded instances obey the same validation as hand-built
//! ones.

use crate::{
    error::ModelError,
    matrix::Matrix,
    problem::{AssignmentProblem, DistributionProblem, KnapsackProblem, TspProblem},
};
use bramble_core::num::SolverNumeric;
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader, Read},
    marker::PhantomData,
    path::Path,
    str::FromStr,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProblemLoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input while parsing instance")]
    UnexpectedEof,
    #[error("parse error: {0}")]
    Parse(#[from] ParseTokenError),
    #[error("instance dimensions must be non-negative integers")]
    InvalidDimensions,
    #[error("invalid instance: {0}")]
    Model(#[from] ModelError),
}

/// A token that could not be parsed into the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not parse token '{token}' as type {type_name}")]
pub struct ParseTokenError {
    pub token: String,
    pub type_name: &'static str,
}

/// Reads whitespace-delimited tokens, skipping `#` comments.
#[derive(Debug)]
pub struct Scanner<R> {
    rdr: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    pub fn new(rdr: R) -> Self {
        Self {
            rdr,
            pending: VecDeque::new(),
        }
    }

    /// Reads the next token and parses it into `V`.
    pub fn next<V>(&mut self) -> Result<V, ProblemLoaderError>
    where
        V: FromStr,
    {
        let token = self.next_token()?;
        token.parse::<V>().map_err(|_| {
            ProblemLoaderError::Parse(ParseTokenError {
                token,
                type_name: std::any::type_name::<V>(),
            })
        })
    }

    /// Reads a non-negative count.
    pub fn next_count(&mut self) -> Result<usize, ProblemLoaderError> {
        let raw: i64 = self.next()?;
        usize::try_from(raw).map_err(|_| ProblemLoaderError::InvalidDimensions)
    }

    /// Reads `len` values.
    pub fn next_vec<V>(&mut self, len: usize) -> Result<Vec<V>, ProblemLoaderError>
    where
        V: FromStr,
    {
        (0..len).map(|_| self.next()).collect()
    }

    fn next_token(&mut self) -> Result<String, ProblemLoaderError> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            if self.rdr.read_line(&mut line)? == 0 {
                return Err(ProblemLoaderError::UnexpectedEof);
            }
            let content = line.split('#').next().unwrap_or_default();
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }
        self.pending
            .pop_front()
            .ok_or(ProblemLoaderError::UnexpectedEof)
    }
}

/// An instance type that can be read from a token stream.
pub trait FromTokens: Sized {
    fn from_tokens<R: BufRead>(sc: &mut Scanner<R>) -> Result<Self, ProblemLoaderError>;
}

fn read_matrix<T, R>(
    sc: &mut Scanner<R>,
    rows: usize,
    cols: usize,
) -> Result<Matrix<T>, ProblemLoaderError>
where
    T: SolverNumeric + FromStr,
    R: BufRead,
{
    let data = sc.next_vec(rows.checked_mul(cols).ok_or(ProblemLoaderError::InvalidDimensions)?)?;
    Ok(Matrix::new(rows, cols, data)?)
}

impl<T> FromTokens for AssignmentProblem<T>
where
    T: SolverNumeric + FromStr,
{
    fn from_tokens<R: BufRead>(sc: &mut Scanner<R>) -> Result<Self, ProblemLoaderError> {
        let n = sc.next_count()?;
        Ok(AssignmentProblem::new(read_matrix(sc, n, n)?)?)
    }
}

impl<T> FromTokens for KnapsackProblem<T>
where
    T: SolverNumeric + FromStr,
{
    fn from_tokens<R: BufRead>(sc: &mut Scanner<R>) -> Result<Self, ProblemLoaderError> {
        let n = sc.next_count()?;
        let capacity: T = sc.next()?;
        let weights = sc.next_vec(n)?;
        let values = sc.next_vec(n)?;
        Ok(KnapsackProblem::new(weights, values, capacity)?)
    }
}

impl<T> FromTokens for TspProblem<T>
where
    T: SolverNumeric + FromStr,
{
    fn from_tokens<R: BufRead>(sc: &mut Scanner<R>) -> Result<Self, ProblemLoaderError> {
        let n = sc.next_count()?;
        Ok(TspProblem::new(read_matrix(sc, n, n)?)?)
    }
}

impl<T> FromTokens for DistributionProblem<T>
where
    T: SolverNumeric + FromStr,
{
    fn from_tokens<R: BufRead>(sc: &mut Scanner<R>) -> Result<Self, ProblemLoaderError> {
        let max_units = sc.next_count()?;
        let columns = sc.next_count()?;
        let total_units: i64 = sc.next()?;
        let rows = max_units
            .checked_add(1)
            .ok_or(ProblemLoaderError::InvalidDimensions)?;
        let gains = read_matrix(sc, rows, columns)?;
        Ok(DistributionProblem::with_signed_budget(gains, total_units)?)
    }
}

/// Loads instances of type `P` from text.
///
/// ```rust
/// use bramble_model::loading::ProblemLoader;
/// use bramble_model::problem::KnapsackProblem;
///
/// let p: KnapsackProblem<i64> = ProblemLoader::new()
///     .from_str("2 5  # items, capacity\n 2 3\n 4 5")
///     .unwrap();
/// assert_eq!(p.num_items(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProblemLoader<P> {
    _marker: PhantomData<P>,
}

impl<P> Default for ProblemLoader<P> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P> ProblemLoader<P>
where
    P: FromTokens,
{
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<P, ProblemLoaderError> {
        let mut sc = Scanner::new(rdr);
        P::from_tokens(&mut sc)
    }

    #[inline]
    pub fn from_path<Q: AsRef<Path>>(&self, path: Q) -> Result<P, ProblemLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<P, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<P, ProblemLoaderError> {
        self.from_reader(s.as_bytes())
    }
}
