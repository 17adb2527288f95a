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

use crate::config::ConfigError;
use bramble_model::{error::ModelError, loading::ProblemLoaderError};
use thiserror::Error;

/// Everything that can go wrong before a search starts.
///
/// Solving itself never fails: an instance without a valid solution is
/// reported as `SolverResult::Infeasible`.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid instance: {0}")]
    Model(#[from] ModelError),

    #[error("failed to load instance: {0}")]
    Loader(#[from] ProblemLoaderError),

    #[error("invalid solver configuration: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_and_messages() {
        let err: SolverError = ModelError::NoCities.into();
        assert!(matches!(err, SolverError::Model(ModelError::NoCities)));
        assert!(err.to_string().starts_with("invalid instance"));

        let err: SolverError = ConfigError::Invalid("bad".to_string()).into();
        assert!(err.to_string().contains("bad"));

        let err: SolverError = ProblemLoaderError::UnexpectedEof.into();
        assert!(matches!(err, SolverError::Loader(_)));
    }
}
