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

//! Solver configuration.
//!
//! Configuration is plain data that can be written by hand in TOML:
//!
//! ```toml
//! strategy = "branch_and_bound"
//! preallocate = true
//!
//! [log]
//! enabled = true
//! interval_ms = 500
//! clock_check_mask = 1023
//! ```
//!
//! Every field has a default, so an empty document is a valid configuration.

use crate::solver::Strategy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Progress logging of the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LogConfig {
    /// Attach a logging monitor to engine runs.
    pub enabled: bool,

    /// Minimum time between two progress lines, in milliseconds.
    pub interval_ms: u64,

    /// The clock is only read when `nodes & clock_check_mask == 0`.
    /// Must be one less than a power of two.
    pub clock_check_mask: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_ms: 1000,
            clock_check_mask: 4095,
        }
    }
}

impl LogConfig {
    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Strategy used by `Solver::solve`.
    pub strategy: Strategy,

    /// Size the engine's buffers for the instance before searching.
    pub preallocate: bool,

    pub log: LogConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            preallocate: true,
            log: LogConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "log.interval_ms must be positive".to_string(),
            ));
        }
        let mask = self.log.clock_check_mask;
        if !mask.wrapping_add(1).is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "log.clock_check_mask must be one less than a power of two, got {}",
                mask
            )));
        }
        Ok(())
    }

    /// Sets the default strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enables or disables engine progress logging.
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.log.enabled = enabled;
        self
    }

    /// Sets the minimum time between progress lines.
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log.interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Enables or disables buffer preallocation.
    pub fn with_preallocation(mut self, preallocate: bool) -> Self {
        self.preallocate = preallocate;
        self
    }
}
