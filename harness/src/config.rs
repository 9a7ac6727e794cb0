//! Run configuration: which algorithm, under which budget, recorded where.
//!
//! The harness derives the [`SearchPolicy`] from a [`RunConfig`]; callers
//! never build a policy by hand for a harness run.

use std::path::PathBuf;

use tourbound_search::bound::BoundKind;
use tourbound_search::policy::{SearchPolicy, DEFAULT_TIME_BUDGET};

use crate::runner::RunError;

/// The algorithm a run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Exact branch-and-bound search.
    #[default]
    BranchAndBound,
    /// MST preorder 2-approximation. Complete graphs only.
    TwiceAroundTree,
    /// MST plus odd-node matching, 1.5-approximation. Complete graphs only.
    Christofides,
}

impl Algorithm {
    /// Stable name used in record text, JSON and file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BranchAndBound => "branch-and-bound",
            Self::TwiceAroundTree => "twice-around-the-tree",
            Self::Christofides => "christofides",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one harness run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Wall-clock budget in seconds for branch-and-bound. Ignored by the
    /// baselines, which always run to completion.
    pub timeout_secs: f64,
    pub algorithm: Algorithm,
    /// Lower-bound estimator for branch-and-bound.
    pub bound: BoundKind,
    /// Attach a peak-memory collector to branch-and-bound runs.
    pub track_memory: bool,
    /// Known optimal cost of the instance, copied into the record.
    pub optimal_cost: Option<f64>,
    /// Directory records are written to. `None` keeps them in memory only.
    pub output_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIME_BUDGET.as_secs_f64(),
            algorithm: Algorithm::default(),
            bound: BoundKind::default(),
            track_memory: false,
            optimal_cost: None,
            output_dir: None,
        }
    }
}

impl RunConfig {
    /// Check the numeric fields.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::InvalidConfig`] if the timeout is negative or not
    /// finite, or if the known optimal cost is negative or not finite.
    pub fn validate(&self) -> Result<(), RunError> {
        if !self.timeout_secs.is_finite() || self.timeout_secs < 0.0 {
            return Err(RunError::InvalidConfig {
                detail: format!(
                    "timeout must be finite and non-negative, got {}",
                    self.timeout_secs
                ),
            });
        }
        if let Some(opt) = self.optimal_cost {
            if !opt.is_finite() || opt < 0.0 {
                return Err(RunError::InvalidConfig {
                    detail: format!("optimal cost must be finite and non-negative, got {opt}"),
                });
            }
        }
        Ok(())
    }

    /// Search policy for a branch-and-bound run under this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Search`] if the timeout does not form a valid
    /// budget.
    pub fn search_policy(&self) -> Result<SearchPolicy, RunError> {
        Ok(SearchPolicy::with_timeout_secs(self.timeout_secs)?)
    }
}
