//! Search policy types.

use std::time::Duration;

use tourbound_kernel::proof::canon::{canonical_json_bytes, CanonError};
use tourbound_kernel::proof::hash::{canonical_hash, ContentHash};
use tourbound_kernel::proof::hash_domain::HashDomain;

use crate::error::SearchError;
use crate::frontier::FrontierOrder;

/// Time budget applied when the caller does not choose one: 30 minutes.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_secs(1800);

/// Schema tag embedded in the policy JSON.
pub const SEARCH_POLICY_SCHEMA: &str = "tourbound.search_policy.v1";

/// Whether children are filtered by their bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruneMode {
    /// Drop a popped state or child whose bound is not below the incumbent.
    #[default]
    Bound,
    /// Never prune. Explores every Hamiltonian path prefix; for
    /// cross-checking small instances only.
    Disabled,
}

impl PruneMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bound => "bound",
            Self::Disabled => "disabled",
        }
    }
}

/// Budget, ordering and pruning configuration for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Wall-clock budget. Checked once per loop iteration; reaching it ends
    /// the run with no tour. A zero budget times out before the first pop.
    pub time_budget: Duration,
    /// Pop order of the frontier.
    pub frontier_order: FrontierOrder,
    /// Bound pruning on or off.
    pub prune_mode: PruneMode,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            time_budget: DEFAULT_TIME_BUDGET,
            frontier_order: FrontierOrder::default(),
            prune_mode: PruneMode::default(),
        }
    }
}

impl SearchPolicy {
    /// Default policy with a budget given in (possibly fractional) seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidTimeBudget`] if `secs` is negative, NaN,
    /// infinite or does not fit in a [`Duration`].
    pub fn with_timeout_secs(secs: f64) -> Result<Self, SearchError> {
        let time_budget =
            Duration::try_from_secs_f64(secs).map_err(|e| SearchError::InvalidTimeBudget {
                detail: format!("{secs} seconds: {e}"),
            })?;
        Ok(Self {
            time_budget,
            ..Self::default()
        })
    }

    /// Pre-flight check against the graph the policy will run on.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::TooFewNodes`] if `node_count < 2`.
    pub fn validate(&self, node_count: usize) -> Result<(), SearchError> {
        if node_count < 2 {
            return Err(SearchError::TooFewNodes { node_count });
        }
        Ok(())
    }

    /// JSON form. The budget is carried in whole milliseconds (saturating).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let budget_ms = u64::try_from(self.time_budget.as_millis()).unwrap_or(u64::MAX);
        serde_json::json!({
            "schema_version": SEARCH_POLICY_SCHEMA,
            "time_budget_ms": budget_ms,
            "frontier_order": self.frontier_order.as_str(),
            "prune_mode": self.prune_mode.as_str(),
        })
    }

    /// Content hash of the canonical policy JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the JSON form is not canonicalizable.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}
