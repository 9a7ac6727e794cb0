//! Per-run search counters.

use tourbound_kernel::proof::canon::{canonical_json_bytes, real_to_string, CanonError};
use tourbound_kernel::proof::hash::{canonical_hash, ContentHash};
use tourbound_kernel::proof::hash_domain::HashDomain;

/// Schema tag embedded in the stats JSON.
pub const SEARCH_STATS_SCHEMA: &str = "tourbound.search_stats.v1";

/// Why the driver loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// Frontier exhausted with an incumbent; the incumbent is optimal.
    Optimal,
    /// The time budget was reached first.
    DeadlineExceeded,
    /// Frontier exhausted without closing any tour.
    Infeasible,
}

impl TerminationReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::Infeasible => "infeasible",
        }
    }
}

/// One accepted incumbent improvement.
#[derive(Debug, Clone, PartialEq)]
pub struct IncumbentUpdate {
    /// New best closed-tour cost.
    pub cost: f64,
    /// Number of expansions completed when the tour was closed (1-based:
    /// the expansion that closed it is counted).
    pub expansion: u64,
}

/// Counters collected by one run of [`crate::search::search`].
///
/// An expansion is one popped state that survived the stale-bound check.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats {
    pub expansions: u64,
    /// Popped states discarded because their bound was no longer below the
    /// incumbent.
    pub stale_discarded: u64,
    /// Non-leaf children built (before the push filter).
    pub children_generated: u64,
    /// Non-leaf children dropped because their bound was not below the
    /// incumbent.
    pub children_pruned: u64,
    /// Leaf extensions that closed a tour through a return edge.
    pub leaves_closed: u64,
    /// Leaf extensions abandoned for lack of a return edge to the start.
    pub leaves_without_return: u64,
    pub frontier_high_water: u64,
    /// Smallest bound of any state discarded by pruning, if any was.
    pub min_pruned_bound: Option<f64>,
    /// Every accepted incumbent, in order. Costs are strictly decreasing.
    pub incumbent_updates: Vec<IncumbentUpdate>,
    /// `None` while the run is in progress.
    pub termination: Option<TerminationReason>,
}

impl SearchStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            expansions: 0,
            stale_discarded: 0,
            children_generated: 0,
            children_pruned: 0,
            leaves_closed: 0,
            leaves_without_return: 0,
            frontier_high_water: 0,
            min_pruned_bound: None,
            incumbent_updates: Vec::new(),
            termination: None,
        }
    }

    /// Record that a state with `bound` was discarded by pruning.
    pub fn note_pruned_bound(&mut self, bound: f64) {
        self.min_pruned_bound = Some(match self.min_pruned_bound {
            Some(current) => current.min(bound),
            None => bound,
        });
    }

    /// JSON form. Costs are decimal strings.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let updates: Vec<serde_json::Value> = self
            .incumbent_updates
            .iter()
            .map(|u| {
                serde_json::json!({
                    "cost": real_to_string(u.cost),
                    "expansion": u.expansion,
                })
            })
            .collect();
        serde_json::json!({
            "schema_version": SEARCH_STATS_SCHEMA,
            "expansions": self.expansions,
            "stale_discarded": self.stale_discarded,
            "children_generated": self.children_generated,
            "children_pruned": self.children_pruned,
            "leaves_closed": self.leaves_closed,
            "leaves_without_return": self.leaves_without_return,
            "frontier_high_water": self.frontier_high_water,
            "min_pruned_bound": self.min_pruned_bound.map(real_to_string),
            "incumbent_updates": updates,
            "termination": self.termination.map(TerminationReason::as_str),
        })
    }

    /// Content hash of the canonical stats JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the JSON form is not canonicalizable.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchStats, &bytes))
    }
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}
