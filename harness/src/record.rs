//! Run records: what one harness run produced, as text and canonical JSON.
//!
//! # Text form
//!
//! ```text
//! instance: classroom
//! algorithm: branch-and-bound
//! optimal cost: 37          (only when known)
//! found cost: 37
//! path: 0 1 2 4 3
//! elapsed seconds: 0.000412
//! peak memory bytes: 1184   (only when tracked)
//! ```
//!
//! A timed-out run keeps the first two lines and replaces the rest with a
//! single `timeout` line.
//!
//! # JSON form
//!
//! `to_json_value()` carries every field. The digest covers only the
//! normative projection (`digest_basis_value()`): wall-clock time and memory
//! are observational and left out, so two runs that found the same tour on
//! the same graph share a digest.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tourbound_kernel::proof::canon::{canonical_json_bytes, real_to_string, CanonError};
use tourbound_kernel::proof::hash::{canonical_hash, ContentHash};
use tourbound_kernel::proof::hash_domain::HashDomain;
use tourbound_search::bound::BoundKind;
use tourbound_search::stats::SearchStats;

use crate::config::Algorithm;
use crate::runner::RunError;

/// Schema tag embedded in the record JSON.
pub const RUN_RECORD_SCHEMA: &str = "tourbound.run_record.v1";

/// Marker line written in place of a result for timed-out runs.
pub const TIMEOUT_MARKER: &str = "timeout";

/// What the run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// A closed tour. Optimal for branch-and-bound under an admissible bound.
    Solved { cost: f64, path: Vec<usize> },
    /// Branch-and-bound hit its deadline. No tour.
    Timeout,
}

/// One run of one algorithm on one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub instance: String,
    pub algorithm: Algorithm,
    /// Estimator used; `None` for the baseline.
    pub bound: Option<BoundKind>,
    pub node_count: usize,
    pub graph_digest: ContentHash,
    pub optimal_cost: Option<f64>,
    pub outcome: RunOutcome,
    pub elapsed: Duration,
    pub peak_memory_bytes: Option<u64>,
    /// Present for branch-and-bound runs.
    pub search_stats: Option<SearchStats>,
}

impl RunRecord {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.outcome == RunOutcome::Timeout
    }

    /// Found cost, if the run produced a tour.
    #[must_use]
    pub fn found_cost(&self) -> Option<f64> {
        match self.outcome {
            RunOutcome::Solved { cost, .. } => Some(cost),
            RunOutcome::Timeout => None,
        }
    }

    /// Whether a solved tour is guaranteed optimal: `Some(true)` for
    /// branch-and-bound under an admissible bound, `Some(false)` under an
    /// inadmissible one, `None` for baselines.
    #[must_use]
    pub fn bound_admissible(&self) -> Option<bool> {
        self.bound.map(BoundKind::is_admissible)
    }

    /// `found / optimal` when both are known and the optimum is positive.
    #[must_use]
    pub fn approximation_ratio(&self) -> Option<f64> {
        let found = self.found_cost()?;
        let optimal = self.optimal_cost.filter(|&c| c > 0.0)?;
        Some(found / optimal)
    }

    /// `<instance>_<algorithm>`, with characters outside `[A-Za-z0-9._-]`
    /// replaced by `_`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let instance: String = self
            .instance
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let instance = if instance.is_empty() {
            "unnamed".to_string()
        } else {
            instance
        };
        format!("{instance}_{}", self.algorithm.as_str())
    }

    /// Line-oriented text form (see module docs).
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("instance: {}", self.instance),
            format!("algorithm: {}", self.algorithm),
        ];
        match &self.outcome {
            RunOutcome::Timeout => lines.push(TIMEOUT_MARKER.to_string()),
            RunOutcome::Solved { cost, path } => {
                if let Some(opt) = self.optimal_cost {
                    lines.push(format!("optimal cost: {}", real_to_string(opt)));
                }
                lines.push(format!("found cost: {}", real_to_string(*cost)));
                let nodes: Vec<String> = path.iter().map(ToString::to_string).collect();
                lines.push(format!("path: {}", nodes.join(" ")));
                lines.push(format!("elapsed seconds: {:.6}", self.elapsed.as_secs_f64()));
                if let Some(bytes) = self.peak_memory_bytes {
                    lines.push(format!("peak memory bytes: {bytes}"));
                }
            }
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Normative fields only: no wall-clock time, no memory.
    #[must_use]
    pub fn digest_basis_value(&self) -> serde_json::Value {
        let (status, cost, path) = match &self.outcome {
            RunOutcome::Solved { cost, path } => {
                ("solved", Some(real_to_string(*cost)), Some(path.clone()))
            }
            RunOutcome::Timeout => (TIMEOUT_MARKER, None, None),
        };
        serde_json::json!({
            "schema_version": RUN_RECORD_SCHEMA,
            "instance": self.instance,
            "algorithm": self.algorithm.as_str(),
            "bound": self.bound.map(BoundKind::as_str),
            "bound_admissible": self.bound_admissible(),
            "node_count": self.node_count,
            "graph_digest": self.graph_digest.as_str(),
            "optimal_cost": self.optimal_cost.map(real_to_string),
            "status": status,
            "found_cost": cost,
            "path": path,
        })
    }

    /// Full JSON form: the digest basis plus observational fields and stats.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut value = self.digest_basis_value();
        if let serde_json::Value::Object(map) = &mut value {
            let elapsed_us = u64::try_from(self.elapsed.as_micros()).unwrap_or(u64::MAX);
            map.insert("elapsed_us".into(), elapsed_us.into());
            map.insert(
                "peak_memory_bytes".into(),
                self.peak_memory_bytes.map_or(serde_json::Value::Null, Into::into),
            );
            map.insert(
                "search_stats".into(),
                self.search_stats
                    .as_ref()
                    .map_or(serde_json::Value::Null, SearchStats::to_json_value),
            );
        }
        value
    }

    /// Canonical JSON bytes of the full record.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the JSON form is not canonicalizable.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical digest basis.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the basis is not canonicalizable.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.digest_basis_value())?;
        Ok(canonical_hash(HashDomain::RunRecord, &bytes))
    }
}

/// Paths written by [`write_record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenRecord {
    pub text_path: PathBuf,
    pub json_path: PathBuf,
}

/// Write `<stem>.txt` and `<stem>.json` into `dir`, creating it if needed.
///
/// Existing files with the same names are overwritten.
///
/// # Errors
///
/// Returns [`RunError::Io`] on filesystem failures and [`RunError::Canon`]
/// if the record JSON is not canonicalizable.
pub fn write_record(dir: &Path, record: &RunRecord) -> Result<WrittenRecord, RunError> {
    let io_err = |path: &Path, e: &std::io::Error| RunError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    };

    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, &e))?;

    let stem = record.file_stem();
    let text_path = dir.join(format!("{stem}.txt"));
    let json_path = dir.join(format!("{stem}.json"));

    let json = record.to_canonical_json().map_err(|e| RunError::Canon {
        detail: e.to_string(),
    })?;

    std::fs::write(&text_path, record.to_text()).map_err(|e| io_err(&text_path, &e))?;
    std::fs::write(&json_path, json).map_err(|e| io_err(&json_path, &e))?;

    log::debug!("wrote {} and {}", text_path.display(), json_path.display());
    Ok(WrittenRecord {
        text_path,
        json_path,
    })
}
