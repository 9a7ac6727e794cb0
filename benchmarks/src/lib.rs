//! Shared helpers for tourbound benchmark suites.
//!
//! Benchmark inputs are generated, not read from disk: a seeded SplitMix64
//! stream places points in a square, and the Euclidean graph over them is the
//! instance. [`BenchInstance::input_digest`] pins the generator parameters so
//! a report can say exactly which input it measured.

use tourbound_kernel::graph::WeightedGraph;
use tourbound_kernel::instance::{euclidean_graph, Point};
use tourbound_kernel::proof::canon::{canonical_json_bytes, CanonError};
use tourbound_kernel::proof::hash::{canonical_hash, ContentHash};
use tourbound_kernel::proof::hash_domain::HashDomain;

/// Side of the square points are drawn from.
pub const COORDINATE_SPAN: u32 = 1000;

/// Generator name recorded in the input digest.
const GENERATOR: &str = "splitmix64_euclid_2d";

/// A generated benchmark instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchInstance {
    pub name: &'static str,
    pub node_count: usize,
    pub seed: u64,
}

impl BenchInstance {
    /// Integer points in `[0, COORDINATE_SPAN)²`, deterministic in `seed`.
    #[must_use]
    pub fn points(&self) -> Vec<Point> {
        let mut rng = SplitMix64(self.seed);
        (0..self.node_count)
            .map(|_| {
                let x = rng.below(COORDINATE_SPAN);
                let y = rng.below(COORDINATE_SPAN);
                Point::new(f64::from(x), f64::from(y))
            })
            .collect()
    }

    /// The complete Euclidean graph over [`BenchInstance::points`].
    ///
    /// # Panics
    ///
    /// Never in practice: coordinates are bounded, so no distance overflows.
    #[must_use]
    pub fn graph(&self) -> WeightedGraph {
        euclidean_graph(&self.points()).expect("bounded coordinates give finite distances")
    }

    /// Content hash of the generator parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the parameter JSON is not canonicalizable.
    pub fn input_digest(&self) -> Result<ContentHash, CanonError> {
        let value = serde_json::json!({
            "generator": GENERATOR,
            "node_count": self.node_count,
            "seed": self.seed,
            "span": COORDINATE_SPAN,
        });
        let bytes = canonical_json_bytes(&value)?;
        Ok(canonical_hash(HashDomain::BenchInput, &bytes))
    }
}

/// Instances exact search closes in well under a second each.
pub const SMALL_INSTANCES: &[BenchInstance] = &[
    BenchInstance {
        name: "euclid_6",
        node_count: 6,
        seed: 6,
    },
    BenchInstance {
        name: "euclid_8",
        node_count: 8,
        seed: 8,
    },
    BenchInstance {
        name: "euclid_10",
        node_count: 10,
        seed: 10,
    },
];

/// Instances where the frontier grows large enough to matter.
pub const MEDIUM_INSTANCES: &[BenchInstance] = &[
    BenchInstance {
        name: "euclid_11",
        node_count: 11,
        seed: 11,
    },
    BenchInstance {
        name: "euclid_12",
        node_count: 12,
        seed: 12,
    },
];

struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-enough value in `0..bound` for benchmark inputs.
    fn below(&mut self, bound: u32) -> u32 {
        let r = self.next_u64() % u64::from(bound);
        u32::try_from(r).unwrap_or(0)
    }
}
