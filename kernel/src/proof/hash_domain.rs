//! Typed domain separators for canonical hashing.
//!
//! Every digest in the workspace selects a domain via [`HashDomain`]. The
//! enum, `as_bytes()`, `ALL`, and `Display` are generated from one macro
//! invocation so they cannot drift apart.

macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Canonical byte encoding of a weighted graph.
    GraphInstance => b"TOURBOUND::GRAPH_INSTANCE::V1\0",

    /// Canonical JSON of a search policy.
    SearchPolicy => b"TOURBOUND::SEARCH_POLICY::V1\0",

    /// Canonical JSON of a search statistics record.
    SearchStats => b"TOURBOUND::SEARCH_STATS::V1\0",

    /// Canonical JSON of a harness run record.
    RunRecord => b"TOURBOUND::RUN_RECORD::V1\0",

    /// Benchmark input hashing.
    BenchInput => b"TOURBOUND::BENCH_INPUT::V1\0",
}
