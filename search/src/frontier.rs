//! Frontier of pending states with a pluggable pop order.
//!
//! No deduplication: two states over the same visited set but different
//! orderings are both kept. Pruning happens by bound, in the driver.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::state::{FrontierKey, SearchState};

/// Which pending state pops next.
///
/// [`FrontierOrder::compare`] returns `Ordering::Less` when `a` should pop
/// before `b`. Ties on the policy fields fall through to `creation_order`
/// (older first), so every order is total and runs are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontierOrder {
    /// Deeper states first; among equal depth, smaller bound first.
    ///
    /// Reaches complete tours quickly so the incumbent starts pruning early.
    #[default]
    DepthThenBound,
    /// Classic best-first: smaller bound first; deeper first on ties.
    BoundThenDepth,
}

impl FrontierOrder {
    /// Compare two keys. `Less` means `a` pops first.
    #[must_use]
    pub fn compare(self, a: &FrontierKey, b: &FrontierKey) -> Ordering {
        let by_depth = b.level.cmp(&a.level);
        let by_bound = a.bound.total_cmp(&b.bound);
        let primary = match self {
            Self::DepthThenBound => by_depth.then(by_bound),
            Self::BoundThenDepth => by_bound.then(by_depth),
        };
        primary.then(a.creation_order.cmp(&b.creation_order))
    }

    /// Stable name used in serialized policies and records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DepthThenBound => "depth_then_bound",
            Self::BoundThenDepth => "bound_then_depth",
        }
    }
}

/// A heap entry carrying its key and the order that ranks it.
///
/// `BinaryHeap` is a max-heap, so the entry that should pop first must
/// compare greatest: `cmp` asks the order about `(other, self)`.
#[derive(Debug)]
struct FrontierEntry {
    order: FrontierOrder,
    key: FrontierKey,
    state: SearchState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.compare(&other.key, &self.key)
    }
}

/// Priority frontier over [`SearchState`].
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the next state
/// - The high-water mark of its size
/// - The bytes accounted to the states it currently holds
pub struct Frontier {
    order: FrontierOrder,
    heap: BinaryHeap<FrontierEntry>,
    high_water: u64,
    retained_bytes: u64,
}

impl Frontier {
    /// Create an empty frontier using `order`.
    #[must_use]
    pub fn new(order: FrontierOrder) -> Self {
        Self {
            order,
            heap: BinaryHeap::new(),
            high_water: 0,
            retained_bytes: 0,
        }
    }

    /// Push a state. Always accepted.
    pub fn push(&mut self, state: SearchState) {
        self.retained_bytes += state.accounted_bytes();
        self.heap.push(FrontierEntry {
            order: self.order,
            key: FrontierKey::from(&state),
            state,
        });
        self.high_water = self.high_water.max(self.heap.len() as u64);
    }

    /// Pop the state that ranks first under the frontier's order.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchState> {
        let state = self.heap.pop()?.state;
        self.retained_bytes -= state.accounted_bytes();
        Some(state)
    }

    /// Drop every pending state. Returns how many were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.heap.len();
        self.heap.clear();
        self.retained_bytes = 0;
        discarded
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Bytes accounted to the states currently held.
    #[must_use]
    pub fn retained_bytes(&self) -> u64 {
        self.retained_bytes
    }
}
