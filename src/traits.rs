//! The seam between ROM assembly and the concrete partitioning strategies.
//!
//! Every strategy in [`crate::layouts`] implements [`CartPartitioner`]: it takes
//! an already padded sequence, plus the wait value when the sequence has one,
//! and lays it out into containers. Strategies differ in the shape of that
//! layout (flat carts, carts of boxes), which is the associated `Layout` type.
//!
//! Implementations must be pure: the same inputs always give the same layout,
//! and no state carries over between calls.

use crate::error::PartitionError;

/// A strategy for packing a sequence of items into containers.
pub trait CartPartitioner<T> {
    /// Shape of the packed result, e.g. `Vec<Vec<T>>` for one level of carts.
    type Layout;

    /// Pack `items` into containers.
    ///
    /// `wait` is the filler item, if the sequence defines one. Strategies that
    /// never cut or insert waits ignore it; strategies that do return
    /// [`PartitionError::MissingWait`] when it is `None`.
    fn partition(&self, items: &[T], wait: Option<&T>) -> Result<Self::Layout, PartitionError>;

    /// Smallest input length this strategy accepts.
    fn min_len(&self) -> usize {
        0
    }
}
