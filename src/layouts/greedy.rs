//! Rule-based single-level packing.
//!
//! Items go left to right into the current cart until it is full. A new cart is
//! also forced once the items left over only just cover the minimum fill still
//! owed to the carts that must follow, so every required cart stays fillable.

use crate::builder::CART_SLOTS;
use crate::error::PartitionError;
use crate::traits::CartPartitioner;
use crate::utils::required_len;

/// Capacity and fill rules for [`GreedyPartitioner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyBounds {
    capacity: usize,
    min_fill: usize,
    min_groups: usize,
}

impl GreedyBounds {
    pub fn new(capacity: usize, min_fill: usize, min_groups: usize) -> Result<Self, PartitionError> {
        if capacity == 0 || min_fill > capacity {
            return Err(PartitionError::InvalidCapacity {
                what: "cart",
                capacity,
                min_fill,
            });
        }
        Ok(Self {
            capacity,
            min_fill,
            min_groups,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn min_fill(&self) -> usize {
        self.min_fill
    }

    pub fn min_groups(&self) -> usize {
        self.min_groups
    }

    /// Items needed to give every required cart its minimum fill.
    pub fn required_len(&self) -> usize {
        required_len(&[self.min_groups, self.min_fill])
    }
}

impl Default for GreedyBounds {
    fn default() -> Self {
        Self {
            capacity: CART_SLOTS,
            min_fill: 0,
            min_groups: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyPartitioner {
    bounds: GreedyBounds,
}

impl GreedyPartitioner {
    pub fn new(bounds: GreedyBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> GreedyBounds {
        self.bounds
    }

    pub fn split<T: Clone>(&self, items: &[T]) -> Result<Vec<Vec<T>>, PartitionError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "greedy_partition",
            len = items.len(),
            capacity = self.bounds.capacity
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let required = self.bounds.required_len();
        if items.len() < required {
            return Err(PartitionError::Underflow {
                len: items.len(),
                required,
            });
        }

        let GreedyBounds {
            capacity, min_fill, ..
        } = self.bounds;
        let mut reserved = required;
        let mut groups: Vec<Vec<T>> = Vec::new();
        let mut cursor = 0usize;

        while cursor < items.len() {
            let remaining = items.len() - cursor;
            let open_new = match groups.last() {
                None => true,
                Some(current) => current.len() == capacity || remaining <= reserved,
            };
            if open_new {
                groups.push(Vec::with_capacity(capacity.min(remaining)));
                reserved = reserved.saturating_sub(min_fill);
                continue;
            }
            if let Some(current) = groups.last_mut() {
                current.push(items[cursor].clone());
            }
            cursor += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(carts = groups.len(), "greedy layout done");
        Ok(groups)
    }
}

impl<T: Clone> CartPartitioner<T> for GreedyPartitioner {
    type Layout = Vec<Vec<T>>;

    fn partition(&self, items: &[T], _wait: Option<&T>) -> Result<Self::Layout, PartitionError> {
        self.split(items)
    }

    fn min_len(&self) -> usize {
        self.bounds.required_len()
    }
}

/// Greedy packing into carts of `capacity` items.
///
/// `items` must already hold at least `total_min_groups * min_fill_per_group`
/// items (pad with the wait move first); shorter input is rejected with
/// [`PartitionError::Underflow`] rather than producing under-filled carts.
pub fn greedy_partition<T: Clone>(
    items: &[T],
    capacity: usize,
    min_fill_per_group: usize,
    total_min_groups: usize,
) -> Result<Vec<Vec<T>>, PartitionError> {
    let bounds = GreedyBounds::new(capacity, min_fill_per_group, total_min_groups)?;
    GreedyPartitioner::new(bounds).split(items)
}
