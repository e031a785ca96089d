//! Single-level packing that drops redundant wait moves.
//!
//! A wait move right after a cart boundary can be left out of the ROM entirely:
//! the pause between carts already provides it. [`WaitCutPartitioner`] asks the
//! [`OptimalSplitter`] where to put the boundaries so that the total playback
//! cost is minimal, then cuts the sequence accordingly.

use crate::builder::{CostModel, SplitBounds, CART_SLOTS};
use crate::engine::{OptimalSplitter, Split};
use crate::error::PartitionError;
use crate::traits::CartPartitioner;
use crate::utils::{materialize, wait_mask};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitCutPartitioner {
    splitter: OptimalSplitter,
}

impl WaitCutPartitioner {
    pub fn new(splitter: OptimalSplitter) -> Self {
        Self { splitter }
    }

    /// Full 27-slot carts holding at least `min_items_per_cart` items each.
    ///
    /// A minimum of 0 is read as "no minimum": every cart still stores at
    /// least one item.
    pub fn full_carts(min_items_per_cart: usize, cost: CostModel) -> Result<Self, PartitionError> {
        let bounds = SplitBounds::new(min_items_per_cart.max(1), CART_SLOTS)?;
        Ok(Self::new(OptimalSplitter::new(bounds, cost)))
    }

    pub fn splitter(&self) -> &OptimalSplitter {
        &self.splitter
    }

    /// Plan the split without building the carts.
    pub fn plan<T: PartialEq>(&self, items: &[T], wait: &T) -> Result<Split, PartitionError> {
        let mask = wait_mask(items, Some(wait));
        self.splitter
            .solve(&mask)
            .ok_or_else(|| self.infeasible(items.len()))
    }

    fn infeasible(&self, len: usize) -> PartitionError {
        let bounds = self.splitter.bounds();
        PartitionError::Infeasible {
            len,
            min_k: bounds.min_k(),
            max_k: bounds.max_k(),
        }
    }
}

/// With a splitter built for `min_k == 0`, a [`CartSize::WaitCut(0)`] comes out
/// as an empty cart: it stores nothing and stands for the wait it dropped.
///
/// [`CartSize::WaitCut(0)`]: crate::cart::CartSize::WaitCut
impl<T: Clone + PartialEq> CartPartitioner<T> for WaitCutPartitioner {
    type Layout = Vec<Vec<T>>;

    fn partition(&self, items: &[T], wait: Option<&T>) -> Result<Self::Layout, PartitionError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("wait_cut_partition", len = items.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let wait = wait.ok_or(PartitionError::MissingWait)?;
        let split = self.plan(items, wait)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            carts = split.sizes.len(),
            cut = split.wait_cuts(),
            cost = split.cost,
            "wait cut layout done"
        );
        materialize(items, &split.sizes).ok_or_else(|| self.infeasible(items.len()))
    }
}
