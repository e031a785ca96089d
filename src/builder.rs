//! Validated parameters for the optimal splitter and a builder to assemble them.

use crate::error::PartitionError;
use crate::OptimalSplitter;

/// Cart capacity used by every ROM density above 1.
pub const CART_SLOTS: usize = 27;

/// Inclusive bounds on how many items a cart may store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBounds {
    min_k: usize,
    max_k: usize,
}

impl SplitBounds {
    pub fn new(min_k: usize, max_k: usize) -> Result<Self, PartitionError> {
        if min_k > max_k {
            return Err(PartitionError::InvalidBounds { min_k, max_k });
        }
        Ok(Self { min_k, max_k })
    }

    #[inline]
    pub fn min_k(&self) -> usize {
        self.min_k
    }

    #[inline]
    pub fn max_k(&self) -> usize {
        self.max_k
    }

    #[inline]
    pub fn contains(&self, k: usize) -> bool {
        (self.min_k..=self.max_k).contains(&k)
    }
}

impl Default for SplitBounds {
    fn default() -> Self {
        Self {
            min_k: 1,
            max_k: CART_SLOTS,
        }
    }
}

/// Affine cost of one cart: `(per_item + 1) * stored + per_cart`.
///
/// Every stored item takes one unit of playback time on top of `per_item`; a cut
/// wait item costs nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    per_item: f64,
    per_cart: f64,
}

impl CostModel {
    pub fn new(per_item: f64, per_cart: f64) -> Result<Self, PartitionError> {
        if !per_item.is_finite() || !per_cart.is_finite() {
            return Err(PartitionError::InvalidCost { per_item, per_cart });
        }
        Ok(Self { per_item, per_cart })
    }

    #[inline]
    pub fn per_item(&self) -> f64 {
        self.per_item
    }

    #[inline]
    pub fn per_cart(&self) -> f64 {
        self.per_cart
    }

    /// Slope applied to every stored item, playback included.
    #[inline]
    pub fn item_slope(&self) -> f64 {
        self.per_item + 1.0
    }

    /// Cost of a cart storing `k` items.
    #[inline]
    pub fn cart_cost(&self, k: usize) -> f64 {
        self.item_slope() * k as f64 + self.per_cart
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            per_item: 0.0,
            per_cart: 1.0,
        }
    }
}

/// Builder for [`OptimalSplitter`].
///
/// Raw numbers are validated in [`build`](Self::build), so callers can chain
/// setters without handling errors at every step.
#[derive(Debug, Clone, Default)]
pub struct OptimalSplitterBuilder {
    bounds: Option<(usize, usize)>,
    cost: Option<(f64, f64)>,
}

impl OptimalSplitterBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_bounds(mut self, min_k: usize, max_k: usize) -> Self {
        self.bounds = Some((min_k, max_k));
        self
    }
    pub fn with_cost(mut self, per_item: f64, per_cart: f64) -> Self {
        self.cost = Some((per_item, per_cart));
        self
    }
    pub fn build(self) -> Result<OptimalSplitter, PartitionError> {
        let bounds = match self.bounds {
            Some((min_k, max_k)) => SplitBounds::new(min_k, max_k)?,
            None => SplitBounds::default(),
        };
        let cost = match self.cost {
            Some((per_item, per_cart)) => CostModel::new(per_item, per_cart)?,
            None => CostModel::default(),
        };
        Ok(OptimalSplitter::new(bounds, cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_bounds_are_rejected() {
        assert_eq!(
            SplitBounds::new(4, 3),
            Err(PartitionError::InvalidBounds { min_k: 4, max_k: 3 })
        );
        assert!(SplitBounds::new(0, 0).is_ok());
    }

    #[test]
    fn non_finite_costs_are_rejected() {
        assert!(CostModel::new(f64::NAN, 1.0).is_err());
        assert!(CostModel::new(0.0, f64::INFINITY).is_err());
        assert!(CostModel::new(-0.5, 0.0).is_ok());
    }

    #[test]
    fn cart_cost_includes_playback() {
        let cost = CostModel::new(0.5, 2.0).unwrap();
        assert_eq!(cost.cart_cost(0), 2.0);
        assert_eq!(cost.cart_cost(4), 8.0);
    }

    #[test]
    fn builder_defaults_to_full_cart() {
        let splitter = OptimalSplitterBuilder::new().build().unwrap();
        assert_eq!(splitter.bounds(), SplitBounds::new(1, CART_SLOTS).unwrap());
        assert_eq!(splitter.cost(), CostModel::default());
    }

    #[test]
    fn builder_surfaces_validation_errors() {
        let err = OptimalSplitterBuilder::new()
            .with_bounds(3, 2)
            .build()
            .unwrap_err();
        assert!(matches!(err, PartitionError::InvalidBounds { .. }));
        let err = OptimalSplitterBuilder::new()
            .with_cost(f64::NAN, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, PartitionError::InvalidCost { .. }));
    }
}
