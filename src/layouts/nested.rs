//! Two-level greedy packing: carts of boxes of items.
//!
//! The flat force-split rule runs at both levels. Items still owed to carts
//! that are not open yet are kept back at the cart level; on top of that the
//! open cart keeps back enough for the boxes it still owes. A box closes once
//! what is left only covers those reservations, and the cart closes with it
//! once what is left only covers the later carts.

use crate::builder::CART_SLOTS;
use crate::error::PartitionError;
use crate::traits::CartPartitioner;
use crate::utils::required_len;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedBounds {
    /// Boxes per cart.
    cart_capacity: usize,
    /// Items per box.
    box_capacity: usize,
    min_carts: usize,
    min_boxes_per_cart: usize,
    min_items_per_box: usize,
}

impl NestedBounds {
    pub fn new(
        cart_capacity: usize,
        box_capacity: usize,
        min_carts: usize,
        min_boxes_per_cart: usize,
        min_items_per_box: usize,
    ) -> Result<Self, PartitionError> {
        if cart_capacity == 0 || min_boxes_per_cart > cart_capacity {
            return Err(PartitionError::InvalidCapacity {
                what: "cart",
                capacity: cart_capacity,
                min_fill: min_boxes_per_cart,
            });
        }
        if box_capacity == 0 || min_items_per_box > box_capacity {
            return Err(PartitionError::InvalidCapacity {
                what: "box",
                capacity: box_capacity,
                min_fill: min_items_per_box,
            });
        }
        Ok(Self {
            cart_capacity,
            box_capacity,
            min_carts,
            min_boxes_per_cart,
            min_items_per_box,
        })
    }

    /// 27 boxes of 27 items per cart, the 729-slot ROM.
    pub fn full_carts(
        min_carts: usize,
        min_boxes_per_cart: usize,
        min_items_per_box: usize,
    ) -> Result<Self, PartitionError> {
        Self::new(
            CART_SLOTS,
            CART_SLOTS,
            min_carts,
            min_boxes_per_cart,
            min_items_per_box,
        )
    }

    pub fn cart_capacity(&self) -> usize {
        self.cart_capacity
    }

    pub fn box_capacity(&self) -> usize {
        self.box_capacity
    }

    pub fn required_len(&self) -> usize {
        required_len(&[
            self.min_carts,
            self.min_boxes_per_cart,
            self.min_items_per_box,
        ])
    }

    /// Items kept back for `carts` required carts that are not open yet.
    fn reserved_for(&self, carts: usize) -> usize {
        required_len(&[carts, self.min_boxes_per_cart, self.min_items_per_box])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedPartitioner {
    bounds: NestedBounds,
}

impl NestedPartitioner {
    pub fn new(bounds: NestedBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> NestedBounds {
        self.bounds
    }

    pub fn split<T: Clone>(&self, items: &[T]) -> Result<Vec<Vec<Vec<T>>>, PartitionError> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("nested_partition", len = items.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let required = self.bounds.required_len();
        if items.len() < required {
            return Err(PartitionError::Underflow {
                len: items.len(),
                required,
            });
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let b = &self.bounds;
        let mut carts_owed = b.min_carts;
        let mut boxes_owed = 0usize;
        let mut carts: Vec<Vec<Vec<T>>> = Vec::new();
        let mut cursor = 0usize;

        while cursor < items.len() {
            let remaining = items.len() - cursor;
            let later_carts = b.reserved_for(carts_owed);
            let later_boxes =
                later_carts.saturating_add(boxes_owed.saturating_mul(b.min_items_per_box));

            let current = carts.last_mut().and_then(|cart| cart.last_mut());
            if let Some(current) = current {
                if current.len() < b.box_capacity && remaining > later_boxes {
                    current.push(items[cursor].clone());
                    cursor += 1;
                    continue;
                }
            }

            let cart_full = carts.last().map_or(true, |cart| cart.len() == b.cart_capacity);
            if cart_full || remaining <= later_carts {
                carts.push(Vec::with_capacity(b.cart_capacity));
                boxes_owed = if carts_owed > 0 {
                    carts_owed -= 1;
                    b.min_boxes_per_cart
                } else {
                    0
                };
            }
            if let Some(cart) = carts.last_mut() {
                cart.push(Vec::with_capacity(b.box_capacity.min(remaining)));
            }
            boxes_owed = boxes_owed.saturating_sub(1);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(carts = carts.len(), "nested layout done");
        Ok(carts)
    }
}

impl<T: Clone> CartPartitioner<T> for NestedPartitioner {
    type Layout = Vec<Vec<Vec<T>>>;

    fn partition(&self, items: &[T], _wait: Option<&T>) -> Result<Self::Layout, PartitionError> {
        self.split(items)
    }

    fn min_len(&self) -> usize {
        self.bounds.required_len()
    }
}

/// Greedy two-level packing, see [`NestedPartitioner`].
pub fn nested_partition<T: Clone>(
    items: &[T],
    bounds: NestedBounds,
) -> Result<Vec<Vec<Vec<T>>>, PartitionError> {
    NestedPartitioner::new(bounds).split(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_box_spills_into_next_box() {
        let items: Vec<u32> = (0..30).collect();
        let bounds = NestedBounds::full_carts(1, 1, 1).unwrap();
        let carts = nested_partition(&items, bounds).unwrap();
        assert_eq!(carts.len(), 1);
        assert_eq!(carts[0].len(), 2);
        assert_eq!(carts[0][0].len(), 27);
        assert_eq!(carts[0][1], vec![27, 28, 29]);
    }

    #[test]
    fn reserves_items_for_the_second_cart() {
        let bounds = NestedBounds::full_carts(2, 1, 2).unwrap();
        let carts = nested_partition(&[1, 2, 3, 4], bounds).unwrap();
        assert_eq!(carts, vec![vec![vec![1, 2]], vec![vec![3, 4]]]);
    }

    #[test]
    fn extra_boxes_leave_later_carts_alone() {
        let items: Vec<u32> = (0..60).collect();
        let bounds = NestedBounds::full_carts(2, 1, 1).unwrap();
        let carts = nested_partition(&items, bounds).unwrap();
        let shape: Vec<Vec<usize>> = carts
            .iter()
            .map(|cart| cart.iter().map(Vec::len).collect())
            .collect();
        assert_eq!(shape, vec![vec![27, 27, 5], vec![1]]);
    }

    #[test]
    fn box_closes_early_for_boxes_owed_in_the_same_cart() {
        let bounds = NestedBounds::full_carts(1, 2, 2).unwrap();
        let carts = nested_partition(&[9, 0, 0, 0], bounds).unwrap();
        assert_eq!(carts, vec![vec![vec![9, 0], vec![0, 0]]]);
    }

    #[test]
    fn full_cart_opens_a_new_cart() {
        let bounds = NestedBounds::new(2, 2, 1, 0, 0).unwrap();
        let items: Vec<u32> = (0..9).collect();
        let carts = nested_partition(&items, bounds).unwrap();
        assert_eq!(
            carts,
            vec![
                vec![vec![0, 1], vec![2, 3]],
                vec![vec![4, 5], vec![6, 7]],
                vec![vec![8]],
            ]
        );
    }

    #[test]
    fn underflow_and_empty_input() {
        let bounds = NestedBounds::full_carts(2, 2, 2).unwrap();
        assert_eq!(
            nested_partition(&[0u8; 7], bounds),
            Err(PartitionError::Underflow { len: 7, required: 8 })
        );
        let none = NestedBounds::full_carts(0, 0, 0).unwrap();
        assert!(nested_partition::<u8>(&[], none).unwrap().is_empty());
    }

    #[test]
    fn capacities_are_validated() {
        assert!(NestedBounds::new(0, 27, 1, 0, 0).is_err());
        assert!(NestedBounds::new(27, 2, 1, 1, 3).is_err());
        assert!(NestedBounds::new(1, 27, 1, 2, 0).is_err());
    }
}
