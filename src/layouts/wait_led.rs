//! 26-slot packing where every cart opens with a wait move.
//!
//! Each cart holds one leading wait followed by up to `body` items. Waits that
//! directly follow a cart boundary are skipped, since the leading wait of the
//! next cart already covers them, unless a whole cart's worth of waits follows,
//! which is kept as its own cart. The final cart is topped up with waits.

use crate::builder::CART_SLOTS;
use crate::error::PartitionError;
use crate::traits::CartPartitioner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitLedPartitioner {
    body: usize,
}

impl WaitLedPartitioner {
    /// Carts of `capacity` slots: one wait plus `capacity - 1` items.
    pub fn new(capacity: usize) -> Result<Self, PartitionError> {
        if capacity < 2 {
            return Err(PartitionError::InvalidCapacity {
                what: "wait-led cart",
                capacity,
                min_fill: 2,
            });
        }
        Ok(Self { body: capacity - 1 })
    }

    /// Items per cart after the leading wait.
    pub fn body(&self) -> usize {
        self.body
    }

    /// Input length rounded up to whole cart bodies.
    pub fn padded_len(&self, len: usize) -> usize {
        len.div_ceil(self.body) * self.body
    }

    pub fn split<T: Clone + PartialEq>(&self, items: &[T], wait: &T) -> Vec<Vec<T>> {
        let body = self.body;
        let mut carts: Vec<Vec<T>> = Vec::new();
        let mut i = 0usize;

        while i < items.len() {
            let end = (i + body).min(items.len());
            let mut cart = Vec::with_capacity(body + 1);
            cart.push(wait.clone());
            cart.extend_from_slice(&items[i..end]);
            carts.push(cart);
            i += body;

            let wait_cart_follows =
                i + body <= items.len() && items[i..i + body].iter().all(|x| x == wait);
            if !wait_cart_follows {
                while i < items.len() && items[i] == *wait {
                    i += 1;
                }
            }
        }

        if let Some(last) = carts.last_mut() {
            last.resize(body + 1, wait.clone());
        }
        carts
    }
}

impl Default for WaitLedPartitioner {
    fn default() -> Self {
        Self {
            body: CART_SLOTS - 1,
        }
    }
}

impl<T: Clone + PartialEq> CartPartitioner<T> for WaitLedPartitioner {
    type Layout = Vec<Vec<T>>;

    fn partition(&self, items: &[T], wait: Option<&T>) -> Result<Self::Layout, PartitionError> {
        let wait = wait.ok_or(PartitionError::MissingWait)?;
        Ok(self.split(items, wait))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: u8 = 0;

    #[test]
    fn every_cart_opens_with_a_wait() {
        let p = WaitLedPartitioner::new(4).unwrap();
        let carts = p.split(&[1, 2, 3, 4, 5, 6], &W);
        assert_eq!(carts, vec![vec![W, 1, 2, 3], vec![W, 4, 5, 6]]);
    }

    #[test]
    fn skips_waits_after_a_boundary() {
        let p = WaitLedPartitioner::new(4).unwrap();
        let carts = p.split(&[1, 2, 3, W, W, 4, 5], &W);
        assert_eq!(carts, vec![vec![W, 1, 2, 3], vec![W, 4, 5, W]]);
    }

    #[test]
    fn keeps_a_full_cart_of_waits() {
        let p = WaitLedPartitioner::new(3).unwrap();
        let carts = p.split(&[1, 2, W, W, 3, 4], &W);
        assert_eq!(carts, vec![vec![W, 1, 2], vec![W, W, W], vec![W, 3, 4]]);
    }

    #[test]
    fn last_cart_is_topped_up() {
        let p = WaitLedPartitioner::default();
        let carts = p.split(&[7u8], &W);
        assert_eq!(carts.len(), 1);
        assert_eq!(carts[0].len(), 27);
        assert_eq!(carts[0][1], 7);
        assert!(carts[0][2..].iter().all(|&x| x == W));
        assert_eq!(p.padded_len(27), 52);
    }

    #[test]
    fn needs_a_wait_value_and_room() {
        assert!(WaitLedPartitioner::new(1).is_err());
        let p = WaitLedPartitioner::default();
        assert_eq!(p.partition(&[1u8], None), Err(PartitionError::MissingWait));
    }
}
