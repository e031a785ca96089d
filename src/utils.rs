//! Small helpers shared by the layouts.

use crate::cart::CartSize;

/// Mark every position holding the wait value.
///
/// With no wait value nothing is free and the splitter degenerates to plain
/// bounded partitioning.
pub fn wait_mask<T: PartialEq>(items: &[T], wait: Option<&T>) -> Vec<bool> {
    match wait {
        Some(w) => items.iter().map(|item| item == w).collect(),
        None => vec![false; items.len()],
    }
}

/// Minimum sequence length a layout needs before it can honour its fill rules.
///
/// Saturates instead of overflowing; a saturated requirement is unsatisfiable
/// anyway.
#[inline]
pub fn required_len(factors: &[usize]) -> usize {
    factors
        .iter()
        .copied()
        .fold(1usize, |acc, f| acc.saturating_mul(f))
}

/// Cut `items` into concrete carts following a split, dropping elided waits.
///
/// Returns `None` when the sizes do not account for exactly `items.len()`
/// positions.
pub fn materialize<T: Clone>(items: &[T], sizes: &[CartSize]) -> Option<Vec<Vec<T>>> {
    let mut carts = Vec::with_capacity(sizes.len());
    let mut pos = 0usize;
    for size in sizes {
        let end = pos.checked_add(size.stored())?;
        carts.push(items.get(pos..end)?.to_vec());
        pos += size.span();
    }
    (pos == items.len()).then_some(carts)
}
