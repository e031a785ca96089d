//! Group sizes produced by the optimal splitter.
//!
//! A [`CartSize`] describes one cart of a split: how many items it stores and
//! whether the free item right after it was cut. Older consumers expect the
//! signed encoding (`k` or `-(k + 1)`); use [`CartSize::to_signed`] and
//! [`CartSize::from_signed`] at that boundary.

/// One cart in a split sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartSize {
    /// `k` consecutive items stored in the cart.
    Stored(usize),
    /// `k` stored items, then one wait item that was dropped instead of stored.
    WaitCut(usize),
}

impl CartSize {
    /// Items actually placed in the cart.
    #[inline]
    pub fn stored(self) -> usize {
        match self {
            CartSize::Stored(k) | CartSize::WaitCut(k) => k,
        }
    }

    /// Positions of the input sequence this cart accounts for.
    #[inline]
    pub fn span(self) -> usize {
        match self {
            CartSize::Stored(k) => k,
            CartSize::WaitCut(k) => k + 1,
        }
    }

    #[inline]
    pub fn cuts_wait(self) -> bool {
        matches!(self, CartSize::WaitCut(_))
    }

    /// Signed encoding: `k` for a stored cart, `-(k + 1)` for a wait cut.
    pub fn to_signed(self) -> i64 {
        match self {
            CartSize::Stored(k) => k as i64,
            CartSize::WaitCut(k) => -(k as i64 + 1),
        }
    }

    /// Inverse of [`to_signed`](Self::to_signed).
    ///
    /// Zero decodes to an empty stored cart, which the splitter itself never emits.
    pub fn from_signed(size: i64) -> Self {
        if size >= 0 {
            CartSize::Stored(size as usize)
        } else {
            CartSize::WaitCut(size.unsigned_abs() as usize - 1)
        }
    }
}

/// Encode a whole split in the signed format.
pub fn to_signed_sizes(sizes: &[CartSize]) -> Vec<i64> {
    sizes.iter().map(|s| s.to_signed()).collect()
}
