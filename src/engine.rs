//! Minimum-cost splitting of a sequence into bounded carts.
//!
//! The recurrence, 1-indexed with position 0 as the empty prefix:
//!
//! ```text
//! DP[0] = 0
//! DP[i] = min over k in [min_k, max_k] of DP[i-k]     + s*k + b
//! DP[i] = min(DP[i], min over k of   DP[i-1-k] + s*k + b)   if item i is a wait
//! ```
//!
//! where `s = per_item + 1`. The second line stores `k` items and drops the wait
//! at `i` for free. Substituting `A[j] = DP[j] - s*j` turns both minimisations
//! into a window minimum of `A` over a range of `j`, maintained by
//! [`SlidingWindowMin`], so the whole scan is amortised O(n).
//!
//! The wait transition needs the window as it was *one step earlier*; the
//! engine keeps the previous step's query result around for that. With
//! `min_k == 0` that window is widened by `A[i-1]`, which lets a zero-size cart
//! cut the wait at `i`. Zero-size *stored* carts are never formed: they consume
//! nothing.

use crate::builder::{CostModel, SplitBounds};
use crate::cart::{to_signed_sizes, CartSize};
use crate::error::PartitionError;
use crate::window::SlidingWindowMin;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of a feasible split.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    /// Carts from left to right.
    pub sizes: Vec<CartSize>,
    /// Total cost under the splitter's [`CostModel`].
    pub cost: f64,
}

impl Split {
    pub fn empty() -> Self {
        Self {
            sizes: Vec::new(),
            cost: 0.0,
        }
    }

    /// Sizes in the legacy signed encoding.
    pub fn signed_sizes(&self) -> Vec<i64> {
        to_signed_sizes(&self.sizes)
    }

    pub fn wait_cuts(&self) -> usize {
        self.sizes.iter().filter(|s| s.cuts_wait()).count()
    }
}

/// Sliding-window DP splitter for a fixed set of bounds and costs.
///
/// Typical usage:
/// ```
/// use cart_split::{CartSize, OptimalSplitterBuilder};
///
/// let splitter = OptimalSplitterBuilder::new()
///     .with_bounds(1, 3)
///     .with_cost(0.0, 1.0)
///     .build()
///     .unwrap();
/// let split = splitter.solve(&[false, false, true, false]).unwrap();
/// assert_eq!(split.sizes, vec![CartSize::WaitCut(2), CartSize::Stored(1)]);
/// assert_eq!(split.signed_sizes(), vec![-3, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalSplitter {
    bounds: SplitBounds,
    cost: CostModel,
}

impl OptimalSplitter {
    pub fn new(bounds: SplitBounds, cost: CostModel) -> Self {
        Self { bounds, cost }
    }

    pub fn bounds(&self) -> SplitBounds {
        self.bounds
    }

    pub fn cost(&self) -> CostModel {
        self.cost
    }

    /// Find a minimum-cost split of a sequence whose wait positions are `is_wait`.
    ///
    /// Returns `None` when no split fits the bounds. An empty sequence splits
    /// into no carts at zero cost.
    pub fn solve(&self, is_wait: &[bool]) -> Option<Split> {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "optimal_split",
            len = is_wait.len(),
            min_k = self.bounds.min_k(),
            max_k = self.bounds.max_k()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let n = is_wait.len();
        if n == 0 {
            return Some(Split::empty());
        }

        let table = self.fill_table(is_wait);
        let cost = table.dp[n];
        if cost == f64::INFINITY {
            #[cfg(feature = "tracing")]
            tracing::debug!("no split satisfies the bounds");
            return None;
        }

        let sizes = table.backtrack()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(cost, carts = sizes.len(), "split found");
        Some(Split { sizes, cost })
    }

    /// Solve many independent sequences.
    #[cfg(feature = "parallel")]
    pub fn solve_batch<S>(&self, sequences: &[S]) -> Vec<Option<Split>>
    where
        S: AsRef<[bool]> + Sync,
    {
        sequences
            .par_iter()
            .map(|mask| self.solve(mask.as_ref()))
            .collect()
    }

    /// Solve many independent sequences.
    #[cfg(not(feature = "parallel"))]
    pub fn solve_batch<S>(&self, sequences: &[S]) -> Vec<Option<Split>>
    where
        S: AsRef<[bool]>,
    {
        sequences
            .iter()
            .map(|mask| self.solve(mask.as_ref()))
            .collect()
    }

    fn fill_table(&self, is_wait: &[bool]) -> SplitTable {
        let n = is_wait.len();
        let min_k = self.bounds.min_k();
        let max_k = self.bounds.max_k();
        let slope = self.cost.item_slope();
        let per_cart = self.cost.per_cart();

        let mut dp = vec![f64::INFINITY; n + 1];
        let mut a = vec![f64::INFINITY; n + 1];
        let mut choice: Vec<Option<CartSize>> = vec![None; n + 1];
        dp[0] = 0.0;
        a[0] = 0.0;

        // a stored cart needs at least one item; `min_k == 0` only adds
        // zero-size carts that exist to cut a wait
        let stored_min = min_k.max(1);
        let mut window = SlidingWindowMin::new();
        let mut prev_min = None;

        for i in 1..=n {
            if i >= stored_min {
                window.push(a[i - stored_min], i - stored_min);
            }
            if i > max_k {
                window.evict_left(i - max_k - 1);
            }

            let cur_min = window.query();
            if let Some((best, j)) = cur_min.filter(|(v, _)| v.is_finite()) {
                dp[i] = best + slope * i as f64 + per_cart;
                choice[i] = Some(CartSize::Stored(i - j));
            }

            if is_wait[i - 1] {
                let reach = if min_k == 0 {
                    newest_min(prev_min, a[i - 1], i - 1)
                } else {
                    prev_min
                };
                if let Some((best, j)) = reach.filter(|(v, _)| v.is_finite()) {
                    let cut = best + slope * (i - 1) as f64 + per_cart;
                    if cut < dp[i] {
                        dp[i] = cut;
                        choice[i] = Some(CartSize::WaitCut(i - 1 - j));
                    }
                }
            }

            a[i] = dp[i] - slope * i as f64;
            prev_min = cur_min;
        }

        SplitTable { dp, choice }
    }
}

/// `best` widened by one more entry; ties go to the newer index, as in the window.
#[inline]
fn newest_min(best: Option<(f64, usize)>, value: f64, index: usize) -> Option<(f64, usize)> {
    match best {
        Some((v, _)) if v < value => best,
        _ => Some((value, index)),
    }
}

/// Scratch state of one solve; dropped once the split is read back.
struct SplitTable {
    dp: Vec<f64>,
    choice: Vec<Option<CartSize>>,
}

impl SplitTable {
    fn backtrack(&self) -> Option<Vec<CartSize>> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("backtrack", len = self.choice.len() - 1);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut sizes = Vec::new();
        let mut v = self.choice.len() - 1;
        while v > 0 {
            let size = self.choice[v]?;
            debug_assert!(size.span() > 0, "zero-span cart at position {v}");
            sizes.push(size);
            v = v.checked_sub(size.span())?;
        }
        sizes.reverse();
        Some(sizes)
    }
}

/// Signed-size front end to [`OptimalSplitter`].
///
/// `is_free[i]` marks wait items, `min_k..=max_k` bounds the stored items per
/// cart, and a cart storing `k` items costs `(m + 1) * k + b`. Returns the carts
/// as `k` (stored) or `-(k + 1)` (stored, then one wait cut), or an empty list
/// when the sequence is empty or cannot be split within the bounds.
///
/// # Errors
/// [`PartitionError::InvalidBounds`] if `min_k > max_k`,
/// [`PartitionError::InvalidCost`] if `m` or `b` is not finite.
pub fn optimal_partition(
    is_free: &[bool],
    min_k: usize,
    max_k: usize,
    m: f64,
    b: f64,
) -> Result<Vec<i64>, PartitionError> {
    let splitter = OptimalSplitter::new(SplitBounds::new(min_k, max_k)?, CostModel::new(m, b)?);
    Ok(splitter
        .solve(is_free)
        .map(|split| split.signed_sizes())
        .unwrap_or_default())
}
