//! Error type shared by every partitioner in the crate.
//!
//! An infeasible split is *not* an error at the engine level: the DP reports it
//! as `None` (or an empty size list). It only becomes
//! [`PartitionError::Infeasible`] once a layout has to produce real containers.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PartitionError {
    #[error("group bounds are inverted: min_k = {min_k} exceeds max_k = {max_k}")]
    InvalidBounds { min_k: usize, max_k: usize },

    #[error("cost coefficients must be finite (per_item = {per_item}, per_cart = {per_cart})")]
    InvalidCost { per_item: f64, per_cart: f64 },

    #[error("{what} capacity must be at least 1 and no smaller than its minimum fill {min_fill}, got {capacity}")]
    InvalidCapacity {
        what: &'static str,
        capacity: usize,
        min_fill: usize,
    },

    #[error("sequence of {len} items is shorter than the required minimum of {required}")]
    Underflow { len: usize, required: usize },

    #[error("sequence needs a wait move but none is defined")]
    MissingWait,

    #[error("move '{0}' has no signal strength in the encoding")]
    UnknownMove(String),

    #[error("no split of {len} items satisfies group sizes {min_k}..={max_k}")]
    Infeasible {
        len: usize,
        min_k: usize,
        max_k: usize,
    },
}
