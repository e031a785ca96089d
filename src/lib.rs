//! Cart Split
//!
//! This crate decides how a sequence of redstone moves, each already encoded to
//! a signal strength, is distributed over minecarts (and boxes inside carts)
//! of bounded capacity.
//!
//! ## Core idea
//! 1. Mark which items are *waits*: fillers that may be dropped at a cart
//!    boundary instead of being stored.
//! 2. Let [`OptimalSplitter`] choose cart boundaries that minimise an affine
//!    per-cart cost, cutting waits where that pays off. The DP runs in
//!    amortised linear time thanks to a monotonic sliding-window minimum.
//! 3. Or, when wait cutting is off, use one of the rule-based layouts in
//!    [`layouts`], which fill carts left to right while keeping enough items
//!    back for every cart that must still be filled.
//!
//! ## Quick start
//! ```
//! use cart_split::optimal_partition;
//!
//! // two moves, a wait, one more move; carts of 1..=3 items
//! let sizes = optimal_partition(&[false, false, true, false], 1, 3, 0.0, 1.0).unwrap();
//! // a cart of 2 that swallows the wait, then a cart of 1
//! assert_eq!(sizes, vec![-3, 1]);
//! ```
//!
//! ## Layouts
//! The `layouts` module contains the packing strategies behind each ROM density:
//! - greedy flat carts with a minimum fill,
//! - nested carts of boxes,
//! - DP-driven carts that cut redundant waits,
//! - wait-led 26-slot carts.
//!
//! [`rom::build_rom`] pads a [`Sequence`] and dispatches to the right one.

pub mod builder;
pub mod cart;
pub mod engine;
pub mod error;
pub mod layouts;
pub mod rom;
pub mod sequence;
pub mod traits;
pub mod utils;
pub mod window;

pub use crate::builder::{CostModel, OptimalSplitterBuilder, SplitBounds, CART_SLOTS};
pub use crate::cart::CartSize;
pub use crate::engine::{optimal_partition, OptimalSplitter, Split};
pub use crate::error::PartitionError;
pub use crate::layouts::{greedy_partition, nested_partition};
pub use crate::sequence::Sequence;
pub use crate::traits::CartPartitioner;
