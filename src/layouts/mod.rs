//! Concrete packing strategies.
//!
//! Each strategy implements [`CartPartitioner`](crate::traits::CartPartitioner):
//! - [`greedy`]    : flat carts filled left to right with a minimum-fill rule.
//! - [`nested`]    : carts of boxes, the same rule at both levels.
//! - [`wait_cut`]  : flat carts split by the optimal DP, dropping redundant waits.
//! - [`wait_led`]  : 26-slot carts that each open with a wait move.

pub mod greedy;
pub mod nested;
pub mod wait_cut;
pub mod wait_led;

pub use greedy::{greedy_partition, GreedyBounds, GreedyPartitioner};
pub use nested::{nested_partition, NestedBounds, NestedPartitioner};
pub use wait_cut::WaitCutPartitioner;
pub use wait_led::WaitLedPartitioner;
