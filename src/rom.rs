//! ROM assembly: pad a sequence and lay it out at one of the cart densities.
//!
//! A ROM is what the (external) schematic writer turns into minecarts:
//! - density 1: one signal per cart, optionally followed by a stop cart;
//! - density 27: carts of up to 27 slots, packed greedily or with wait cutting;
//! - density 26: 27-slot carts that each start with a wait;
//! - density 729: carts of 27 boxes of 27 slots.

use crate::builder::{CostModel, CART_SLOTS};
use crate::error::PartitionError;
use crate::layouts::{
    GreedyBounds, GreedyPartitioner, NestedBounds, NestedPartitioner, WaitCutPartitioner,
    WaitLedPartitioner,
};
use crate::sequence::Sequence;
use crate::traits::CartPartitioner;

/// Signal of the cart appended after a density-1 ROM to halt the machine.
pub const STOP_SIGNAL: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleParams {
    pub min_carts: usize,
    pub add_stop_move: bool,
}

impl Default for SingleParams {
    fn default() -> Self {
        Self {
            min_carts: 1,
            add_stop_move: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cart27Params {
    min_carts: usize,
    min_items_per_cart: usize,
    cut_wait_moves: Option<CostModel>,
}

impl Cart27Params {
    pub fn new(min_carts: usize, min_items_per_cart: usize) -> Result<Self, PartitionError> {
        if min_items_per_cart > CART_SLOTS {
            return Err(PartitionError::InvalidCapacity {
                what: "cart",
                capacity: CART_SLOTS,
                min_fill: min_items_per_cart,
            });
        }
        Ok(Self {
            min_carts,
            min_items_per_cart,
            cut_wait_moves: None,
        })
    }

    /// Split with the optimal DP and drop redundant waits, priced by `cost`.
    pub fn cutting_waits(mut self, cost: CostModel) -> Self {
        self.cut_wait_moves = Some(cost);
        self
    }

    pub fn min_items(&self) -> usize {
        self.min_carts.saturating_mul(self.min_items_per_cart)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RomParams {
    Single(SingleParams),
    Cart27(Cart27Params),
    WaitLed26,
    Cart729(NestedBounds),
}

/// A packed ROM, one shape per density.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RomLayout {
    Single(Vec<u8>),
    Carts(Vec<Vec<u8>>),
    Nested(Vec<Vec<Vec<u8>>>),
}

impl RomLayout {
    /// Number of minecarts in the ROM.
    pub fn cart_count(&self) -> usize {
        match self {
            RomLayout::Single(signals) => signals.len(),
            RomLayout::Carts(carts) => carts.len(),
            RomLayout::Nested(carts) => carts.len(),
        }
    }
}

/// Pad `sequence` to at least `min_len` (and whatever `partitioner` needs), then pack it.
pub fn pack<P>(
    partitioner: &P,
    sequence: &Sequence,
    min_len: usize,
) -> Result<P::Layout, PartitionError>
where
    P: CartPartitioner<u8>,
{
    let padded = sequence.with_min_items(min_len.max(partitioner.min_len()))?;
    let wait = sequence.wait();
    partitioner.partition(&padded, wait.as_ref())
}

pub fn build_rom(sequence: &Sequence, params: &RomParams) -> Result<RomLayout, PartitionError> {
    #[cfg(feature = "tracing")]
    let span = tracing::info_span!("build_rom", len = sequence.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let layout = match params {
        RomParams::Single(p) => {
            let mut signals = sequence.with_min_items(p.min_carts)?;
            if p.add_stop_move {
                signals.push(STOP_SIGNAL);
            }
            RomLayout::Single(signals)
        }
        RomParams::Cart27(p) => {
            let carts = match p.cut_wait_moves {
                Some(cost) => {
                    let partitioner = WaitCutPartitioner::full_carts(p.min_items_per_cart, cost)?;
                    pack(&partitioner, sequence, p.min_items())?
                }
                None => {
                    let bounds =
                        GreedyBounds::new(CART_SLOTS, p.min_items_per_cart, p.min_carts)?;
                    pack(&GreedyPartitioner::new(bounds), sequence, p.min_items())?
                }
            };
            RomLayout::Carts(carts)
        }
        RomParams::WaitLed26 => {
            let partitioner = WaitLedPartitioner::default();
            let min_len = partitioner.padded_len(sequence.len());
            RomLayout::Carts(pack(&partitioner, sequence, min_len)?)
        }
        RomParams::Cart729(bounds) => {
            RomLayout::Nested(pack(&NestedPartitioner::new(*bounds), sequence, 0)?)
        }
    };

    #[cfg(feature = "tracing")]
    tracing::info!(carts = layout.cart_count(), "rom assembled");
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rom_appends_stop_cart() {
        let seq = Sequence::new(vec![4, 9], Some(1));
        let rom = build_rom(
            &seq,
            &RomParams::Single(SingleParams {
                min_carts: 4,
                add_stop_move: true,
            }),
        )
        .unwrap();
        assert_eq!(rom, RomLayout::Single(vec![4, 9, 1, 1, STOP_SIGNAL]));
        assert_eq!(rom.cart_count(), 5);
    }

    #[test]
    fn cart27_greedy_pads_to_minimum() {
        let seq = Sequence::new(vec![5; 4], Some(0));
        let params = RomParams::Cart27(Cart27Params::new(2, 3).unwrap());
        let rom = build_rom(&seq, &params).unwrap();
        assert_eq!(rom, RomLayout::Carts(vec![vec![5, 5, 5], vec![5, 0, 0]]));
    }

    #[test]
    fn cart27_cutting_waits_drops_boundary_wait() {
        let mut signals = vec![5u8; 27];
        signals.push(0);
        signals.extend([6, 6]);
        let seq = Sequence::new(signals, Some(0));
        let params =
            RomParams::Cart27(Cart27Params::new(1, 1).unwrap().cutting_waits(CostModel::default()));
        let RomLayout::Carts(carts) = build_rom(&seq, &params).unwrap() else {
            panic!("expected flat carts");
        };
        assert_eq!(carts.len(), 2);
        assert_eq!(carts[0], vec![5; 27]);
        assert_eq!(carts[1], vec![6, 6]);
    }

    #[test]
    fn cart27_cutting_waits_without_minimum_has_no_empty_carts() {
        let seq = Sequence::new(vec![0, 0, 5, 0, 6, 0], Some(0));
        let params =
            RomParams::Cart27(Cart27Params::new(1, 0).unwrap().cutting_waits(CostModel::default()));
        let RomLayout::Carts(carts) = build_rom(&seq, &params).unwrap() else {
            panic!("expected flat carts");
        };
        assert!(!carts.is_empty());
        assert!(carts.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn wait_led_needs_a_wait_move() {
        let seq = Sequence::new(vec![5; 3], None);
        assert_eq!(
            build_rom(&seq, &RomParams::WaitLed26),
            Err(PartitionError::MissingWait)
        );
    }

    #[test]
    fn cart729_pads_to_required_len() {
        let seq = Sequence::new(vec![9], Some(0));
        let bounds = NestedBounds::full_carts(1, 2, 2).unwrap();
        let rom = build_rom(&seq, &RomParams::Cart729(bounds)).unwrap();
        assert_eq!(rom, RomLayout::Nested(vec![vec![vec![9, 0], vec![0, 0]]]));
    }

    #[test]
    fn min_fill_above_cart_slots_is_rejected() {
        assert!(Cart27Params::new(1, 28).is_err());
    }
}
