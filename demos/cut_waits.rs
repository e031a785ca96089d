//! Example: split a move sequence into 27-slot carts, dropping waits at cart boundaries.
//!
//! Run with:
//! `cargo run --example cut_waits`

use std::collections::HashMap;

use cart_split::rom::{build_rom, Cart27Params, RomLayout, RomParams};
use cart_split::utils::wait_mask;
use cart_split::{CostModel, OptimalSplitterBuilder, Sequence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let encoding: HashMap<String, u8> = [("wait", 0u8), ("left", 1), ("right", 2), ("jump", 3)]
        .into_iter()
        .map(|(name, signal)| (name.to_string(), signal))
        .collect();

    let mut moves = Vec::new();
    for round in 0..12 {
        moves.extend(["left", "left", "jump", "right"]);
        moves.extend(std::iter::repeat("wait").take(round % 4));
    }
    let sequence = Sequence::decode(&moves, &encoding)?;

    let is_wait = wait_mask(sequence.signals(), sequence.wait().as_ref());
    let splitter = OptimalSplitterBuilder::new().with_bounds(1, 27).build()?;
    if let Some(split) = splitter.solve(&is_wait) {
        println!("signed sizes: {:?}", split.signed_sizes());
        println!("cost {} with {} waits cut", split.cost, split.wait_cuts());
    }

    let params = RomParams::Cart27(Cart27Params::new(1, 1)?.cutting_waits(CostModel::default()));
    if let RomLayout::Carts(carts) = build_rom(&sequence, &params)? {
        for (i, cart) in carts.iter().enumerate() {
            println!("cart {i:>2}: {cart:?}");
        }
    }
    Ok(())
}
