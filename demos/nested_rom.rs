//! Example: lay a long sequence out as 729-slot carts (27 boxes of 27 signals).
//!
//! Run with:
//! `cargo run --example nested_rom`

use cart_split::layouts::NestedBounds;
use cart_split::rom::{build_rom, RomParams};
use cart_split::Sequence;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let signals: Vec<u8> = (0..1_500u32).map(|i| (i % 15 + 1) as u8).collect();
    let sequence = Sequence::new(signals, Some(0));

    // at least two carts, each with three boxes of four signals
    let bounds = NestedBounds::full_carts(2, 3, 4)?;
    let rom = build_rom(&sequence, &RomParams::Cart729(bounds))?;
    println!("{} carts", rom.cart_count());

    if let cart_split::rom::RomLayout::Nested(carts) = rom {
        for (i, cart) in carts.iter().enumerate() {
            let boxes: Vec<usize> = cart.iter().map(Vec::len).collect();
            println!("cart {i}: {boxes:?}");
        }
    }
    Ok(())
}
