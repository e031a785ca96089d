#![cfg(feature = "parallel")]

use cart_split::{OptimalSplitter, OptimalSplitterBuilder};
use proptest::prelude::*;

fn splitter(min_k: usize, max_k: usize) -> OptimalSplitter {
    OptimalSplitterBuilder::new()
        .with_bounds(min_k, max_k)
        .with_cost(0.5, 2.0)
        .build()
        .unwrap()
}

fn masks() -> impl Strategy<Value = Vec<Vec<bool>>> {
    prop::collection::vec(
        prop::collection::vec(prop::bool::weighted(0.25), 0..300),
        0..16,
    )
}

proptest! {
    #[test]
    fn batch_matches_sequential(
        inputs in masks(),
        min_k in 0usize..4,
        extra in 0usize..27,
    ) {
        let s = splitter(min_k, min_k + extra);
        let borrowed: Vec<&[bool]> = inputs.iter().map(Vec::as_slice).collect();
        let batch = s.solve_batch(&borrowed);
        prop_assert_eq!(batch.len(), inputs.len());
        for (mask, got) in inputs.iter().zip(batch) {
            prop_assert_eq!(got, s.solve(mask));
        }
    }
}

#[test]
fn batch_keeps_input_order() {
    let s = splitter(1, 27);
    let inputs: Vec<Vec<bool>> = (0..64)
        .map(|n| (0..n).map(|i| i % 5 == 4).collect())
        .collect();
    let borrowed: Vec<&[bool]> = inputs.iter().map(Vec::as_slice).collect();
    for (mask, split) in inputs.iter().zip(s.solve_batch(&borrowed)) {
        let split = split.unwrap();
        let spanned: usize = split.sizes.iter().map(|c| c.span()).sum();
        assert_eq!(spanned, mask.len());
    }
}
