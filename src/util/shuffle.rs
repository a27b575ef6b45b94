//! In-place Fisher-Yates shuffle over a [`RandomSource`]

use super::random::RandomSource;

/// Shuffle `items` in place
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Return a shuffled copy of `items`
pub fn shuffled<T: Clone>(items: &[T], rng: &mut dyn RandomSource) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng);
    copy
}
