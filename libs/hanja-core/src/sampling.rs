//! Uniform random sampling over card pools.

use rand::Rng;

/// In-place Fisher-Yates shuffle.
///
/// Walks from the back, swapping each slot with a uniformly chosen slot at
/// or before it, which gives every permutation equal probability.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle `pool` and keep the first `count` entries.
///
/// Returns fewer than `count` when the pool is smaller, and an empty vector
/// for an empty pool.
pub fn sample<T, R: Rng + ?Sized>(mut pool: Vec<T>, count: usize, rng: &mut R) -> Vec<T> {
    shuffle(&mut pool, rng);
    pool.truncate(count);
    pool
}

/// Uniform pick of one element.
pub fn choose_one<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}
