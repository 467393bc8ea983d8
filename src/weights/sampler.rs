//! Weighted sampling without replacement.

use rand::Rng;

/// Draws up to `count` distinct indices from `weights`, each draw
/// proportional to the remaining entries' weights.
///
/// The remaining pool is tracked as an explicit index vec, so nothing is
/// removed from a collection while it is being walked. Within one draw the
/// first entry whose cumulative weight reaches the roll wins, which makes
/// floating-point boundary ties order-stable: a fixed RNG sequence always
/// yields the same result.
///
/// An empty pool or `count == 0` yields an empty vec, never an error. The
/// result length is `min(count, weights.len())` as long as the total weight
/// stays positive (the weight floor upholds that for engine-produced
/// weights).
pub fn draw_indices(weights: &[f64], count: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..weights.len()).collect();
    let mut drawn = Vec::with_capacity(count.min(weights.len()));

    while drawn.len() < count && !remaining.is_empty() {
        let total: f64 = remaining.iter().map(|&i| weights[i]).sum();
        if !(total > 0.0) {
            break;
        }

        let roll = rng.gen_range(0.0..total);
        let mut cumulative = 0.0;
        // Fall back to the last remaining entry if accumulated rounding
        // keeps the running total just under the roll.
        let mut chosen = remaining.len() - 1;
        for (position, &index) in remaining.iter().enumerate() {
            cumulative += weights[index];
            if roll <= cumulative {
                chosen = position;
                break;
            }
        }
        drawn.push(remaining.remove(chosen));
    }

    drawn
}
