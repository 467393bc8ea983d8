//! Per-rarity consecutive-miss counters ("bad-luck protection" state).

use crate::perks::Rarity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tracks how many confirmed selections in a row each pity-eligible rarity
/// tier has gone without being chosen.
///
/// Common is the baseline tier and is never tracked. One update per
/// confirmed selection; offer generation alone never touches these counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PityTracker {
    misses: HashMap<Rarity, u32>,
}

impl Default for PityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PityTracker {
    pub fn new() -> Self {
        let misses = Rarity::all()
            .into_iter()
            .filter(Rarity::is_pity_tracked)
            .map(|rarity| (rarity, 0))
            .collect();
        Self { misses }
    }

    /// Applies one confirmed selection: the selected tier's streak resets to
    /// zero (if tracked) and every other tracked tier's streak grows by one.
    pub fn record(&mut self, selected: Rarity) {
        for (&rarity, count) in self.misses.iter_mut() {
            if rarity == selected {
                *count = 0;
            } else {
                *count += 1;
            }
        }
    }

    /// Current miss streak for a tier. Untracked tiers (Common) are always 0.
    pub fn miss_count(&self, rarity: Rarity) -> u32 {
        self.misses.get(&rarity).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &HashMap<Rarity, u32> {
        &self.misses
    }

    pub fn reset(&mut self) {
        for count in self.misses.values_mut() {
            *count = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tracker_starts_at_zero() {
        let pity = PityTracker::new();
        for rarity in Rarity::all() {
            assert_eq!(pity.miss_count(rarity), 0);
        }
    }

    #[test]
    fn test_common_selection_increments_all_tracked_tiers() {
        let mut pity = PityTracker::new();
        pity.record(Rarity::Common);
        pity.record(Rarity::Common);

        assert_eq!(pity.miss_count(Rarity::Common), 0);
        assert_eq!(pity.miss_count(Rarity::Rare), 2);
        assert_eq!(pity.miss_count(Rarity::Epic), 2);
        assert_eq!(pity.miss_count(Rarity::Legendary), 2);
    }

    #[test]
    fn test_selection_resets_own_tier_and_bumps_the_rest() {
        let mut pity = PityTracker::new();
        for _ in 0..4 {
            pity.record(Rarity::Common);
        }
        pity.record(Rarity::Epic);

        assert_eq!(pity.miss_count(Rarity::Epic), 0);
        assert_eq!(pity.miss_count(Rarity::Rare), 5);
        assert_eq!(pity.miss_count(Rarity::Legendary), 5);
    }

    #[test]
    fn test_reset_zeroes_all_streaks() {
        let mut pity = PityTracker::new();
        for _ in 0..7 {
            pity.record(Rarity::Common);
        }
        pity.reset();

        for rarity in Rarity::all() {
            assert_eq!(pity.miss_count(rarity), 0);
        }
    }
}
