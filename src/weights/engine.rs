//! Session-level facade tying weighting, history, pity, and sampling
//! together.

use crate::core::config::EngineConfig;
use crate::perks::{PerkOption, Rarity};
use crate::weights::calculator::WeightCalculator;
use crate::weights::history::TagSelectionHistory;
use crate::weights::pity::PityTracker;
use crate::weights::sampler::draw_indices;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of a session's selection behavior, for balancing dashboards and
/// debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub total_selections: u32,
    pub tag_selection_counts: HashMap<String, u32>,
    pub rarity_miss_counts: HashMap<Rarity, u32>,
    pub most_selected_tag: Option<String>,
    pub least_selected_tag: Option<String>,
}

/// Dynamic weighting engine for one game session.
///
/// Offer generation is read-only; state only changes when the caller
/// confirms a pick via [`record_selection`](Self::record_selection). One
/// instance per logical owner - the engine is not synchronized.
#[derive(Debug, Clone, Default)]
pub struct DynamicWeightEngine {
    calculator: WeightCalculator,
    history: TagSelectionHistory,
    pity: PityTracker,
}

impl DynamicWeightEngine {
    /// Engine with the default tuning and rarity table.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            calculator: WeightCalculator::new(config.rarity_weights, config.params),
            history: TagSelectionHistory::new(),
            pity: PityTracker::new(),
        }
    }

    /// Scores every candidate against the session's history and pity state,
    /// then draws up to `count` distinct options without replacement.
    ///
    /// An empty candidate list yields an empty offer; `count` larger than
    /// the pool yields the whole pool in draw order.
    pub fn generate_weighted_options(
        &self,
        candidates: &[PerkOption],
        count: usize,
        rng: &mut impl Rng,
    ) -> Vec<PerkOption> {
        if candidates.is_empty() || count == 0 {
            return Vec::new();
        }

        let weights = self.calculator.score_batch(candidates, &self.history, &self.pity);
        log::debug!(
            "scored {} candidates, total weight {:.3}",
            candidates.len(),
            weights.iter().sum::<f64>()
        );

        draw_indices(&weights, count, rng)
            .into_iter()
            .map(|index| candidates[index].clone())
            .collect()
    }

    /// Confirms that the player picked `option` from the last offer: bumps
    /// the total and the option's tag counts, and advances pity streaks.
    pub fn record_selection(&mut self, option: &PerkOption) {
        self.history.record(&option.tags);
        self.pity.record(option.rarity);
    }

    pub fn stats(&self) -> SelectionStats {
        SelectionStats {
            total_selections: self.history.total_selections(),
            tag_selection_counts: self.history.counts().clone(),
            rarity_miss_counts: self.pity.counts().clone(),
            most_selected_tag: self.history.most_selected().map(String::from),
            least_selected_tag: self.history.least_selected().map(String::from),
        }
    }

    /// Wipes all session state back to a fresh engine (tuning is kept).
    pub fn reset(&mut self) {
        self.history.reset();
        self.pity.reset();
    }

    pub fn history(&self) -> &TagSelectionHistory {
        &self.history
    }

    pub fn pity(&self) -> &PityTracker {
        &self.pity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn demo_pool() -> Vec<PerkOption> {
        vec![
            PerkOption::new("sharp_blade", Rarity::Common, &["damage", "melee"]),
            PerkOption::new("thick_hide", Rarity::Common, &["defense"]),
            PerkOption::new("fleet_foot", Rarity::Common, &["mobility"]),
            PerkOption::new("flame_edge", Rarity::Rare, &["damage", "fire"]),
            PerkOption::new("stone_skin", Rarity::Epic, &["defense"]),
            PerkOption::new("phoenix_heart", Rarity::Legendary, &["fire", "revive"]),
        ]
    }

    #[test]
    fn test_empty_candidates_yield_empty_offer() {
        let engine = DynamicWeightEngine::new();
        let mut rng = create_test_rng();
        assert!(engine.generate_weighted_options(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_offer_has_requested_size_and_no_duplicates() {
        let engine = DynamicWeightEngine::new();
        let pool = demo_pool();
        let mut rng = create_test_rng();

        for _ in 0..100 {
            let offer = engine.generate_weighted_options(&pool, 3, &mut rng);
            assert_eq!(offer.len(), 3);
            let mut ids: Vec<&str> = offer.iter().map(|o| o.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 3, "offer contained a duplicate option");
        }
    }

    #[test]
    fn test_offer_generation_does_not_mutate_state() {
        let engine = DynamicWeightEngine::new();
        let pool = demo_pool();
        let mut rng = create_test_rng();

        engine.generate_weighted_options(&pool, 3, &mut rng);
        let stats = engine.stats();
        assert_eq!(stats.total_selections, 0);
        assert!(stats.tag_selection_counts.is_empty());
    }

    #[test]
    fn test_record_selection_updates_history_and_pity() {
        let mut engine = DynamicWeightEngine::new();
        let pool = demo_pool();

        engine.record_selection(&pool[3]); // flame_edge: Rare, damage+fire
        engine.record_selection(&pool[0]); // sharp_blade: Common, damage+melee

        let stats = engine.stats();
        assert_eq!(stats.total_selections, 2);
        assert_eq!(stats.tag_selection_counts["damage"], 2);
        assert_eq!(stats.tag_selection_counts["fire"], 1);
        assert_eq!(stats.most_selected_tag.as_deref(), Some("damage"));
        // Rare was picked then missed once; Epic/Legendary missed twice
        assert_eq!(stats.rarity_miss_counts[&Rarity::Rare], 1);
        assert_eq!(stats.rarity_miss_counts[&Rarity::Epic], 2);
        assert_eq!(stats.rarity_miss_counts[&Rarity::Legendary], 2);
    }

    #[test]
    fn test_reset_returns_engine_to_fresh_state() {
        let mut engine = DynamicWeightEngine::new();
        let pool = demo_pool();
        engine.record_selection(&pool[0]);
        engine.record_selection(&pool[5]);

        engine.reset();
        let stats = engine.stats();
        assert_eq!(stats.total_selections, 0);
        assert!(stats.tag_selection_counts.is_empty());
        assert!(stats.rarity_miss_counts.values().all(|&c| c == 0));
        assert_eq!(stats.most_selected_tag, None);
    }

    #[test]
    fn test_three_equal_commons_drawn_evenly() {
        let engine = DynamicWeightEngine::new();
        let pool = vec![
            PerkOption::new("a", Rarity::Common, &[]),
            PerkOption::new("b", Rarity::Common, &[]),
            PerkOption::new("c", Rarity::Common, &[]),
        ];
        let mut rng = create_test_rng();
        let trials = 9_000;

        let mut picks: HashMap<String, u32> = HashMap::new();
        for _ in 0..trials {
            let offer = engine.generate_weighted_options(&pool, 2, &mut rng);
            assert_eq!(offer.len(), 2);
            assert_ne!(offer[0].id, offer[1].id);
            for option in offer {
                *picks.entry(option.id).or_insert(0) += 1;
            }
        }

        for (id, &count) in &picks {
            let rate = count as f64 / trials as f64;
            assert!(
                (0.61..=0.72).contains(&rate),
                "option {id} offered at rate {rate}, expected ~0.667"
            );
        }
    }
}
