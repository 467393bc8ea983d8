//! Combines base rarity weight, tag bias, pity bonus, and the diversity
//! penalty into final per-option weights.

use crate::core::config::{RarityWeightTable, WeightParams};
use crate::core::constants::WEIGHT_FLOOR;
use crate::perks::{PerkOption, Rarity};
use crate::weights::history::TagSelectionHistory;
use crate::weights::pity::PityTracker;

/// Stateless weight formula over one option plus the session's history and
/// pity state. The table and params are the only configuration it owns.
#[derive(Debug, Clone, Default)]
pub struct WeightCalculator {
    table: RarityWeightTable,
    params: WeightParams,
}

impl WeightCalculator {
    pub fn new(table: RarityWeightTable, params: WeightParams) -> Self {
        Self { table, params }
    }

    pub fn params(&self) -> &WeightParams {
        &self.params
    }

    /// Pre-penalty weight for a single option:
    /// `base(rarity) * tag_bias(tags) * pity_bonus(rarity)`, floored.
    pub fn weight(
        &self,
        option: &PerkOption,
        history: &TagSelectionHistory,
        pity: &PityTracker,
    ) -> f64 {
        let weight = self.table.base_weight(option.rarity)
            * self.tag_bias(&option.tags, history)
            * self.pity_bonus(option.rarity, pity);
        weight.max(WEIGHT_FLOOR)
    }

    /// Weights for a whole candidate batch, with the diversity-penalty pass
    /// applied and every entry re-floored afterwards.
    pub fn score_batch(
        &self,
        candidates: &[PerkOption],
        history: &TagSelectionHistory,
        pity: &PityTracker,
    ) -> Vec<f64> {
        let mut weights: Vec<f64> = candidates
            .iter()
            .map(|option| self.weight(option, history, pity))
            .collect();

        let top_tags = history.top_tags(self.params.top_tag_count);
        for (option, weight) in candidates.iter().zip(weights.iter_mut()) {
            let overlap = option
                .tags
                .iter()
                .filter(|tag| top_tags.contains(&tag.as_str()))
                .count();
            if overlap > 0 {
                let penalty = (1.0 - overlap as f64 * self.params.diversity_bonus).max(0.0);
                *weight = (*weight * penalty).max(WEIGHT_FLOOR);
            }
        }
        weights
    }

    /// Preference reinforcement: each tag multiplies the weight by
    /// `1 + tag_bias_factor * times_selected`. Previously favored tags make
    /// an option *more* likely, not less.
    fn tag_bias(&self, tags: &[String], history: &TagSelectionHistory) -> f64 {
        tags.iter()
            .map(|tag| 1.0 + self.params.tag_bias_factor * history.count(tag) as f64)
            .product()
    }

    /// 1.0 for Common; otherwise grows by `pity_factor` for every completed
    /// `pity_interval` of consecutive misses, snapping back to 1.0 the
    /// moment the tier is selected.
    fn pity_bonus(&self, rarity: Rarity, pity: &PityTracker) -> f64 {
        if !rarity.is_pity_tracked() {
            return 1.0;
        }
        let stacks = pity.miss_count(rarity) / self.params.pity_interval;
        1.0 + self.params.pity_factor * stacks as f64
    }
}
