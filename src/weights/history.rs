//! Cumulative record of how often each tag has been chosen.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-tag selection counts plus a running total of confirmed selections.
///
/// Counts only ever grow, except through [`reset`](Self::reset). Owned
/// exclusively by one engine instance; there is no cross-session sharing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSelectionHistory {
    counts: HashMap<String, u32>,
    total_selections: u32,
}

impl TagSelectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one confirmed selection carrying the given tags.
    pub fn record(&mut self, tags: &[String]) {
        self.total_selections += 1;
        for tag in tags {
            *self.counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    pub fn count(&self, tag: &str) -> u32 {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    pub fn total_selections(&self) -> u32 {
        self.total_selections
    }

    pub fn counts(&self) -> &HashMap<String, u32> {
        &self.counts
    }

    /// The `n` most-selected tags, highest count first.
    ///
    /// Ties break lexicographically so the result is stable across runs
    /// regardless of map iteration order.
    pub fn top_tags(&self, n: usize) -> Vec<&str> {
        let mut entries: Vec<(&str, u32)> =
            self.counts.iter().map(|(t, &c)| (t.as_str(), c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.into_iter().take(n).map(|(t, _)| t).collect()
    }

    pub fn most_selected(&self) -> Option<&str> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(t, _)| t.as_str())
    }

    pub fn least_selected(&self) -> Option<&str> {
        self.counts
            .iter()
            .min_by(|a, b| a.1.cmp(b.1).then_with(|| a.0.cmp(b.0)))
            .map(|(t, _)| t.as_str())
    }

    pub fn reset(&mut self) {
        self.counts.clear();
        self.total_selections = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_record_accumulates_counts() {
        let mut history = TagSelectionHistory::new();
        history.record(&tags(&["fire", "aoe"]));
        history.record(&tags(&["fire"]));

        assert_eq!(history.count("fire"), 2);
        assert_eq!(history.count("aoe"), 1);
        assert_eq!(history.count("ice"), 0);
        assert_eq!(history.total_selections(), 2);
    }

    #[test]
    fn test_tagless_selection_still_counts_toward_total() {
        let mut history = TagSelectionHistory::new();
        history.record(&[]);
        assert_eq!(history.total_selections(), 1);
        assert!(history.counts().is_empty());
    }

    #[test]
    fn test_top_tags_orders_by_count_then_name() {
        let mut history = TagSelectionHistory::new();
        for _ in 0..3 {
            history.record(&tags(&["fire"]));
        }
        for _ in 0..2 {
            history.record(&tags(&["ice"]));
        }
        // Same count as ice: lexicographic tie-break puts "aoe" first
        history.record(&tags(&["aoe"]));
        history.record(&tags(&["aoe"]));

        assert_eq!(history.top_tags(2), vec!["fire", "aoe"]);
        assert_eq!(history.top_tags(10), vec!["fire", "aoe", "ice"]);
    }

    #[test]
    fn test_most_and_least_selected() {
        let mut history = TagSelectionHistory::new();
        assert_eq!(history.most_selected(), None);
        assert_eq!(history.least_selected(), None);

        history.record(&tags(&["fire", "ice"]));
        history.record(&tags(&["fire"]));

        assert_eq!(history.most_selected(), Some("fire"));
        assert_eq!(history.least_selected(), Some("ice"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut history = TagSelectionHistory::new();
        history.record(&tags(&["fire"]));
        history.reset();

        assert_eq!(history.count("fire"), 0);
        assert_eq!(history.total_selections(), 0);
    }
}
