//! Streak-tracked PRD trigger checks.

use crate::prd::cvalue::CValueCache;
use rand::Rng;
use std::collections::HashMap;

/// Failure streaks are tracked per `(event, probability)` pair, so the same
/// event id checked at two different rates escalates independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EventKey {
    event_id: String,
    probability_bits: u64,
}

impl EventKey {
    fn new(event_id: &str, probability: f64) -> Self {
        Self {
            event_id: event_id.to_string(),
            probability_bits: probability.to_bits(),
        }
    }
}

/// Full result of one PRD check, for callers that want to display or log
/// the escalation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrdOutcome {
    pub triggered: bool,
    /// Consecutive misses *after* this check (0 right after a trigger).
    pub failure_count: u32,
    /// The escalated probability this check rolled against.
    pub effective_probability: f64,
}

/// Pseudo-random distribution engine: yes/no trigger checks whose chance
/// escalates linearly with every consecutive miss.
///
/// Each check rolls against `c * (misses + 1)`; a trigger resets the streak.
/// The long-run trigger rate converges to the requested probability while
/// the worst miss streak stays bounded at `ceil(1/c)` attempts. One instance
/// per logical owner - the engine is not synchronized.
#[derive(Debug, Clone)]
pub struct PrdEngine {
    cache: CValueCache,
    failures: HashMap<EventKey, u32>,
}

impl Default for PrdEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PrdEngine {
    /// Engine with the standard 5%..=50% C-value table preloaded.
    pub fn new() -> Self {
        Self {
            cache: CValueCache::with_standard_table(),
            failures: HashMap::new(),
        }
    }

    /// Runs one PRD check for `event_id` at the target long-run rate
    /// `probability`.
    ///
    /// Degenerate rates need no solver: `probability <= 0` never triggers
    /// and leaves the streak untouched (a zero-chance event must not pity
    /// itself into firing), `probability >= 1` always triggers and resets
    /// the streak.
    pub fn try_trigger(&mut self, event_id: &str, probability: f64, rng: &mut impl Rng) -> bool {
        self.try_trigger_detailed(event_id, probability, rng).triggered
    }

    /// [`try_trigger`](Self::try_trigger) variant exposing the streak and
    /// the escalated probability that was rolled against.
    pub fn try_trigger_detailed(
        &mut self,
        event_id: &str,
        probability: f64,
        rng: &mut impl Rng,
    ) -> PrdOutcome {
        if probability <= 0.0 {
            return PrdOutcome {
                triggered: false,
                failure_count: self.failure_count(event_id, probability),
                effective_probability: 0.0,
            };
        }
        if probability >= 1.0 {
            self.failures.insert(EventKey::new(event_id, probability), 0);
            return PrdOutcome {
                triggered: true,
                failure_count: 0,
                effective_probability: 1.0,
            };
        }

        let c = match self.cache.resolve(probability) {
            Ok(c) => c,
            Err(err) => {
                log::warn!("PRD solve failed for \"{event_id}\", using flat rate: {err}");
                probability
            }
        };

        let key = EventKey::new(event_id, probability);
        let misses = self.failures.get(&key).copied().unwrap_or(0);
        let effective_probability = c * f64::from(misses + 1);
        let triggered = rng.gen::<f64>() <= effective_probability;

        let failure_count = if triggered { 0 } else { misses + 1 };
        self.failures.insert(key, failure_count);

        PrdOutcome {
            triggered,
            failure_count,
            effective_probability,
        }
    }

    /// Current consecutive-miss streak for an event, 0 if never checked.
    pub fn failure_count(&self, event_id: &str, probability: f64) -> u32 {
        self.failures
            .get(&EventKey::new(event_id, probability))
            .copied()
            .unwrap_or(0)
    }

    /// Clears the streak for one `(event, probability)` pair.
    pub fn reset_counter(&mut self, event_id: &str, probability: f64) {
        self.failures.insert(EventKey::new(event_id, probability), 0);
    }

    /// Clears every tracked streak.
    pub fn reset_all_counters(&mut self) {
        self.failures.clear();
    }
}
