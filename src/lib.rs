//! Luckbox - Probabilistic Selection for Game Mechanics
//!
//! Two cooperating engines that keep randomness *feeling* fair:
//!
//! - [`DynamicWeightEngine`] picks which reward/perk options get offered,
//!   biasing toward tags the player has favored, escalating "pity" weight for
//!   rarity tiers that have gone unselected, and penalizing over-represented
//!   tags before drawing without replacement.
//! - [`PrdEngine`] bounds the streak variance of repeated yes/no checks
//!   (crits, procs, drops) around a target long-run rate using the classic
//!   pseudo-random-distribution constant.
//!
//! All randomness is injected as `&mut impl Rng`, so every outcome is
//! reproducible under a seeded generator.

pub mod core;
pub mod error;
pub mod perks;
pub mod prd;
pub mod weights;

pub use crate::core::config::{EngineConfig, RarityWeightTable, WeightParams};
pub use crate::error::{ConfigError, PrdError};
pub use crate::perks::{PerkOption, Rarity};
pub use crate::prd::{calculate_c_value, PrdEngine, PrdOutcome};
pub use crate::weights::{DynamicWeightEngine, SelectionStats};
