// Dynamic weighting constants
pub const TAG_BIAS_FACTOR: f64 = 0.3;
pub const PITY_FACTOR: f64 = 0.8;
pub const PITY_INTERVAL: u32 = 5;
pub const DIVERSITY_BONUS: f64 = 0.1;
pub const TOP_TAG_COUNT: usize = 5;

// Base rarity weights (Common is the baseline, Legendary the long shot)
pub const BASE_WEIGHT_COMMON: f64 = 100.0;
pub const BASE_WEIGHT_RARE: f64 = 30.0;
pub const BASE_WEIGHT_EPIC: f64 = 10.0;
pub const BASE_WEIGHT_LEGENDARY: f64 = 3.0;

/// Base weight used for rarity tiers missing from the configured table.
pub const FALLBACK_BASE_WEIGHT: f64 = 10.0;

/// Hard floor on every computed weight. No option may reach zero probability
/// mass, so the sampler's running total is always positive.
pub const WEIGHT_FLOOR: f64 = 0.01;

// PRD solver constants
pub const NEWTON_MAX_ITERATIONS: u32 = 20;
pub const NEWTON_STEP_EPSILON: f64 = 1e-10;
/// Residual tolerance on `expected_trigger_rate(c) - p` after iteration.
pub const NEWTON_RESIDUAL_TOLERANCE: f64 = 1e-7;
