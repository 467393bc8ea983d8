//! Error types for configuration validation and PRD constant solving.

use thiserror::Error;

/// Errors raised while validating or loading engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Base rarity weights must stay strictly positive or the sampler's
    /// total-weight invariant breaks.
    #[error("base weight for {rarity} must be positive, got {weight}")]
    NonPositiveWeight { rarity: &'static str, weight: f64 },

    /// A pity interval of zero would divide by zero in the bonus formula.
    #[error("pity interval must be at least 1")]
    InvalidPityInterval,

    /// Bias/pity/diversity factors are multipliers and cannot be negative.
    #[error("{name} must be non-negative, got {value}")]
    InvalidFactor { name: &'static str, value: f64 },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised by the PRD C-value solver.
#[derive(Debug, Error)]
pub enum PrdError {
    /// The PRD equation is only defined for probabilities in the open
    /// interval (0, 1).
    #[error("probability {0} is outside the open interval (0, 1)")]
    ProbabilityOutOfRange(f64),

    /// Newton-Raphson failed to land within tolerance of the target rate.
    #[error("C-value solve for p = {probability} did not converge (residual {residual:e})")]
    Convergence { probability: f64, residual: f64 },
}
