//! Dynamic weighting: selection history, pity escalation, weight
//! calculation, and weighted sampling without replacement.

pub mod calculator;
pub mod engine;
pub mod history;
pub mod pity;
pub mod sampler;

pub use calculator::*;
pub use engine::*;
pub use history::*;
pub use pity::*;
pub use sampler::*;
