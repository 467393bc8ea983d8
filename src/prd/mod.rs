//! Pseudo-random distribution: C-value solving and streak-bounded triggers.

pub mod cvalue;
pub mod engine;

pub use cvalue::*;
pub use engine::*;
