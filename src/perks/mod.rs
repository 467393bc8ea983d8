//! Perk option domain types.

pub mod types;

pub use types::*;
