use serde::{Deserialize, Serialize};

/// Reward rarity tier. The engine treats this as a closed set; adding a tier
/// means adding it here, to [`Rarity::all`], and (optionally) to the weight
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Rare = 1,
    Epic = 2,
    Legendary = 3,
}

impl Rarity {
    /// Returns the display name for this rarity tier.
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// All tiers, lowest to highest.
    pub fn all() -> [Rarity; 4] {
        [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary]
    }

    /// Whether this tier accumulates pity. Common is the baseline tier and
    /// never receives a pity bonus.
    pub fn is_pity_tracked(&self) -> bool {
        !matches!(self, Rarity::Common)
    }
}

/// A selectable reward/perk option as seen by the weighting engine.
///
/// Immutable from the engine's point of view; its weight is computed fresh
/// each round and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerkOption {
    pub id: String,
    pub rarity: Rarity,
    pub tags: Vec<String>,
}

impl PerkOption {
    pub fn new(id: &str, rarity: Rarity, tags: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            rarity,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}
