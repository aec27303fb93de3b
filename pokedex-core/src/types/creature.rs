//! Creature stats and per-creature progress.

use serde::{Deserialize, Serialize};

/// Detailed stats for a creature, fetched lazily on first `catch` or `inspect`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureStats {
    /// Experience granted on defeat; higher values are harder to catch
    pub base_experience: u32,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
    /// Elemental types, in slot order
    pub types: Vec<String>,
}

impl CreatureStats {
    /// Returns the battle stats as `(label, value)` pairs in display order.
    pub fn stat_lines(&self) -> [(&'static str, u32); 6] {
        [
            ("hp", self.hp),
            ("attack", self.attack),
            ("defense", self.defense),
            ("special-attack", self.special_attack),
            ("special-defense", self.special_defense),
            ("speed", self.speed),
        ]
    }
}

/// Discovery and capture progress for one creature.
///
/// Presence in the cache means the creature has been discovered.
/// `captured` only ever moves from false to true.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureState {
    /// Creature name (key)
    pub name: String,
    /// Whether the creature has been caught
    pub captured: bool,
    /// Stats, once looked up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<CreatureStats>,
}

impl CreatureState {
    /// Creates a freshly discovered, uncaught creature.
    pub fn discovered(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            captured: false,
            stats: None,
        }
    }
}
