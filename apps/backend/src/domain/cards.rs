//! Card archetypes and card instances.

use serde::{Deserialize, Serialize};

/// What a card does when played.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EffectType {
    /// Actor gains the rolled value.
    Add,
    /// A random opponent loses the rolled value (floored at 0).
    Sub,
    /// Coin flip: exchange influence with a random opponent.
    Swap,
    /// A random player (actor included) drops to 0.
    Ban,
    /// Independent coin flips for actor and a random opponent: multiply or zero.
    Gamble,
}

/// Who a card is advertised to affect. Display-only: resolution picks
/// targets from the [`EffectType`] rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetRule {
    #[serde(rename = "SELF")]
    Actor,
    Enemy,
    All,
    Any,
}

/// Static archetype loaded once from the template source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub effect: EffectType,
    pub target: TargetRule,
    /// `[baseMin, baseMax]` fed to the skewed magnitude generator.
    #[serde(rename = "rangeBase")]
    pub base_range: (u64, u64),
}

/// A concrete card in a player's hand.
///
/// Invariant: `1 <= min <= max`. Cards are replaced, never mutated, once
/// played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub effect: EffectType,
    pub target: TargetRule,
    pub min: u64,
    pub max: u64,
}
