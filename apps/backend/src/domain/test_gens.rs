// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::cards::{CardTemplate, EffectType, TargetRule};
use crate::domain::catalog::CardCatalog;
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS_TO_START};

pub fn effect_type() -> impl Strategy<Value = EffectType> {
    prop_oneof![
        Just(EffectType::Add),
        Just(EffectType::Sub),
        Just(EffectType::Swap),
        Just(EffectType::Ban),
        Just(EffectType::Gamble),
    ]
}

pub fn target_rule() -> impl Strategy<Value = TargetRule> {
    prop_oneof![
        Just(TargetRule::Actor),
        Just(TargetRule::Enemy),
        Just(TargetRule::All),
        Just(TargetRule::Any),
    ]
}

/// Template with a base range small enough that GAMBLE chains stay readable.
pub fn card_template() -> impl Strategy<Value = CardTemplate> {
    (effect_type(), target_rule(), 0u64..=50, 0u64..=50).prop_map(|(effect, target, a, b)| {
        CardTemplate {
            name: format!("{effect:?} card"),
            effect,
            target,
            base_range: (a.min(b), a.max(b)),
        }
    })
}

/// Template with any base range, including reversed and extreme endpoints.
pub fn card_template_any_range() -> impl Strategy<Value = CardTemplate> {
    let endpoint = prop_oneof![
        Just(0u64),
        Just(1u64),
        any::<u64>(),
        (u64::MAX - 1024)..=u64::MAX,
    ];
    (effect_type(), target_rule(), endpoint.clone(), endpoint).prop_map(
        |(effect, target, a, b)| CardTemplate {
            name: format!("{effect:?} card"),
            effect,
            target,
            base_range: (a, b),
        },
    )
}

pub fn catalog() -> impl Strategy<Value = CardCatalog> {
    prop::collection::vec(card_template(), 1..6)
        .prop_map(|templates| CardCatalog::new(templates).expect("generated catalogs are non-empty"))
}

/// Table sizes a game can be played with.
pub fn player_count() -> impl Strategy<Value = usize> {
    MIN_PLAYERS_TO_START..=MAX_PLAYERS
}
