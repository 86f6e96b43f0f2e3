//! Card factory: templates in, playable cards out.

use uuid::Builder;

use crate::domain::cards::Card;
use crate::domain::catalog::CardCatalog;
use crate::domain::random::{skewed_magnitude, RandomSource, DEFAULT_SPREAD};
use crate::domain::rules::HAND_SIZE;

/// Build a fresh card from a uniformly chosen template.
///
/// Both ends of the template's base range are pushed through
/// [`skewed_magnitude`] independently, sorted, and floored at 1 so every
/// card has a strictly positive range with `min <= max`.
pub fn generate_card<R: RandomSource + ?Sized>(catalog: &CardCatalog, rng: &mut R) -> Card {
    let templates = catalog.templates();
    let template = &templates[rng.index(templates.len())];

    let (base_min, base_max) = template.base_range;
    let a = skewed_magnitude(base_min, DEFAULT_SPREAD, rng);
    let b = skewed_magnitude(base_max, DEFAULT_SPREAD, rng);

    Card {
        id: card_id(rng),
        name: template.name.clone(),
        effect: template.effect,
        target: template.target,
        min: a.min(b).max(1),
        max: a.max(b).max(1),
    }
}

/// A full starting hand.
pub fn deal_hand<R: RandomSource + ?Sized>(catalog: &CardCatalog, rng: &mut R) -> Vec<Card> {
    (0..HAND_SIZE).map(|_| generate_card(catalog, rng)).collect()
}

fn card_id<R: RandomSource + ?Sized>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.token_bytes())
        .into_uuid()
        .simple()
        .to_string()
}
