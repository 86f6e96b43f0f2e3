//! Domain layer: pure game logic types and helpers.

pub mod card_factory;
pub mod cards;
pub mod catalog;
pub mod effects;
pub mod engine;
pub mod lobby;
pub mod random;
pub mod rules;
pub mod snapshot;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_engine;
#[cfg(test)]
mod tests_props_engine;

// Re-exports for ergonomics
pub use cards::{Card, CardTemplate, EffectType, TargetRule};
pub use catalog::CardCatalog;
pub use engine::PlayOutcome;
pub use lobby::{ConnectionId, Lobby, LobbyCode, Phase, Player};
pub use random::{GameRng, RandomSource};
pub use snapshot::{standings, LobbySnapshot, PlayerView, WaitingView};
