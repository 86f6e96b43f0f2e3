//! Turn engine: start a lobby's game and apply plays.
//!
//! Both entry points either mutate the lobby and return `Ok`, or leave it
//! untouched and return the reason as a `DomainError`. Broadcasting is the
//! caller's job.

use crate::domain::card_factory::{deal_hand, generate_card};
use crate::domain::cards::Card;
use crate::domain::catalog::CardCatalog;
use crate::domain::effects::{self, Resolution};
use crate::domain::lobby::{Lobby, Phase};
use crate::domain::random::RandomSource;
use crate::domain::rules::{is_game_over, next_seat, MIN_PLAYERS_TO_START, STARTING_INFLUENCE};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Everything a successful play changed, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Seat that played.
    pub seat: usize,
    /// The card that left the hand.
    pub played: Card,
    /// Value rolled from `[played.min, played.max]`.
    pub value: u64,
    pub resolution: Resolution,
    /// Turn passed back to the starting seat.
    pub round_completed: bool,
    /// This play ended the game.
    pub finished: bool,
}

/// Deal influence and hands, pick a random first player and open play.
pub fn start_game<R: RandomSource + ?Sized>(
    lobby: &mut Lobby,
    requester: &str,
    catalog: &CardCatalog,
    rng: &mut R,
) -> Result<(), DomainError> {
    if lobby.host_id != requester {
        return Err(DomainError::validation(
            ValidationKind::NotHost,
            format!("{requester} is not the host of lobby {}", lobby.id),
        ));
    }
    if lobby.is_started() {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyStarted,
            format!("lobby {} already started", lobby.id),
        ));
    }
    let count = lobby.player_count();
    if count < MIN_PLAYERS_TO_START {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("lobby {} has {count} player(s), needs {MIN_PLAYERS_TO_START}", lobby.id),
        ));
    }

    for player in lobby.players.iter_mut() {
        player.influence = rng.between(*STARTING_INFLUENCE.start(), *STARTING_INFLUENCE.end());
        player.hand = deal_hand(catalog, rng);
    }

    let first = rng.index(count);
    lobby.active_idx = first;
    lobby.start_idx = first;
    lobby.turn = 1;
    lobby.phase = Phase::InProgress;
    lobby.last_action = format!("BATTLE START! {} goes first!", lobby.players[first].name);
    Ok(())
}

/// Play `card_id` from the requester's hand.
pub fn play_card<R: RandomSource + ?Sized>(
    lobby: &mut Lobby,
    requester: &str,
    card_id: &str,
    catalog: &CardCatalog,
    rng: &mut R,
) -> Result<PlayOutcome, DomainError> {
    if lobby.phase != Phase::InProgress {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("lobby {} is {:?}, not in progress", lobby.id, lobby.phase),
        ));
    }
    let count = lobby.player_count();
    if count < MIN_PLAYERS_TO_START {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("lobby {} has {count} player(s)", lobby.id),
        ));
    }

    let seat = lobby.active_idx;
    let active = &lobby.players[seat];
    if active.id != requester {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("{requester} played while it is {}'s turn", active.id),
        ));
    }
    let Some(slot) = active.hand.iter().position(|c| c.id == card_id) else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card_id} is not in {requester}'s hand"),
        ));
    };

    let card = active.hand[slot].clone();
    let value = rng.between(card.min, card.max);
    let resolution = effects::resolve(&mut lobby.players, seat, card.effect, value, rng);
    lobby.last_action = effects::narrate(&lobby.players, seat, &card.name, &resolution);

    let replacement = generate_card(catalog, rng);
    let played = std::mem::replace(&mut lobby.players[seat].hand[slot], replacement);

    lobby.active_idx = next_seat(seat, count);
    let round_completed = lobby.active_idx == lobby.start_idx;
    if round_completed {
        lobby.turn = lobby.turn.saturating_add(1);
    }
    let finished = is_game_over(lobby.turn);
    if finished {
        lobby.phase = Phase::Finished;
    }

    Ok(PlayOutcome {
        seat,
        played,
        value,
        resolution,
        round_completed,
        finished,
    })
}
