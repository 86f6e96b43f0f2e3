//! Public snapshot API: what clients see of a lobby.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, EffectType, TargetRule};
use crate::domain::lobby::{Lobby, Phase, Player};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub effect: EffectType,
    pub target: TargetRule,
    pub min: u64,
    pub max: u64,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            effect: card.effect,
            target: card.target,
            min: card.min,
            max: card.max,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub influence: u64,
    pub hand: Vec<CardView>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            influence: player.influence,
            hand: player.hand.iter().map(CardView::from).collect(),
        }
    }
}

/// Occupancy broadcast while a lobby is waiting for players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingView {
    pub count: usize,
    pub host_id: String,
}

/// Full lobby state sent on game start and after every play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbySnapshot {
    pub lobby_id: String,
    pub host_id: String,
    pub phase: Phase,
    pub is_started: bool,
    pub players: Vec<PlayerView>,
    pub active_player_idx: usize,
    pub start_player_idx: usize,
    pub turn: u8,
    pub last_action: String,
}

impl LobbySnapshot {
    pub fn of(lobby: &Lobby) -> Self {
        Self {
            lobby_id: lobby.id.clone(),
            host_id: lobby.host_id.clone(),
            phase: lobby.phase,
            is_started: lobby.is_started(),
            players: lobby.players.iter().map(PlayerView::from).collect(),
            active_player_idx: lobby.active_idx,
            start_player_idx: lobby.start_idx,
            turn: lobby.turn,
            last_action: lobby.last_action.clone(),
        }
    }
}

impl WaitingView {
    pub fn of(lobby: &Lobby) -> Self {
        Self {
            count: lobby.player_count(),
            host_id: lobby.host_id.clone(),
        }
    }
}

/// Players ranked by influence, highest first.
///
/// The sort is stable, so tied players keep their join order.
pub fn standings(lobby: &Lobby) -> Vec<PlayerView> {
    let mut ranked: Vec<PlayerView> = lobby.players.iter().map(PlayerView::from).collect();
    ranked.sort_by(|a, b| b.influence.cmp(&a.influence));
    ranked
}
