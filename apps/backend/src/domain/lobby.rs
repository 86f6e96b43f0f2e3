//! Player and lobby entities.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::domain::cards::Card;
use crate::domain::rules::{DEFAULT_PLAYER_NAME, MAX_NAME_CHARS, MAX_PLAYERS};
use crate::errors::domain::{ConflictKind, DomainError};

/// Live connection identity; doubles as the player id.
pub type ConnectionId = String;

/// Four-digit join code.
pub type LobbyCode = String;

/// Lobby lifecycle. `Waiting -> InProgress -> Finished`, never backwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Accepting joins; nobody holds cards yet.
    Waiting,
    /// Accepting plays from the active player only.
    InProgress,
    /// Final standings sent; the lobby idles until a member leaves.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: ConnectionId,
    pub name: String,
    /// Never negative; effects clamp or saturate.
    pub influence: u64,
    /// Empty before the game starts, exactly `HAND_SIZE` cards after.
    pub hand: Vec<Card>,
}

impl Player {
    pub fn new(id: impl Into<ConnectionId>, display_name: &str) -> Self {
        Self {
            id: id.into(),
            name: normalize_display_name(display_name),
            influence: 0,
            hand: Vec::new(),
        }
    }
}

/// Trim, NFKC-normalize, drop control characters and cap the length.
/// Blank names become [`DEFAULT_PLAYER_NAME`].
pub fn normalize_display_name(raw: &str) -> String {
    let normalized: String = raw
        .trim()
        .nfkc()
        .filter(|c| !c.is_control())
        .take(MAX_NAME_CHARS)
        .collect();
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Lobby {
    pub id: LobbyCode,
    /// Join order; capacity [`MAX_PLAYERS`].
    pub players: Vec<Player>,
    /// Creator's connection. Never transfers.
    pub host_id: ConnectionId,
    pub phase: Phase,
    /// 1-based round counter.
    pub turn: u8,
    /// Whose turn it is; always a valid index into `players`.
    pub active_idx: usize,
    /// Seat that opened the game; returning to it completes a round.
    pub start_idx: usize,
    /// Narration of the most recent event. Display only.
    pub last_action: String,
}

impl Lobby {
    pub fn new(id: impl Into<LobbyCode>, host: Player) -> Self {
        Self {
            id: id.into(),
            host_id: host.id.clone(),
            players: vec![host],
            phase: Phase::Waiting,
            turn: 1,
            active_idx: 0,
            start_idx: 0,
            last_action: "Waiting for players...".to_string(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.phase != Phase::Waiting
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn seat_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    /// Seat a new player at the end of the join order.
    ///
    /// Returns the new occupancy.
    pub fn add_player(&mut self, player: Player) -> Result<usize, DomainError> {
        if self.is_started() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyStarted,
                format!("lobby {} already started", self.id),
            ));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(DomainError::conflict(
                ConflictKind::LobbyFull,
                format!("lobby {} has {MAX_PLAYERS} players", self.id),
            ));
        }
        if self.seat_of(&player.id).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyInLobby,
                format!("{} is already seated in lobby {}", player.id, self.id),
            ));
        }
        self.players.push(player);
        Ok(self.players.len())
    }
}
