//! Lobby manager: owns every live lobby and serializes work on each one.
//!
//! Each lobby sits behind its own mutex together with its random generator,
//! so operations on one lobby never wait on another. Registry maps are only
//! read to clone a slot handle out; no map guard is held while a lobby lock
//! is being acquired. Notifications go out while the lobby lock is held, so
//! members see events in the order they were applied.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::catalog::CardCatalog;
use crate::domain::engine::{self, PlayOutcome};
use crate::domain::lobby::{ConnectionId, Lobby, LobbyCode, Player};
use crate::domain::random::GameRng;
use crate::domain::snapshot::{standings, LobbySnapshot, WaitingView};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::services::notifier::Notifier;
use crate::utils::join_code::generate_join_code;
use crate::ws::protocol::ServerMsg;

/// Redraws allowed when a fresh join code is already taken.
pub const MAX_JOIN_CODE_ATTEMPTS: usize = 64;

struct LobbySlot {
    lobby: Lobby,
    rng: GameRng,
    /// Set by teardown; a closed slot accepts nothing.
    closed: bool,
}

type SharedSlot = Arc<Mutex<LobbySlot>>;

pub struct LobbyService {
    lobbies: DashMap<LobbyCode, SharedSlot>,
    /// A connection belongs to at most one lobby.
    memberships: DashMap<ConnectionId, LobbyCode>,
    catalog: Arc<CardCatalog>,
    /// Draws join codes and per-lobby seeds.
    seeds: Mutex<GameRng>,
    notifier: Arc<dyn Notifier>,
}

impl LobbyService {
    pub fn new(catalog: Arc<CardCatalog>, notifier: Arc<dyn Notifier>, seeds: GameRng) -> Self {
        Self {
            lobbies: DashMap::new(),
            memberships: DashMap::new(),
            catalog,
            seeds: Mutex::new(seeds),
            notifier,
        }
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn lobby_count(&self) -> usize {
        self.lobbies.len()
    }

    pub fn lobby_of(&self, conn: &str) -> Option<LobbyCode> {
        self.memberships.get(conn).map(|code| code.value().clone())
    }

    /// Current snapshot of a lobby, if it is still live.
    pub fn snapshot(&self, code: &str) -> Option<LobbySnapshot> {
        let slot = self.lobbies.get(code).map(|s| s.value().clone())?;
        let guard = slot.lock();
        (!guard.closed).then(|| LobbySnapshot::of(&guard.lobby))
    }

    /// Open a lobby with `conn` as host and sole player.
    ///
    /// Sends `lobby-created` to the creator only.
    pub fn create_lobby(&self, conn: &str, display_name: &str) -> Result<LobbyCode, DomainError> {
        self.ensure_unseated(conn)?;

        let (code, seed) = {
            let mut seeds = self.seeds.lock();
            let mut found = None;
            for _ in 0..MAX_JOIN_CODE_ATTEMPTS {
                let candidate = generate_join_code(&mut *seeds);
                if !self.lobbies.contains_key(&candidate) {
                    found = Some(candidate);
                    break;
                }
            }
            let code = found.ok_or_else(|| {
                DomainError::conflict(
                    ConflictKind::JoinCodeExhausted,
                    format!("no free join code after {MAX_JOIN_CODE_ATTEMPTS} attempts"),
                )
            })?;
            (code, seeds.next_seed())
        };

        let host = Player::new(conn, display_name);
        let host_name = host.name.clone();
        let slot: SharedSlot = Arc::new(Mutex::new(LobbySlot {
            lobby: Lobby::new(code.clone(), host),
            rng: GameRng::seeded(seed),
            closed: false,
        }));
        let guard = slot.lock();

        // Another creator may have claimed the code since the draw.
        match self.lobbies.entry(code.clone()) {
            Entry::Occupied(_) => {
                return Err(DomainError::conflict(
                    ConflictKind::JoinCodeExhausted,
                    format!("join code {code} was claimed concurrently"),
                ));
            }
            Entry::Vacant(vacant) => {
                vacant.insert(slot.clone());
            }
        }
        self.memberships.insert(conn.to_string(), code.clone());

        info!(lobby_id = %code, conn_id = %conn, host = %host_name, "Lobby created");
        self.notifier.notify(
            conn,
            ServerMsg::LobbyCreated {
                lobby_id: code.clone(),
            },
        );
        drop(guard);
        Ok(code)
    }

    /// Seat `conn` in a waiting lobby and broadcast the new occupancy.
    ///
    /// Returns the player count after joining.
    pub fn join_lobby(
        &self,
        conn: &str,
        code: &str,
        display_name: &str,
    ) -> Result<usize, DomainError> {
        self.ensure_unseated(conn)?;
        let slot = self.slot(code)?;
        let mut guard = slot.lock();
        if guard.closed {
            return Err(lobby_gone(code));
        }

        let count = guard.lobby.add_player(Player::new(conn, display_name))?;
        self.memberships.insert(conn.to_string(), code.to_string());

        info!(lobby_id = %code, conn_id = %conn, count, "Player joined lobby");
        let members = guard.lobby.member_ids();
        self.notifier.notify_all(
            &members,
            &ServerMsg::UpdateWaiting(WaitingView::of(&guard.lobby)),
        );
        Ok(count)
    }

    /// Host-only: deal influence and hands, then broadcast `game-start`.
    pub fn start_game(&self, conn: &str) -> Result<(), DomainError> {
        let (code, slot) = self.membership(conn)?;
        let mut guard = slot.lock();
        if guard.closed {
            return Err(lobby_gone(&code));
        }

        let LobbySlot { lobby, rng, .. } = &mut *guard;
        engine::start_game(lobby, conn, &self.catalog, rng)?;

        info!(
            lobby_id = %code,
            players = lobby.player_count(),
            active_idx = lobby.active_idx,
            "Game started"
        );
        self.notifier.notify_all(
            &lobby.member_ids(),
            &ServerMsg::GameStart {
                lobby: LobbySnapshot::of(lobby),
            },
        );
        Ok(())
    }

    /// Play a card for the active player and broadcast the result.
    ///
    /// Members receive `update-game`, or `game-over` with final standings
    /// when the play ends the last round.
    pub fn play_card(&self, conn: &str, card_id: &str) -> Result<PlayOutcome, DomainError> {
        let (code, slot) = self.membership(conn)?;
        let mut guard = slot.lock();
        if guard.closed {
            return Err(lobby_gone(&code));
        }

        let LobbySlot { lobby, rng, .. } = &mut *guard;
        let outcome = engine::play_card(lobby, conn, card_id, &self.catalog, rng)?;

        debug!(
            lobby_id = %code,
            conn_id = %conn,
            card_id = %card_id,
            effect = ?outcome.played.effect,
            value = outcome.value,
            turn = lobby.turn,
            active_idx = lobby.active_idx,
            "Card played"
        );

        let msg = if outcome.finished {
            info!(lobby_id = %code, "Game over");
            ServerMsg::GameOver {
                players: standings(lobby),
            }
        } else {
            ServerMsg::UpdateGame {
                lobby: LobbySnapshot::of(lobby),
            }
        };
        self.notifier.notify_all(&lobby.member_ids(), &msg);
        Ok(outcome)
    }

    /// Leave the current lobby without closing the connection.
    ///
    /// The lobby is torn down exactly as on disconnect.
    pub fn leave_lobby(&self, conn: &str) -> Result<LobbyCode, DomainError> {
        self.teardown(conn).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Membership,
                format!("{conn} is not in a lobby"),
            )
        })
    }

    /// Connection went away. Idempotent.
    ///
    /// Returns the lobby that was torn down, if any.
    pub fn disconnect(&self, conn: &str) -> Option<LobbyCode> {
        self.teardown(conn)
    }

    fn teardown(&self, conn: &str) -> Option<LobbyCode> {
        let code = self.lobby_of(conn)?;
        let Some(slot) = self.lobbies.get(&code).map(|s| s.value().clone()) else {
            self.memberships.remove_if(conn, |_, c| *c == code);
            return None;
        };

        let mut guard = slot.lock();
        if guard.closed {
            self.memberships.remove_if(conn, |_, c| *c == code);
            return None;
        }
        guard.closed = true;

        let members = guard.lobby.member_ids();
        for member in &members {
            self.memberships.remove_if(member, |_, c| *c == code);
        }
        let others: Vec<ConnectionId> = members.into_iter().filter(|m| m != conn).collect();
        self.notifier
            .notify_all(&others, &ServerMsg::OpponentDisconnected);
        self.lobbies.remove_if(&code, |_, s| Arc::ptr_eq(s, &slot));

        info!(
            lobby_id = %code,
            conn_id = %conn,
            notified = others.len(),
            phase = ?guard.lobby.phase,
            "Lobby torn down"
        );
        Some(code)
    }

    fn ensure_unseated(&self, conn: &str) -> Result<(), DomainError> {
        match self.lobby_of(conn) {
            Some(code) => Err(DomainError::conflict(
                ConflictKind::AlreadyInLobby,
                format!("{conn} is already in lobby {code}"),
            )),
            None => Ok(()),
        }
    }

    fn slot(&self, code: &str) -> Result<SharedSlot, DomainError> {
        self.lobbies
            .get(code)
            .map(|s| s.value().clone())
            .ok_or_else(|| lobby_gone(code))
    }

    fn membership(&self, conn: &str) -> Result<(LobbyCode, SharedSlot), DomainError> {
        let code = self.lobby_of(conn).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Membership,
                format!("{conn} is not in a lobby"),
            )
        })?;
        let slot = self.slot(&code)?;
        Ok((code, slot))
    }
}

fn lobby_gone(code: &str) -> DomainError {
    DomainError::not_found(NotFoundKind::Lobby, format!("lobby {code} does not exist"))
}
