//! Domain-level error type used across the turn engine and lobby service.
//!
//! This error type is transport-agnostic. Every lobby operation returns
//! `Result<_, DomainError>`; an `Err` means the request was rejected and no
//! state was mutated or broadcast. The websocket layer logs and drops these.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Business-rule violations on an otherwise well-formed request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    NotHost,
    NotEnoughPlayers,
    OutOfTurn,
    PhaseMismatch,
    CardNotInHand,
    EmptyCatalog,
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Lobby,
    Membership,
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    LobbyFull,
    AlreadyStarted,
    AlreadyInLobby,
    JoinCodeExhausted,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// Short machine-readable reason, used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::NotHost => "not_host",
                ValidationKind::NotEnoughPlayers => "not_enough_players",
                ValidationKind::OutOfTurn => "out_of_turn",
                ValidationKind::PhaseMismatch => "phase_mismatch",
                ValidationKind::CardNotInHand => "card_not_in_hand",
                ValidationKind::EmptyCatalog => "empty_catalog",
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::LobbyFull => "lobby_full",
                ConflictKind::AlreadyStarted => "already_started",
                ConflictKind::AlreadyInLobby => "already_in_lobby",
                ConflictKind::JoinCodeExhausted => "join_code_exhausted",
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Lobby => "lobby_not_found",
                NotFoundKind::Membership => "not_in_lobby",
            },
        }
    }
}
