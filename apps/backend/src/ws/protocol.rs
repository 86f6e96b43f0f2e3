use serde::{Deserialize, Serialize};

use crate::domain::lobby::{ConnectionId, LobbyCode};
use crate::domain::snapshot::{LobbySnapshot, PlayerView, WaitingView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMsg {
    #[serde(rename_all = "camelCase")]
    CreateLobby {
        #[serde(default)]
        display_name: String,
    },
    #[serde(rename_all = "camelCase")]
    JoinLobby {
        lobby_id: LobbyCode,
        #[serde(default)]
        username: String,
    },
    StartGame,
    #[serde(rename_all = "camelCase")]
    PlayCard { card_id: String },
    LeaveLobby,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMsg {
    #[serde(rename_all = "camelCase")]
    Connected { connection_id: ConnectionId },

    #[serde(rename_all = "camelCase")]
    LobbyCreated { lobby_id: LobbyCode },

    UpdateWaiting(WaitingView),

    GameStart { lobby: LobbySnapshot },

    UpdateGame { lobby: LobbySnapshot },

    /// Final standings, highest influence first.
    GameOver { players: Vec<PlayerView> },

    OpponentDisconnected,

    Error { code: ErrorCode, message: String },
}

impl ServerMsg {
    pub fn event_name(&self) -> &'static str {
        match self {
            ServerMsg::Connected { .. } => "connected",
            ServerMsg::LobbyCreated { .. } => "lobby-created",
            ServerMsg::UpdateWaiting(_) => "update-waiting",
            ServerMsg::GameStart { .. } => "game-start",
            ServerMsg::UpdateGame { .. } => "update-game",
            ServerMsg::GameOver { .. } => "game-over",
            ServerMsg::OpponentDisconnected => "opponent-disconnected",
            ServerMsg::Error { .. } => "error",
        }
    }
}

/// Frame-level failures. Rejected game actions are never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    UnsupportedFrame,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::UnsupportedFrame => "unsupported_frame",
        }
    }
}
