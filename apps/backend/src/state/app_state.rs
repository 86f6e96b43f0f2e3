use std::sync::Arc;

use crate::services::lobbies::LobbyService;
use crate::ws::hub::ConnectionRegistry;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// Lobby manager; every lobby lives here.
    pub lobbies: Arc<LobbyService>,
    /// Live websocket sessions, also the lobby service's notifier.
    pub connections: Arc<ConnectionRegistry>,
}

impl AppState {
    pub fn new(lobbies: Arc<LobbyService>, connections: Arc<ConnectionRegistry>) -> Self {
        Self {
            lobbies,
            connections,
        }
    }

    pub fn lobby_count(&self) -> usize {
        self.lobbies.lobby_count()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.active_connections_count()
    }
}
