use std::sync::Arc;

use tracing::info;

use crate::domain::catalog::CardCatalog;
use crate::domain::random::GameRng;
use crate::services::lobbies::LobbyService;
use crate::services::notifier::Notifier;
use crate::state::app_state::AppState;
use crate::ws::hub::ConnectionRegistry;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    catalog: Option<CardCatalog>,
    seed: Option<u64>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            seed: None,
        }
    }

    pub fn with_catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Derive every join code and lobby generator from `seed`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> AppState {
        let catalog = Arc::new(self.catalog.unwrap_or_else(CardCatalog::placeholder));
        let seeds = match self.seed {
            Some(seed) => {
                info!(seed, "Deterministic game randomness enabled");
                GameRng::seeded(seed)
            }
            None => GameRng::from_entropy(),
        };

        let connections = Arc::new(ConnectionRegistry::new());
        let notifier: Arc<dyn Notifier> = connections.clone();
        let lobbies = Arc::new(LobbyService::new(catalog, notifier, seeds));
        AppState::new(lobbies, connections)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
