pub mod lobbies;
pub mod notifier;
