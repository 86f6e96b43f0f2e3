//! Error handling for the game server.

pub mod domain;

pub use domain::DomainError;
