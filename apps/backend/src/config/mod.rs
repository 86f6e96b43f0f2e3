pub mod cards;
pub mod server;

pub use cards::load_card_catalog;
pub use server::ServerConfig;
