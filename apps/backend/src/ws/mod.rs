//! Websocket transport: wire messages, session actors and the registry
//! that routes lobby events to them.

pub mod hub;
pub mod protocol;
pub mod session;
