use actix::prelude::*;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::lobby::ConnectionId;
use crate::services::notifier::Notifier;
use crate::ws::protocol::ServerMsg;

/// Server event addressed to one session actor.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

/// Live websocket sessions keyed by connection id.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, Recipient<Outbound>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, conn_id: ConnectionId, recipient: Recipient<Outbound>) {
        self.connections.insert(conn_id, recipient);
    }

    pub fn unregister(&self, conn_id: &str) {
        self.connections.remove(conn_id);
    }

    pub fn is_connected(&self, conn_id: &str) -> bool {
        self.connections.contains_key(conn_id)
    }

    pub fn active_connections_count(&self) -> usize {
        self.connections.len()
    }
}

impl Notifier for ConnectionRegistry {
    fn notify(&self, to: &str, msg: ServerMsg) {
        match self.connections.get(to) {
            Some(recipient) => recipient.value().do_send(Outbound(msg)),
            None => debug!(conn_id = %to, event = msg.event_name(), "Dropping event for closed connection"),
        }
    }
}
