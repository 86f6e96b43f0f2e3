//! Outbound seam between lobby state changes and the transport.

use crate::domain::lobby::ConnectionId;
use crate::ws::protocol::ServerMsg;

/// Delivers server events to connections.
///
/// Delivery is fire-and-forget: an unknown or closed connection drops the
/// message. Implementations must not call back into `LobbyService`, since
/// the service notifies while holding a lobby lock.
pub trait Notifier: Send + Sync {
    fn notify(&self, to: &str, msg: ServerMsg);

    fn notify_all(&self, to: &[ConnectionId], msg: &ServerMsg) {
        for conn in to {
            self.notify(conn, msg.clone());
        }
    }
}
