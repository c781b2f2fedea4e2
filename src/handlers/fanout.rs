//! Broadcaster.
//!
//! Delivers one line to every registered client except the origin. Delivery
//! works on a registry snapshot and never blocks: each peer has a bounded
//! outbound queue, and a full or closed queue costs that peer the line, not
//! its registration. Removing clients is the session teardown's job.

use crate::state::{ConnectionId, ConnectionRegistry};
use chatrelay_proto::response;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Who a broadcast line comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A client; it does not receive its own line.
    Peer(ConnectionId),
    /// The server itself; every registered client receives the line.
    System,
}

/// Per-broadcast delivery counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub dropped: usize,
}

/// Queue `text` for every registered client other than `origin`.
pub fn broadcast(registry: &ConnectionRegistry, origin: Origin, text: &str) -> Delivery {
    let line: Arc<str> = Arc::from(text);
    let mut delivery = Delivery::default();

    for peer in registry.snapshot() {
        if origin == Origin::Peer(peer.id) {
            continue;
        }

        match peer.outbound.try_send(Arc::clone(&line)) {
            Ok(()) => delivery.delivered += 1,
            Err(TrySendError::Full(_)) => {
                warn!(conn_id = %peer.id, name = %peer.name, "Outbound queue full, dropping line");
                delivery.dropped += 1;
            }
            Err(TrySendError::Closed(_)) => {
                // Peer is mid-teardown and about to leave the registry.
                debug!(conn_id = %peer.id, "Outbound queue closed, dropping line");
                delivery.dropped += 1;
            }
        }
    }

    delivery
}

/// Relay a chat line from `sender`, stamped with its current name and the
/// local time.
pub fn relay_chat(registry: &ConnectionRegistry, sender: ConnectionId, text: &str) -> Delivery {
    let Some(name) = registry.name_of(sender) else {
        warn!(conn_id = %sender, "Chat from unregistered connection");
        return Delivery::default();
    };

    let line = response::chat(&name, &chrono::Local::now(), text);
    let delivery = broadcast(registry, Origin::Peer(sender), &line);
    debug!(
        conn_id = %sender,
        delivered = delivery.delivered,
        dropped = delivery.dropped,
        "Relayed chat"
    );
    delivery
}

/// Broadcast a server notice to every registered client.
pub fn announce(registry: &ConnectionRegistry, text: &str) -> Delivery {
    broadcast(registry, Origin::System, text)
}
