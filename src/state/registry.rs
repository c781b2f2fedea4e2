//! Connection registry.
//!
//! The single source of truth for who is online. Every operation takes one
//! coarse lock for in-memory work only: callers that need to reach peers take
//! a [`snapshot`](ConnectionRegistry::snapshot), drop the lock, and deliver
//! through each peer's outbound queue.

use crate::state::ConnectionId;
use chatrelay_proto::{anonymous_name, sanitize_name};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Handle used to queue lines for delivery to a connection.
pub type Outbound = mpsc::Sender<Arc<str>>;

/// Why a rename was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("new name is empty")]
    Empty,
    #[error("connection {0} is not registered")]
    NotRegistered(ConnectionId),
}

/// Point-in-time copy of one registered connection.
#[derive(Debug, Clone)]
pub struct Peer {
    pub id: ConnectionId,
    pub name: String,
    pub outbound: Outbound,
}

struct Entry {
    name: String,
    outbound: Outbound,
}

/// Shared table of registered connections, keyed (and ordered) by id.
pub struct ConnectionRegistry {
    entries: Mutex<BTreeMap<ConnectionId, Entry>>,
    anonymous_name: String,
    max_name_length: usize,
}

impl ConnectionRegistry {
    pub fn new(anonymous_name: impl Into<String>, max_name_length: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            anonymous_name: anonymous_name.into(),
            max_name_length,
        }
    }

    /// Insert a connection under a sanitized version of `proposed`.
    ///
    /// Never rejects: an empty or unusable name becomes a generated anonymous
    /// one. Returns the name actually stored.
    pub fn register(&self, id: ConnectionId, proposed: &str, outbound: Outbound) -> String {
        let name = sanitize_name(proposed, self.max_name_length)
            .unwrap_or_else(|| anonymous_name(&self.anonymous_name, id.get()));

        let previous = self.entries.lock().insert(
            id,
            Entry {
                name: name.clone(),
                outbound,
            },
        );
        debug_assert!(previous.is_none(), "connection {id} registered twice");

        name
    }

    /// Replace a connection's name, returning the stored (sanitized) name.
    pub fn rename(&self, id: ConnectionId, new_name: &str) -> Result<String, RenameError> {
        let name = sanitize_name(new_name, self.max_name_length).ok_or(RenameError::Empty)?;

        let mut entries = self.entries.lock();
        let entry = entries.get_mut(&id).ok_or(RenameError::NotRegistered(id))?;
        entry.name.clone_from(&name);
        Ok(name)
    }

    /// Remove a connection. Idempotent: only the first call returns the name.
    pub fn remove(&self, id: ConnectionId) -> Option<String> {
        self.entries.lock().remove(&id).map(|entry| entry.name)
    }

    /// Consistent copy of every entry in join order.
    pub fn snapshot(&self) -> Vec<Peer> {
        self.entries
            .lock()
            .iter()
            .map(|(id, entry)| Peer {
                id: *id,
                name: entry.name.clone(),
                outbound: entry.outbound.clone(),
            })
            .collect()
    }

    pub fn name_of(&self, id: ConnectionId) -> Option<String> {
        self.entries.lock().get(&id).map(|entry| entry.name.clone())
    }

    #[cfg(test)]
    pub fn contains(&self, id: ConnectionId) -> bool {
        self.entries.lock().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
