//! Live connection registry.

use std::{collections::BTreeMap, sync::Arc};

use super::{Connection, Identity};

/// Maps live connections to their identities.
///
/// The registry itself is not synchronized; `BroadcastHub` keeps it behind the
/// same lock as the history so every mutation is serialized.
pub struct ConnectionRegistry {
    connections: BTreeMap<Identity, Arc<dyn Connection>>,
    next_id: Identity,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: BTreeMap::new(),
            next_id: Identity::FIRST,
        }
    }

    /// Record a connection under the next identity.
    pub fn register(&mut self, connection: Arc<dyn Connection>) -> Identity {
        let identity = self.next_id;
        self.next_id = identity.next();
        self.connections.insert(identity, connection);
        identity
    }

    /// Remove a connection.
    ///
    /// Returns `None` if it was already removed, so disconnect handling and
    /// failed-send pruning can both call this safely.
    pub fn unregister(&mut self, identity: &Identity) -> Option<Identity> {
        self.connections.remove(identity).map(|_| *identity)
    }

    /// Point-in-time copy of the live connections, ordered by identity.
    pub fn snapshot(&self) -> Vec<(Identity, Arc<dyn Connection>)> {
        self.connections
            .iter()
            .map(|(identity, connection)| (*identity, Arc::clone(connection)))
            .collect()
    }

    pub fn get(&self, identity: &Identity) -> Option<Arc<dyn Connection>> {
        self.connections.get(identity).cloned()
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.connections.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// The identity the next `register` call will assign.
    pub fn next_identity(&self) -> Identity {
        self.next_id
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
