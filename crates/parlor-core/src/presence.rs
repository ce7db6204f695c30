//! Presence registry: which connection owns which display name.
//!
//! Both directions are kept so lookups stay O(1) either way. Join order
//! is preserved because roster broadcasts list users oldest first.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::JoinError;
use crate::events::ConnId;
use crate::message_log::SYSTEM_AUTHOR;

/// Bidirectional connection ↔ name table. Single source of truth for
/// who is in the chat; nothing else stores name ownership.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    names_by_conn: IndexMap<ConnId, String>,
    conns_by_name: HashMap<String, ConnId>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        PresenceRegistry::default()
    }

    /// Bind `name` to `conn`. Fails if the connection already joined or
    /// the name is held by a live connection. [`SYSTEM_AUTHOR`] is
    /// reserved so announcements can never be purged by a user leaving.
    pub fn claim(&mut self, conn: ConnId, name: String) -> Result<(), JoinError> {
        if self.names_by_conn.contains_key(&conn) {
            return Err(JoinError::AlreadyJoined);
        }
        if name == SYSTEM_AUTHOR || self.conns_by_name.contains_key(&name) {
            return Err(JoinError::NameTaken);
        }
        self.conns_by_name.insert(name.clone(), conn);
        self.names_by_conn.insert(conn, name);
        Ok(())
    }

    /// Drop whatever name `conn` holds, freeing it for future claims.
    /// Returns the released name, or `None` if the connection never joined.
    pub fn release(&mut self, conn: ConnId) -> Option<String> {
        let name = self.names_by_conn.shift_remove(&conn)?;
        self.conns_by_name.remove(&name);
        Some(name)
    }

    pub fn name_of(&self, conn: ConnId) -> Option<&str> {
        self.names_by_conn.get(&conn).map(String::as_str)
    }

    pub fn conn_of(&self, name: &str) -> Option<ConnId> {
        self.conns_by_name.get(name).copied()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.conns_by_name.contains_key(name)
    }

    /// All display names, in join order.
    pub fn roster(&self) -> Vec<String> {
        self.names_by_conn.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.names_by_conn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names_by_conn.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_binds_both_directions() {
        let mut reg = PresenceRegistry::new();
        reg.claim(ConnId(1), "alice".to_string()).unwrap();

        assert_eq!(reg.name_of(ConnId(1)), Some("alice"));
        assert_eq!(reg.conn_of("alice"), Some(ConnId(1)));
        assert!(reg.contains_name("alice"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut reg = PresenceRegistry::new();
        reg.claim(ConnId(1), "alice".to_string()).unwrap();

        let err = reg.claim(ConnId(2), "alice".to_string()).unwrap_err();
        assert_eq!(err, JoinError::NameTaken);
        // The loser keeps its unjoined state.
        assert_eq!(reg.name_of(ConnId(2)), None);
    }

    #[test]
    fn second_claim_from_same_connection_is_rejected() {
        let mut reg = PresenceRegistry::new();
        reg.claim(ConnId(1), "alice".to_string()).unwrap();

        let err = reg.claim(ConnId(1), "alice2".to_string()).unwrap_err();
        assert_eq!(err, JoinError::AlreadyJoined);
        assert_eq!(reg.name_of(ConnId(1)), Some("alice"));
        assert!(!reg.contains_name("alice2"));
    }

    #[test]
    fn system_author_is_reserved() {
        let mut reg = PresenceRegistry::new();
        let err = reg.claim(ConnId(1), SYSTEM_AUTHOR.to_string()).unwrap_err();
        assert_eq!(err, JoinError::NameTaken);
        assert!(reg.is_empty());
    }

    #[test]
    fn release_frees_the_name_for_reclaim() {
        let mut reg = PresenceRegistry::new();
        reg.claim(ConnId(1), "alice".to_string()).unwrap();

        assert_eq!(reg.release(ConnId(1)), Some("alice".to_string()));
        assert_eq!(reg.name_of(ConnId(1)), None);
        assert_eq!(reg.conn_of("alice"), None);

        reg.claim(ConnId(2), "alice".to_string()).unwrap();
        assert_eq!(reg.conn_of("alice"), Some(ConnId(2)));
    }

    #[test]
    fn release_of_unjoined_connection_is_none() {
        let mut reg = PresenceRegistry::new();
        assert_eq!(reg.release(ConnId(9)), None);
    }

    #[test]
    fn roster_lists_names_in_join_order() {
        let mut reg = PresenceRegistry::new();
        reg.claim(ConnId(3), "carol".to_string()).unwrap();
        reg.claim(ConnId(1), "alice".to_string()).unwrap();
        reg.claim(ConnId(2), "bob".to_string()).unwrap();

        assert_eq!(reg.roster(), vec!["carol", "alice", "bob"]);

        reg.release(ConnId(1));
        assert_eq!(reg.roster(), vec!["carol", "bob"]);
    }
}
