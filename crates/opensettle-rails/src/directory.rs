//! Preference directory seam.
//!
//! The real directory is an external identity system; the engine consumes
//! it as a read-only lookup, resolved once per settlement attempt at
//! routing time. Entries may be stale; the engine takes whatever the
//! directory says *now* and never writes back.

use opensettle_types::{RecipientId, RecipientPreference};
use std::collections::HashMap;

/// Read-only recipient preference lookup.
pub trait PreferenceDirectory {
    /// Resolve a recipient to its delivery preference, or `None` if the
    /// directory has no entry for it.
    fn resolve(&self, recipient: &RecipientId) -> Option<RecipientPreference>;
}

/// In-memory directory stand-in for the external identity system.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    entries: HashMap<RecipientId, RecipientPreference>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a recipient's preference.
    pub fn insert(&mut self, recipient: RecipientId, preference: RecipientPreference) {
        self.entries.insert(recipient, preference);
    }

    /// Remove a recipient's entry.
    pub fn remove(&mut self, recipient: &RecipientId) {
        self.entries.remove(recipient);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceDirectory for InMemoryDirectory {
    fn resolve(&self, recipient: &RecipientId) -> Option<RecipientPreference> {
        self.entries.get(recipient).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opensettle_types::{AccountId, RouteKind};

    #[test]
    fn resolve_known_recipient() {
        let mut dir = InMemoryDirectory::new();
        let recipient = RecipientId::from_label("alice.pay");
        dir.insert(recipient, RecipientPreference::unified(AccountId([1u8; 32])));

        let pref = dir.resolve(&recipient).unwrap();
        assert_eq!(pref.route_kind, RouteKind::UnifiedBalance);
        assert_eq!(pref.delivery_address, AccountId([1u8; 32]));
    }

    #[test]
    fn resolve_unknown_recipient() {
        let dir = InMemoryDirectory::new();
        assert!(dir.resolve(&RecipientId::from_label("nobody")).is_none());
    }

    #[test]
    fn insert_replaces_existing_entry() {
        // The directory owner may repoint a recipient at any time; the
        // engine sees whatever is current.
        let mut dir = InMemoryDirectory::new();
        let recipient = RecipientId::from_label("carol.pay");
        dir.insert(recipient, RecipientPreference::unified(AccountId([1u8; 32])));
        dir.insert(recipient, RecipientPreference::bridge(AccountId([2u8; 32]), 6));

        let pref = dir.resolve(&recipient).unwrap();
        assert_eq!(pref.route_kind, RouteKind::BridgeBurnMint);
        assert_eq!(pref.bridge_domain, Some(6));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn remove_makes_recipient_unknown() {
        let mut dir = InMemoryDirectory::new();
        let recipient = RecipientId::from_label("dave.pay");
        dir.insert(recipient, RecipientPreference::direct(AccountId([3u8; 32])));
        dir.remove(&recipient);
        assert!(dir.resolve(&recipient).is_none());
        assert!(dir.is_empty());
    }
}
