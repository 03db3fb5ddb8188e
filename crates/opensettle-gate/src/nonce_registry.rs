//! Permanent used-nonce registry, the replay defense.
//!
//! Each `(payer, nonce)` pair can be consumed exactly once. Unlike a
//! bounded idempotency cache, this set never evicts: a consumed nonce is
//! unusable forever, even after the authorization's validity window has
//! passed, so an evicted entry would reopen a replay window.

use std::collections::HashSet;

use opensettle_types::{AccountId, AuthNonce, OpensettleError, Result};

/// Append-only set of consumed `(payer, nonce)` pairs.
///
/// The consume path is a single check-and-insert on `&mut self`: no caller
/// can observe a state where the check passed but the mark has not taken
/// effect.
#[derive(Debug, Default)]
pub struct NonceRegistry {
    used: HashSet<(AccountId, AuthNonce)>,
}

impl NonceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            used: HashSet::new(),
        }
    }

    /// Consume a nonce. Fails, without any state change, if the pair
    /// was already consumed.
    ///
    /// # Errors
    /// Returns [`OpensettleError::ReplayedNonce`] if `(payer, nonce)` has
    /// already been consumed.
    pub fn consume(&mut self, payer: AccountId, nonce: AuthNonce) -> Result<()> {
        if !self.used.insert((payer, nonce)) {
            return Err(OpensettleError::ReplayedNonce { payer, nonce });
        }
        Ok(())
    }

    /// Check whether a pair has been consumed (without consuming).
    #[must_use]
    pub fn is_used(&self, payer: &AccountId, nonce: &AuthNonce) -> bool {
        self.used.contains(&(*payer, *nonce))
    }

    /// Number of consumed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    /// Whether no pair has been consumed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_consume_ok() {
        let mut registry = NonceRegistry::new();
        let payer = AccountId([1u8; 32]);
        let nonce = AuthNonce([2u8; 32]);
        assert!(registry.consume(payer, nonce).is_ok());
        assert!(registry.is_used(&payer, &nonce));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn second_consume_blocked() {
        let mut registry = NonceRegistry::new();
        let payer = AccountId([1u8; 32]);
        let nonce = AuthNonce([2u8; 32]);
        registry.consume(payer, nonce).unwrap();

        let err = registry.consume(payer, nonce).unwrap_err();
        assert!(
            matches!(err, OpensettleError::ReplayedNonce { payer: p, nonce: n }
                if p == payer && n == nonce),
            "Expected ReplayedNonce, got: {err:?}"
        );
        assert_eq!(registry.len(), 1, "failed consume must not change state");
    }

    #[test]
    fn same_nonce_different_payers_independent() {
        let mut registry = NonceRegistry::new();
        let nonce = AuthNonce([7u8; 32]);
        registry.consume(AccountId([1u8; 32]), nonce).unwrap();
        registry.consume(AccountId([2u8; 32]), nonce).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn different_nonces_same_payer_independent() {
        let mut registry = NonceRegistry::new();
        let payer = AccountId([1u8; 32]);
        registry.consume(payer, AuthNonce([1u8; 32])).unwrap();
        registry.consume(payer, AuthNonce([2u8; 32])).unwrap();
        registry.consume(payer, AuthNonce([3u8; 32])).unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn no_eviction_under_volume() {
        // Consumed pairs are permanent; nothing is ever evicted.
        let mut registry = NonceRegistry::new();
        let payer = AccountId([1u8; 32]);
        for i in 0..10_000u32 {
            let mut bytes = [0u8; 32];
            bytes[..4].copy_from_slice(&i.to_le_bytes());
            registry.consume(payer, AuthNonce(bytes)).unwrap();
        }
        assert_eq!(registry.len(), 10_000);
        assert!(registry.is_used(&payer, &AuthNonce([0u8; 32])));
    }

    #[test]
    fn empty_registry() {
        let registry = NonceRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.is_used(&AccountId([0u8; 32]), &AuthNonce([0u8; 32])));
    }
}
