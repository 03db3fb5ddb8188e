//! # TransferAuthorization: the single-use payment capability
//!
//! A `TransferAuthorization` is a signed, time-bounded permission letting a
//! specific executor pull a specific amount from a specific payer, with no
//! prior approval step. It is created by the payer off-line and may be
//! submitted by **anyone**; authorization derives entirely from the
//! signature, never from the submitter's identity.
//!
//! ## Security Properties
//!
//! - **Single-use**: `(payer, nonce)` is consumed exactly once, permanently
//! - **Executor-bound**: the signature covers the executor's identity, so a
//!   front-runner cannot redirect the pull to itself
//! - **Time-bound**: valid only within `[valid_after, valid_before)`
//! - **Signature-bound**: ed25519 over the canonical signing payload

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signature, VerifyingKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset, AuthNonce};

/// A signed transfer authorization, as produced by the payer's wallet.
///
/// The payee is *not* part of this structure: the recipient rides on the
/// settlement call itself and is resolved through the preference directory.
/// The authorization only binds who pays, who may execute the pull, how
/// much, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferAuthorization {
    /// The account whose funds are pulled (and whose key signed this).
    pub payer: AccountId,
    /// The executor allowed to perform the pull, i.e. the settlement engine.
    pub executor: AccountId,
    /// The asset to pull.
    pub asset: Asset,
    /// Amount authorized.
    pub amount: Decimal,
    /// Start of the validity window (inclusive).
    pub valid_after: DateTime<Utc>,
    /// End of the validity window (exclusive).
    pub valid_before: DateTime<Utc>,
    /// Payer-chosen replay-prevention nonce, unique per payer.
    pub nonce: AuthNonce,
    /// Ed25519 signature over [`Self::signing_payload`].
    pub signature: Vec<u8>,
}

impl TransferAuthorization {
    /// Canonical signing payload for ed25519 verification.
    ///
    /// Format: `"opensettle:auth:v1:" || payer || executor || asset ||
    /// amount || valid_after || valid_before || nonce`
    #[must_use]
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(192);
        payload.extend_from_slice(b"opensettle:auth:v1:");
        payload.extend_from_slice(&self.payer.0);
        payload.extend_from_slice(&self.executor.0);
        payload.extend_from_slice(self.asset.as_bytes());
        payload.extend_from_slice(self.amount.to_string().as_bytes());
        payload.extend_from_slice(&self.valid_after.timestamp().to_le_bytes());
        payload.extend_from_slice(&self.valid_before.timestamp().to_le_bytes());
        payload.extend_from_slice(&self.nonce.0);
        payload
    }

    /// Returns `true` if `now` is past the validity window.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.valid_before
    }

    /// Returns `true` if `now` is before the validity window opens.
    #[must_use]
    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.valid_after
    }

    /// Verify the ed25519 signature against the payer's public key.
    ///
    /// Returns `false` for malformed keys or signatures as well as for
    /// genuine verification failures; the caller cannot distinguish, and
    /// must not need to.
    #[must_use]
    pub fn signature_is_valid(&self) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.payer.0) else {
            return false;
        };
        let Ok(sig) = Signature::from_slice(&self.signature) else {
            return false;
        };
        key.verify_strict(&self.signing_payload(), &sig).is_ok()
    }
}

/// Signed fixtures for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl TransferAuthorization {
    /// Create an authorization signed with the given key, valid for one
    /// hour starting one minute ago.
    pub fn signed(
        signing_key: &ed25519_dalek::SigningKey,
        executor: AccountId,
        asset: &str,
        amount: Decimal,
        nonce: AuthNonce,
    ) -> Self {
        let now = Utc::now();
        Self::signed_with_window(
            signing_key,
            executor,
            asset,
            amount,
            nonce,
            now - chrono::Duration::minutes(1),
            now + chrono::Duration::hours(1),
        )
    }

    /// Create a signed authorization with an explicit validity window.
    pub fn signed_with_window(
        signing_key: &ed25519_dalek::SigningKey,
        executor: AccountId,
        asset: &str,
        amount: Decimal,
        nonce: AuthNonce,
        valid_after: DateTime<Utc>,
        valid_before: DateTime<Utc>,
    ) -> Self {
        use ed25519_dalek::Signer;

        let mut auth = Self {
            payer: AccountId::from_pubkey(signing_key.verifying_key().to_bytes()),
            executor,
            asset: asset.to_string(),
            amount,
            valid_after,
            valid_before,
            nonce,
            signature: Vec::new(),
        };
        auth.signature = signing_key.sign(&auth.signing_payload()).to_bytes().to_vec();
        auth
    }

    /// Fresh payer keypair for tests.
    #[must_use]
    pub fn test_keypair() -> (ed25519_dalek::SigningKey, AccountId) {
        let key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
        let account = AccountId::from_pubkey(key.verifying_key().to_bytes());
        (key, account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AccountId {
        AccountId([0xEE; 32])
    }

    fn make_auth() -> (ed25519_dalek::SigningKey, TransferAuthorization) {
        let (key, _) = TransferAuthorization::test_keypair();
        let auth = TransferAuthorization::signed(
            &key,
            engine(),
            "USDC",
            Decimal::new(10000, 2),
            AuthNonce::random(),
        );
        (key, auth)
    }

    #[test]
    fn signed_fixture_verifies() {
        let (_, auth) = make_auth();
        assert!(auth.signature_is_valid());
    }

    #[test]
    fn tampered_amount_fails_verification() {
        let (_, mut auth) = make_auth();
        auth.amount = Decimal::new(99999, 2);
        assert!(!auth.signature_is_valid());
    }

    #[test]
    fn tampered_executor_fails_verification() {
        let (_, mut auth) = make_auth();
        auth.executor = AccountId([0xAA; 32]);
        assert!(!auth.signature_is_valid());
    }

    #[test]
    fn wrong_payer_key_fails_verification() {
        let (_, mut auth) = make_auth();
        let (_, other_account) = TransferAuthorization::test_keypair();
        auth.payer = other_account;
        assert!(!auth.signature_is_valid());
    }

    #[test]
    fn garbage_signature_fails_verification() {
        let (_, mut auth) = make_auth();
        auth.signature = vec![0u8; 64];
        assert!(!auth.signature_is_valid());

        // Wrong length too.
        auth.signature = vec![0u8; 12];
        assert!(!auth.signature_is_valid());
    }

    #[test]
    fn signing_payload_deterministic() {
        let (_, auth) = make_auth();
        assert_eq!(auth.signing_payload(), auth.signing_payload());
    }

    #[test]
    fn signing_payload_differs_by_nonce() {
        let (_, mut a) = make_auth();
        let mut b = a.clone();
        a.nonce = AuthNonce([1u8; 32]);
        b.nonce = AuthNonce([2u8; 32]);
        assert_ne!(a.signing_payload(), b.signing_payload());
    }

    #[test]
    fn window_checks() {
        let (key, _) = TransferAuthorization::test_keypair();
        let now = Utc::now();

        let expired = TransferAuthorization::signed_with_window(
            &key,
            engine(),
            "USDC",
            Decimal::ONE,
            AuthNonce::random(),
            now - chrono::Duration::hours(2),
            now - chrono::Duration::hours(1),
        );
        assert!(expired.is_expired_at(now));
        assert!(!expired.is_not_yet_valid_at(now));

        let future = TransferAuthorization::signed_with_window(
            &key,
            engine(),
            "USDC",
            Decimal::ONE,
            AuthNonce::random(),
            now + chrono::Duration::hours(1),
            now + chrono::Duration::hours(2),
        );
        assert!(future.is_not_yet_valid_at(now));
        assert!(!future.is_expired_at(now));
    }

    #[test]
    fn valid_before_is_exclusive() {
        let (key, _) = TransferAuthorization::test_keypair();
        let now = Utc::now();
        let auth = TransferAuthorization::signed_with_window(
            &key,
            engine(),
            "USDC",
            Decimal::ONE,
            AuthNonce::random(),
            now - chrono::Duration::hours(1),
            now,
        );
        // now == valid_before is already outside the window.
        assert!(auth.is_expired_at(now));
    }

    #[test]
    fn serde_roundtrip() {
        let (_, auth) = make_auth();
        let json = serde_json::to_string(&auth).unwrap();
        let back: TransferAuthorization = serde_json::from_str(&json).unwrap();
        assert_eq!(auth.payer, back.payer);
        assert_eq!(auth.amount, back.amount);
        assert_eq!(auth.nonce, back.nonce);
        assert!(back.signature_is_valid());
    }
}
