//! Authorization validation: the one-shot consumption state machine.
//!
//! Checks run in a fixed order: validity window, signature, executor
//! binding, nonce freshness. Only if all four pass is the nonce consumed,
//! and the consumption happens inside the same exclusive borrow as the
//! freshness check. There is no observable intermediate state.
//!
//! Once consumed, a nonce stays consumed even if a later step of the same
//! settlement attempt fails. That asymmetry is deliberate: the consumption
//! primitive and the rest of the engine are not a single trusted unit, and
//! a failed pull after consumption is surfaced to the caller as permanently
//! unrecoverable for that authorization.

use chrono::{DateTime, Utc};
use opensettle_types::{
    AccountId, Asset, OpensettleError, Result, TransferAuthorization,
};
use rust_decimal::Decimal;

use crate::nonce_registry::NonceRegistry;

/// The validated facts the router may act on: who pays, what, and how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPull {
    /// The payer recovered from the verified signature.
    pub payer: AccountId,
    /// The authorized asset.
    pub asset: Asset,
    /// The authorized amount.
    pub amount: Decimal,
}

/// Validates transfer authorizations and consumes their nonces.
///
/// Sole writer of the used-nonce set.
#[derive(Debug)]
pub struct AuthorizationValidator {
    nonces: NonceRegistry,
}

impl AuthorizationValidator {
    /// Create a validator with an empty nonce registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nonces: NonceRegistry::new(),
        }
    }

    /// Validate an authorization against the expected executor, consuming
    /// its nonce on success.
    ///
    /// # Errors
    /// - `AuthExpired` / `AuthNotYetValid`: now is outside
    ///   `[valid_after, valid_before)`
    /// - `InvalidSignature`: the signature does not verify for the payer
    /// - `CallerMismatch`: the authorization names a different executor
    /// - `ReplayedNonce`: `(payer, nonce)` was already consumed
    pub fn validate(
        &mut self,
        auth: &TransferAuthorization,
        expected_executor: AccountId,
    ) -> Result<ValidatedPull> {
        self.validate_at(auth, expected_executor, Utc::now())
    }

    /// [`validate`](Self::validate) against an explicit clock.
    pub fn validate_at(
        &mut self,
        auth: &TransferAuthorization,
        expected_executor: AccountId,
        now: DateTime<Utc>,
    ) -> Result<ValidatedPull> {
        // 1. Validity window.
        if auth.is_expired_at(now) {
            return Err(OpensettleError::AuthExpired {
                valid_before: auth.valid_before,
            });
        }
        if auth.is_not_yet_valid_at(now) {
            return Err(OpensettleError::AuthNotYetValid {
                valid_after: auth.valid_after,
            });
        }

        // 2. Signature over (payer, executor, asset, amount, window, nonce).
        if !auth.signature_is_valid() {
            return Err(OpensettleError::InvalidSignature);
        }

        // 3. Executor binding. The front-running defense: an arbitrary
        //    submitter cannot become the fund recipient of the pull.
        if auth.executor != expected_executor {
            return Err(OpensettleError::CallerMismatch {
                named: auth.executor,
                expected: expected_executor,
            });
        }

        // 4. Nonce freshness: check and mark in one atomic step.
        self.nonces.consume(auth.payer, auth.nonce)?;

        tracing::debug!(
            payer = %auth.payer,
            nonce = %auth.nonce,
            amount = %auth.amount,
            "authorization consumed"
        );

        Ok(ValidatedPull {
            payer: auth.payer,
            asset: auth.asset.clone(),
            amount: auth.amount,
        })
    }

    /// Read access to the used-nonce set.
    #[must_use]
    pub fn nonces(&self) -> &NonceRegistry {
        &self.nonces
    }
}

impl Default for AuthorizationValidator {
    fn default() -> Self {
        Self::new()
    }
}
