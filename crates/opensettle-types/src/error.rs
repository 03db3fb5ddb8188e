//! Error types for the OpenSettle engine.
//!
//! All errors use the `OS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors
//! - 2xx: Custody / fund-acquisition errors
//! - 3xx: Routing errors
//! - 4xx: Accounting errors
//! - 9xx: General / internal errors
//!
//! Propagation policy: every error aborts the current settlement attempt.
//! Nothing is retried internally. A nonce consumed before the failing step
//! stays consumed; the caller must produce a fresh authorization to retry.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountId, AuthNonce, RecipientId, RouteKind};

/// Central error enum for all OpenSettle operations.
#[derive(Debug, Error)]
pub enum OpensettleError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The authorization's validity window has already closed.
    #[error("OS_ERR_100: Authorization expired at {valid_before}")]
    AuthExpired { valid_before: chrono::DateTime<chrono::Utc> },

    /// The authorization's validity window has not opened yet.
    #[error("OS_ERR_101: Authorization not valid until {valid_after}")]
    AuthNotYetValid { valid_after: chrono::DateTime<chrono::Utc> },

    /// The ed25519 signature did not verify against the payer's key.
    #[error("OS_ERR_102: Authorization signature verification failed")]
    InvalidSignature,

    /// The authorization names a different executor than this engine.
    /// Front-running defense: only the named executor may pull the funds.
    #[error("OS_ERR_103: Executor mismatch: authorization names {named}, engine is {expected}")]
    CallerMismatch { named: AccountId, expected: AccountId },

    /// The (payer, nonce) pair was already consumed (replay prevention).
    #[error("OS_ERR_104: Replayed nonce {nonce} for payer {payer}")]
    ReplayedNonce { payer: AccountId, nonce: AuthNonce },

    /// The settlement amount is not strictly positive. The custody model
    /// has no representation for negative value movement; zero is legal
    /// only as a reconciled external-mint outcome.
    #[error("OS_ERR_105: Non-positive settlement amount {amount}")]
    InvalidAmount { amount: Decimal },

    // =================================================================
    // Custody / Fund-Acquisition Errors (2xx)
    // =================================================================
    /// The payer's pullable balance cannot cover the authorized amount.
    /// The nonce is already consumed at this point; resubmission with the
    /// same authorization is permanently impossible.
    #[error("OS_ERR_200: Insufficient payer balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// The custody substrate rejected the operation outright.
    #[error("OS_ERR_201: Custody unavailable: {reason}")]
    CustodyUnavailable { reason: String },

    // =================================================================
    // Routing Errors (3xx)
    // =================================================================
    /// The preference directory has no entry for this recipient.
    #[error("OS_ERR_300: Unknown recipient {0}")]
    UnknownRecipient(RecipientId),

    /// Reserved. Unrecognized route tokens currently default to
    /// UnifiedBalance at parse time, so this has no producer yet.
    #[error("OS_ERR_301: Unsupported route: {kind}")]
    UnsupportedRoute { kind: String },

    /// A route requires a destination parameter the preference lacks
    /// (e.g., BridgeBurnMint without a bridge domain).
    #[error("OS_ERR_302: Missing destination parameter: {param}")]
    MissingDestinationParam { param: &'static str },

    /// A rail adapter reported a failure. Funds were already acquired;
    /// recovery is an out-of-band operational concern.
    #[error("OS_ERR_303: {route} adapter failed: {reason}")]
    AdapterFailure { route: RouteKind, reason: String },

    // =================================================================
    // Accounting Errors (4xx)
    // =================================================================
    /// Balance-diff reconciliation produced exactly zero and the engine
    /// is configured with [`ZeroMintPolicy::Reject`](crate::ZeroMintPolicy).
    #[error("OS_ERR_400: External mint reconciled to zero for asset {asset}")]
    ZeroMintReconciled { asset: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OS_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("OS_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("OS_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk, network).
    #[error("OS_ERR_903: I/O error: {0}")]
    Io(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpensettleError>;

// Conversion from std::io::Error
impl From<std::io::Error> for OpensettleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replayed_nonce_display() {
        let err = OpensettleError::ReplayedNonce {
            payer: AccountId([1u8; 32]),
            nonce: AuthNonce([2u8; 32]),
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("OS_ERR_104"), "Got: {msg}");
        assert!(msg.contains("acct:"));
        assert!(msg.contains("nonce:"));
    }

    #[test]
    fn insufficient_balance_display() {
        let err = OpensettleError::InsufficientBalance {
            needed: Decimal::new(100, 0),
            available: Decimal::new(50, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_200"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn adapter_failure_display() {
        let err = OpensettleError::AdapterFailure {
            route: RouteKind::BridgeBurnMint,
            reason: "attestation service timeout".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("OS_ERR_303"));
        assert!(msg.contains("BRIDGE_BURN_MINT"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn all_errors_have_os_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(OpensettleError::InvalidSignature),
            Box::new(OpensettleError::UnknownRecipient(RecipientId([0u8; 32]))),
            Box::new(OpensettleError::MissingDestinationParam {
                param: "bridge_domain",
            }),
            Box::new(OpensettleError::ZeroMintReconciled {
                asset: "USDC".into(),
            }),
            Box::new(OpensettleError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OS_ERR_"),
                "Error missing OS_ERR_ prefix: {msg}"
            );
        }
    }
}
