//! Settlement records and emitted events, the engine's audit trail.
//!
//! Records are append-only: one per settlement attempt that reached the
//! router's dispatch step, whether it completed or explicitly failed.
//! A record is never revised after it is appended.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset, AuthNonce, RecipientId, RouteKind, SettlementId};

/// Terminal outcome of a settlement attempt that reached routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementOutcome {
    /// Value was delivered over the chosen rail.
    Completed,
    /// Funds were acquired but the routing tail failed. Terminal, never
    /// retried; recovering the acquired funds is out-of-band.
    Failed,
}

impl std::fmt::Display for SettlementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "COMPLETED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// One appended line of the settlement audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRecord {
    /// Unique, time-ordered record identifier.
    pub id: SettlementId,
    /// The account whose authorization or attestation funded the attempt.
    pub payer: AccountId,
    /// The recipient directory node the value was routed toward.
    pub payee: RecipientId,
    /// The settled asset.
    pub asset: Asset,
    /// The settled amount. For the external-mint path, the reconciled
    /// (fee-adjusted) amount, not any nominal figure.
    pub amount: Decimal,
    /// The rail the attempt was dispatched on.
    pub route_kind: RouteKind,
    /// How the attempt ended.
    pub outcome: SettlementOutcome,
    /// The payer's score after this attempt's reputation update, or
    /// [`constants::REPUTATION_UNTRACKED`](crate::constants::REPUTATION_UNTRACKED)
    /// when no ledger is configured.
    pub new_reputation: u32,
    /// Submitter-supplied memo, opaque to the engine.
    pub memo: String,
    /// When the record was appended.
    pub timestamp: DateTime<Utc>,
}

/// Events surfaced for external indexers. The engine emits these alongside
/// records; it does not implement indexing itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A settlement ran to completion on some rail.
    SettlementCompleted {
        payer: AccountId,
        payee: RecipientId,
        asset: Asset,
        amount: Decimal,
        route_kind: RouteKind,
        new_reputation: u32,
        memo: String,
    },
    /// An authorization's nonce was consumed. Emitted even when a later
    /// step of the same attempt fails; consumption is permanent.
    AuthorizationConsumed {
        payer: AccountId,
        nonce: AuthNonce,
    },
}
