//! Recipient routing preferences.
//!
//! The preference directory maps a [`RecipientId`](crate::RecipientId) to a
//! delivery address and a declared route kind. The directory is external and
//! read-only from the engine's perspective; entries may be stale, partial,
//! or written by older clients with route tokens this engine has never seen.
//! Anything unrecognized degrades to [`RouteKind::UnifiedBalance`], the
//! liquidity-preserving default, never to an irreversible bridge burn.

use serde::{Deserialize, Serialize};

use crate::{AccountId, Asset};

/// The delivery mechanism chosen for a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteKind {
    /// Payer and payee share a settlement domain: value stays on the
    /// engine's own custody ledger, credited to the recipient. No adapter.
    Direct,
    /// Deposit into the recipient's pooled unified balance. Recoverable
    /// custody; the safe default.
    UnifiedBalance,
    /// Burn on the source domain, mint on the destination domain.
    /// Irreversible once dispatched; requires a bridge domain.
    BridgeBurnMint,
}

impl RouteKind {
    /// Parse a directory route token. Absent, empty, or unrecognized
    /// tokens all resolve to `UnifiedBalance`, never to `Direct` or
    /// `BridgeBurnMint`.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("direct") => Self::Direct,
            Some("bridge") => Self::BridgeBurnMint,
            _ => Self::UnifiedBalance,
        }
    }
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "DIRECT"),
            Self::UnifiedBalance => write!(f, "UNIFIED_BALANCE"),
            Self::BridgeBurnMint => write!(f, "BRIDGE_BURN_MINT"),
        }
    }
}

/// A recipient's resolved delivery preference.
///
/// Owned and mutated by the external directory; the engine only reads it,
/// once per settlement attempt, at routing time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientPreference {
    /// Where value is delivered on the chosen rail.
    pub delivery_address: AccountId,
    /// The declared route kind (already defaulted at parse time).
    pub route_kind: RouteKind,
    /// Destination network label, if the directory declares one.
    pub destination_network: Option<String>,
    /// Asset the recipient prefers to receive, if declared.
    pub destination_asset: Option<Asset>,
    /// Bridge domain identifier. Meaningful only for `BridgeBurnMint`.
    pub bridge_domain: Option<u32>,
}

impl RecipientPreference {
    /// Preference for same-domain delivery.
    #[must_use]
    pub fn direct(delivery_address: AccountId) -> Self {
        Self {
            delivery_address,
            route_kind: RouteKind::Direct,
            destination_network: None,
            destination_asset: None,
            bridge_domain: None,
        }
    }

    /// Preference for pooled unified-balance delivery.
    #[must_use]
    pub fn unified(delivery_address: AccountId) -> Self {
        Self {
            delivery_address,
            route_kind: RouteKind::UnifiedBalance,
            destination_network: None,
            destination_asset: None,
            bridge_domain: None,
        }
    }

    /// Preference for cross-domain burn-and-mint delivery.
    #[must_use]
    pub fn bridge(delivery_address: AccountId, bridge_domain: u32) -> Self {
        Self {
            delivery_address,
            route_kind: RouteKind::BridgeBurnMint,
            destination_network: None,
            destination_asset: None,
            bridge_domain: Some(bridge_domain),
        }
    }
}
