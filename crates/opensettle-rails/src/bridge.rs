//! Bridge rail seam: burn on the source domain, mint on the destination.
//!
//! Unlike a unified-balance deposit, a dispatched burn is irreversible:
//! there is no recovery path inside this engine if the destination mint
//! never lands. The router therefore only selects this rail when the
//! recipient has explicitly declared it, never as a default.

use opensettle_types::{AccountId, Asset, OpensettleError, Result, RouteKind};
use rust_decimal::Decimal;

/// Burn-and-mint rail.
pub trait BridgeRail {
    /// Burn `amount` of `asset` locally and mint it to `address` on the
    /// destination `domain`.
    fn burn_and_mint(
        &mut self,
        amount: Decimal,
        domain: u32,
        address: AccountId,
        asset: &str,
    ) -> Result<()>;
}

/// One captured `burn_and_mint` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeCall {
    pub amount: Decimal,
    pub domain: u32,
    pub address: AccountId,
    pub asset: Asset,
}

/// Recording stand-in for the bridge adapter.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    /// Successfully dispatched burns, in call order.
    pub burns: Vec<BridgeCall>,
    /// When set, every call fails with this reason (and is not recorded).
    pub failure: Option<String>,
}

impl RecordingBridge {
    /// Adapter that accepts every burn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter that rejects every burn with the given reason.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            burns: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

impl BridgeRail for RecordingBridge {
    fn burn_and_mint(
        &mut self,
        amount: Decimal,
        domain: u32,
        address: AccountId,
        asset: &str,
    ) -> Result<()> {
        if let Some(reason) = &self.failure {
            return Err(OpensettleError::AdapterFailure {
                route: RouteKind::BridgeBurnMint,
                reason: reason.clone(),
            });
        }
        self.burns.push(BridgeCall {
            amount,
            domain,
            address,
            asset: asset.to_string(),
        });
        Ok(())
    }
}
