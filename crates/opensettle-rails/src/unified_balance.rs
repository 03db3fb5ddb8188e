//! Unified-balance rail seam.
//!
//! The unified-balance system pools recipient funds in recoverable
//! custody; a deposit can be swept back out by the recipient at any time.
//! That recoverability is why this rail is the routing default.

use opensettle_types::{AccountId, Asset, OpensettleError, Result, RouteKind};
use rust_decimal::Decimal;

/// Deposit-for-recipient rail.
pub trait UnifiedBalanceRail {
    /// Deposit `amount` of `asset` into the recipient's pooled balance.
    fn deposit_for(&mut self, asset: &str, address: AccountId, amount: Decimal) -> Result<()>;
}

/// One captured `deposit_for` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositCall {
    pub asset: Asset,
    pub address: AccountId,
    pub amount: Decimal,
}

/// Recording stand-in for the unified-balance adapter. Captures every
/// call; can be scripted to fail.
#[derive(Debug, Default)]
pub struct RecordingUnifiedBalance {
    /// Successfully accepted deposits, in call order.
    pub deposits: Vec<DepositCall>,
    /// When set, every call fails with this reason (and is not recorded).
    pub failure: Option<String>,
}

impl RecordingUnifiedBalance {
    /// Adapter that accepts every deposit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter that rejects every deposit with the given reason.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            deposits: Vec::new(),
            failure: Some(reason.into()),
        }
    }
}

impl UnifiedBalanceRail for RecordingUnifiedBalance {
    fn deposit_for(&mut self, asset: &str, address: AccountId, amount: Decimal) -> Result<()> {
        if let Some(reason) = &self.failure {
            return Err(OpensettleError::AdapterFailure {
                route: RouteKind::UnifiedBalance,
                reason: reason.clone(),
            });
        }
        self.deposits.push(DepositCall {
            asset: asset.to_string(),
            address,
            amount,
        });
        Ok(())
    }
}
