//! Balance-diff reconciliation of external mints.
//!
//! The external minting system deducts an unspecified fee before value
//! reaches custody, so the attested nominal amount is never trusted. The
//! settled amount is established by observing the engine's pool balance
//! immediately before and after the mint call: `after - before` is
//! authoritative, full stop.
//!
//! The before/after read pair assumes no other deposit touches the same
//! pool balance in between. Inside one process that holds: reconcile
//! takes the custody ledger by exclusive borrow, so mint reconciliations
//! are serialized per attempt. Deployments that share one custody account
//! across processes must serialize reconciliations per asset externally,
//! or give each attempt a dedicated custody sub-account.

use opensettle_gate::CustodyLedger;
use opensettle_rails::ExternalMinter;
use opensettle_types::{OpensettleError, Result, ZeroMintPolicy};
use rust_decimal::Decimal;

/// Reconciles inbound attested mints into a trusted settled amount.
#[derive(Debug)]
pub struct ExternalMintAccountant {
    zero_mint_policy: ZeroMintPolicy,
}

impl ExternalMintAccountant {
    /// Accountant with the given zero-amount policy.
    #[must_use]
    pub fn new(zero_mint_policy: ZeroMintPolicy) -> Self {
        Self { zero_mint_policy }
    }

    /// Redeem an attestation and return the reconciled settled amount.
    ///
    /// A reconciled amount of zero is a valid, degenerate outcome under
    /// [`ZeroMintPolicy::Accept`]; under [`ZeroMintPolicy::Reject`] it
    /// fails with `OS_ERR_400` before any routing happens.
    ///
    /// # Errors
    /// - whatever the minter reports (fund acquisition failed, nothing
    ///   was credited)
    /// - [`OpensettleError::ZeroMintReconciled`] under the strict policy
    pub fn reconcile<M: ExternalMinter>(
        &self,
        custody: &mut CustodyLedger,
        minter: &mut M,
        payload: &[u8],
        signature: &[u8],
        asset: &str,
    ) -> Result<Decimal> {
        let before = custody.pool_balance(asset);
        minter.mint(custody, payload, signature)?;
        let after = custody.pool_balance(asset);

        let amount = after - before;
        if amount.is_zero() && self.zero_mint_policy == ZeroMintPolicy::Reject {
            return Err(OpensettleError::ZeroMintReconciled {
                asset: asset.to_string(),
            });
        }

        tracing::debug!(%asset, %amount, "external mint reconciled");
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opensettle_rails::FixedNetMinter;

    #[test]
    fn reconciled_amount_is_balance_diff_not_nominal() {
        // Nominal request of 100, net credit of 75 after fees: the
        // reconciled amount must be 75.
        let mut custody = CustodyLedger::new();
        let mut minter = FixedNetMinter::new("USDC", Decimal::new(75, 0));
        let accountant = ExternalMintAccountant::new(ZeroMintPolicy::Accept);

        let amount = accountant
            .reconcile(&mut custody, &mut minter, b"nominal:100", b"sig", "USDC")
            .unwrap();
        assert_eq!(amount, Decimal::new(75, 0));
    }

    #[test]
    fn diff_ignores_preexisting_pool_balance() {
        let mut custody = CustodyLedger::new();
        custody.credit_pool("USDC", Decimal::new(1000, 0)).unwrap();
        let mut minter = FixedNetMinter::new("USDC", Decimal::new(40, 0));
        let accountant = ExternalMintAccountant::new(ZeroMintPolicy::Accept);

        let amount = accountant
            .reconcile(&mut custody, &mut minter, b"payload", b"sig", "USDC")
            .unwrap();
        assert_eq!(amount, Decimal::new(40, 0));
        assert_eq!(custody.pool_balance("USDC"), Decimal::new(1040, 0));
    }

    #[test]
    fn zero_mint_accepted_by_default_policy() {
        let mut custody = CustodyLedger::new();
        let mut minter = FixedNetMinter::new("USDC", Decimal::ZERO);
        let accountant = ExternalMintAccountant::new(ZeroMintPolicy::Accept);

        let amount = accountant
            .reconcile(&mut custody, &mut minter, b"payload", b"sig", "USDC")
            .unwrap();
        assert_eq!(amount, Decimal::ZERO);
    }

    #[test]
    fn zero_mint_rejected_under_strict_policy() {
        let mut custody = CustodyLedger::new();
        let mut minter = FixedNetMinter::new("USDC", Decimal::ZERO);
        let accountant = ExternalMintAccountant::new(ZeroMintPolicy::Reject);

        let err = accountant
            .reconcile(&mut custody, &mut minter, b"payload", b"sig", "USDC")
            .unwrap_err();
        assert!(matches!(err, OpensettleError::ZeroMintReconciled { .. }));
    }

    #[test]
    fn minter_failure_propagates() {
        let mut custody = CustodyLedger::new();
        let mut minter = FixedNetMinter::failing("USDC", "attestation rejected");
        let accountant = ExternalMintAccountant::new(ZeroMintPolicy::Accept);

        let err = accountant
            .reconcile(&mut custody, &mut minter, b"payload", b"sig", "USDC")
            .unwrap_err();
        assert!(matches!(err, OpensettleError::CustodyUnavailable { .. }));
        assert_eq!(custody.pool_balance("USDC"), Decimal::ZERO);
    }
}
