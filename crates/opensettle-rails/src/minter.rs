//! External minter seam.
//!
//! The minter redeems an attestation issued by the external minting
//! system and credits the resulting value into the engine's custody pool.
//! The attestation's authenticity is the *minter's* concern; the engine
//! never parses the payload, and never trusts any amount it might imply;
//! the settled amount is established afterwards by balance diff.

use opensettle_gate::CustodyLedger;
use opensettle_types::{Asset, OpensettleError, Result};
use rust_decimal::Decimal;

/// Attestation-redeeming mint primitive.
pub trait ExternalMinter {
    /// Redeem an attestation, crediting whatever net value it carries
    /// into the engine's custody pool.
    fn mint(&mut self, custody: &mut CustodyLedger, payload: &[u8], signature: &[u8])
        -> Result<()>;
}

/// Stand-in minter that credits a fixed net amount per redemption,
/// regardless of what the attestation payload claims. Models the external
/// system's opaque fee deduction.
#[derive(Debug)]
pub struct FixedNetMinter {
    /// Asset credited on each mint.
    pub asset: Asset,
    /// Net amount credited on each mint (post-fee).
    pub net_amount: Decimal,
    /// When set, every mint fails with this reason before crediting.
    pub failure: Option<String>,
    /// Number of redemptions performed.
    pub mints: usize,
}

impl FixedNetMinter {
    /// Minter crediting `net_amount` of `asset` per redemption.
    #[must_use]
    pub fn new(asset: impl Into<Asset>, net_amount: Decimal) -> Self {
        Self {
            asset: asset.into(),
            net_amount,
            failure: None,
            mints: 0,
        }
    }

    /// Minter that rejects every redemption.
    #[must_use]
    pub fn failing(asset: impl Into<Asset>, reason: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            net_amount: Decimal::ZERO,
            failure: Some(reason.into()),
            mints: 0,
        }
    }
}

impl ExternalMinter for FixedNetMinter {
    fn mint(
        &mut self,
        custody: &mut CustodyLedger,
        _payload: &[u8],
        _signature: &[u8],
    ) -> Result<()> {
        // A failed redemption is a fund-acquisition failure, not a rail
        // failure: no value ever reached custody.
        if let Some(reason) = &self.failure {
            return Err(OpensettleError::CustodyUnavailable {
                reason: reason.clone(),
            });
        }
        custody.credit_pool(&self.asset, self.net_amount)?;
        self.mints += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_credits_net_amount_to_pool() {
        let mut custody = CustodyLedger::new();
        let mut minter = FixedNetMinter::new("USDC", Decimal::new(75, 0));

        minter.mint(&mut custody, b"nominal:100", b"sig").unwrap();
        assert_eq!(custody.pool_balance("USDC"), Decimal::new(75, 0));
        assert_eq!(minter.mints, 1);
    }

    #[test]
    fn failing_minter_credits_nothing() {
        let mut custody = CustodyLedger::new();
        let mut minter = FixedNetMinter::failing("USDC", "attestation rejected");

        assert!(minter.mint(&mut custody, b"payload", b"sig").is_err());
        assert_eq!(custody.pool_balance("USDC"), Decimal::ZERO);
        assert_eq!(minter.mints, 0);
    }

    #[test]
    fn zero_net_mint_is_representable() {
        // Fees may eat the entire nominal amount; the minter itself does
        // not treat that as an error.
        let mut custody = CustodyLedger::new();
        let mut minter = FixedNetMinter::new("USDC", Decimal::ZERO);

        minter.mint(&mut custody, b"payload", b"sig").unwrap();
        assert_eq!(custody.pool_balance("USDC"), Decimal::ZERO);
        assert_eq!(minter.mints, 1);
    }
}
