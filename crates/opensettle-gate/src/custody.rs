//! Custody ledger: the engine's fund-acquisition substrate.
//!
//! Three balance planes:
//! - **external**: per-(account, asset) funds a payer has made pullable
//!   under signed authorizations
//! - **pool**: the engine's own custody, where every acquired amount lands
//!   before routing (pulls and external mints both credit here)
//! - **credits**: engine-internal settled balances for Direct-route
//!   recipients, who share the engine's settlement domain
//!
//! A pull is atomic: it either debits the payer and credits the pool, or
//! changes nothing.

use std::collections::HashMap;

use opensettle_types::{AccountId, Asset, OpensettleError, Result};
use rust_decimal::Decimal;

/// Balance ledger for the engine's custody domain.
#[derive(Debug, Default)]
pub struct CustodyLedger {
    /// Pullable payer funds.
    external: HashMap<(AccountId, Asset), Decimal>,
    /// Engine pool per asset.
    pool: HashMap<Asset, Decimal>,
    /// Internally settled recipient credits.
    credits: HashMap<(AccountId, Asset), Decimal>,
    /// Simulated substrate outage. When set, every operation fails with
    /// `CustodyUnavailable`.
    outage: Option<String>,
}

impl CustodyLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn check_online(&self) -> Result<()> {
        match &self.outage {
            Some(reason) => Err(OpensettleError::CustodyUnavailable {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Mark the custody substrate as unavailable.
    pub fn set_outage(&mut self, reason: impl Into<String>) {
        self.outage = Some(reason.into());
    }

    /// Clear a simulated outage.
    pub fn clear_outage(&mut self) {
        self.outage = None;
    }

    /// Fund a payer's pullable balance.
    pub fn deposit_external(&mut self, account: AccountId, asset: &str, amount: Decimal) {
        *self
            .external
            .entry((account, asset.to_string()))
            .or_insert(Decimal::ZERO) += amount;
    }

    /// A payer's pullable balance.
    #[must_use]
    pub fn external_balance(&self, account: AccountId, asset: &str) -> Decimal {
        self.external
            .get(&(account, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Pull authorized funds from a payer into the engine pool.
    ///
    /// # Errors
    /// - `CustodyUnavailable` if the substrate is down
    /// - `InvalidAmount` if `amount` is negative; a negative pull would
    ///   credit the payer from the pool
    /// - `InsufficientBalance` if the payer cannot cover `amount`
    pub fn pull(&mut self, payer: AccountId, asset: &str, amount: Decimal) -> Result<()> {
        self.check_online()?;
        if amount < Decimal::ZERO {
            return Err(OpensettleError::InvalidAmount { amount });
        }

        let available = self.external_balance(payer, asset);
        if available < amount {
            return Err(OpensettleError::InsufficientBalance {
                needed: amount,
                available,
            });
        }

        *self
            .external
            .entry((payer, asset.to_string()))
            .or_insert(Decimal::ZERO) -= amount;
        *self.pool.entry(asset.to_string()).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// The engine pool balance for an asset. This is the balance the
    /// mint accountant reads before and after an external mint.
    #[must_use]
    pub fn pool_balance(&self, asset: &str) -> Decimal {
        self.pool.get(asset).copied().unwrap_or(Decimal::ZERO)
    }

    /// Credit the engine pool directly. Called by the external minter when
    /// attested value arrives.
    ///
    /// # Errors
    /// Returns `CustodyUnavailable` if the substrate is down.
    pub fn credit_pool(&mut self, asset: &str, amount: Decimal) -> Result<()> {
        self.check_online()?;
        *self.pool.entry(asset.to_string()).or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// Debit the engine pool when value leaves on an external rail.
    ///
    /// # Errors
    /// - `CustodyUnavailable` if the substrate is down
    /// - `Internal` if the pool cannot cover the debit. Acquired funds
    ///   always cover the dispatched amount, so this indicates an engine
    ///   bug rather than a caller error
    pub fn debit_pool(&mut self, asset: &str, amount: Decimal) -> Result<()> {
        self.check_online()?;
        let balance = self.pool_balance(asset);
        if balance < amount {
            return Err(OpensettleError::Internal(format!(
                "pool underflow for {asset}: have {balance}, dispatching {amount}"
            )));
        }
        *self.pool.entry(asset.to_string()).or_insert(Decimal::ZERO) -= amount;
        Ok(())
    }

    /// Settle value internally: pool → recipient credit. The Direct route.
    ///
    /// # Errors
    /// Same as [`debit_pool`](Self::debit_pool).
    pub fn settle_internal(
        &mut self,
        recipient: AccountId,
        asset: &str,
        amount: Decimal,
    ) -> Result<()> {
        self.debit_pool(asset, amount)?;
        *self
            .credits
            .entry((recipient, asset.to_string()))
            .or_insert(Decimal::ZERO) += amount;
        Ok(())
    }

    /// A recipient's internally settled credit.
    #[must_use]
    pub fn credit_of(&self, account: AccountId, asset: &str) -> Decimal {
        self.credits
            .get(&(account, asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}
