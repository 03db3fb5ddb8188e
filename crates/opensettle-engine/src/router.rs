//! Settlement routing, the orchestration core.
//!
//! A settlement attempt runs: validation → fund acquisition → preference
//! resolution → single-rail dispatch → reputation update → record + event
//! emission. Errors before fund acquisition abort with no trace beyond a
//! possibly-consumed nonce. Errors after it are material, since funds have
//! moved into custody, so they produce an explicit `Failed` record and a
//! reputation penalty, and are never retried.
//!
//! Submission is permissionless: the router never looks at who called it.
//! Authorization derives from the signed payload or the attestation,
//! which is precisely why the executor binding inside the authorization
//! matters (see [`opensettle_gate::AuthorizationValidator`]).

use chrono::Utc;
use opensettle_gate::{AuthorizationValidator, CustodyLedger};
use opensettle_rails::{
    BridgeRail, ExternalMinter, PreferenceDirectory, RailSet, UnifiedBalanceRail,
};
use opensettle_types::{
    constants, AccountId, EngineConfig, EngineEvent, OpensettleError, RecipientId,
    RecipientPreference, Result, RouteKind, SettlementId, SettlementOutcome, SettlementRecord,
    TransferAuthorization,
};
use rust_decimal::Decimal;

use crate::accountant::ExternalMintAccountant;
use crate::reputation::ReputationLedger;

/// Orchestrates settlement attempts end-to-end. Owns the attempt
/// lifecycle and is the only writer of settlement records.
#[derive(Debug)]
pub struct SettlementRouter {
    config: EngineConfig,
    validator: AuthorizationValidator,
    custody: CustodyLedger,
    accountant: ExternalMintAccountant,
    /// `None` means reputation is not tracked; records then carry the
    /// out-of-range sentinel instead of a score.
    reputation: Option<ReputationLedger>,
    records: Vec<SettlementRecord>,
    events: Vec<EngineEvent>,
}

impl SettlementRouter {
    /// Router with reputation tracking enabled.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let accountant = ExternalMintAccountant::new(config.zero_mint_policy);
        Self {
            config,
            validator: AuthorizationValidator::new(),
            custody: CustodyLedger::new(),
            accountant,
            reputation: Some(ReputationLedger::new()),
            records: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Router with no reputation ledger. Records carry
    /// [`constants::REPUTATION_UNTRACKED`].
    #[must_use]
    pub fn without_reputation(config: EngineConfig) -> Self {
        let mut router = Self::new(config);
        router.reputation = None;
        router
    }

    // ------------------------------------------------------------------
    // Entry mode 1: direct-pull settlement
    // ------------------------------------------------------------------

    /// Settle by pulling authorized funds from the payer.
    ///
    /// Callable by any submitter carrying a valid authorization. After
    /// validation succeeds the nonce is consumed for good: a pull failure
    /// (e.g. insufficient payer balance) is unrecoverable for that
    /// authorization, and the error carries that fact to the caller.
    pub fn settle_direct<D, U, B>(
        &mut self,
        rails: &mut RailSet<D, U, B>,
        recipient: RecipientId,
        amount: Decimal,
        asset: &str,
        memo: &str,
        auth: &TransferAuthorization,
    ) -> Result<SettlementRecord>
    where
        D: PreferenceDirectory,
        U: UnifiedBalanceRail,
        B: BridgeRail,
    {
        // Only strictly positive amounts move value on this path. A payer
        // can sign anything, including a negative amount against their own
        // empty account, so this cannot be left to the custody layer alone.
        // Checked before validation so no nonce is burned.
        if amount <= Decimal::ZERO {
            return Err(OpensettleError::InvalidAmount { amount });
        }

        // The signature covers the authorized (asset, amount) tuple; a
        // request that disagrees with it is a transfer the payer never
        // signed. Also checked before validation.
        if auth.amount != amount || auth.asset != asset {
            return Err(OpensettleError::InvalidSignature);
        }

        // 1. Validate and consume the nonce.
        let pull = self.validator.validate(auth, self.config.executor)?;
        self.events.push(EngineEvent::AuthorizationConsumed {
            payer: pull.payer,
            nonce: auth.nonce,
        });

        // 2. Acquire funds. From here on the nonce stays consumed even
        //    if the attempt fails.
        self.custody.pull(pull.payer, asset, amount)?;

        // 3-6. Shared routing tail.
        self.routing_tail(rails, pull.payer, recipient, asset, amount, memo)
    }

    // ------------------------------------------------------------------
    // Entry mode 2: mint-then-route settlement
    // ------------------------------------------------------------------

    /// Settle inbound attested value from the external minting system.
    ///
    /// The settled amount is whatever balance-diff reconciliation
    /// observes; fees are opaque. `payer_account` is trusted as the
    /// reputation subject because the attestation itself is authenticated
    /// by the external system, not by this parameter.
    #[allow(clippy::too_many_arguments)]
    pub fn settle_from_external_mint<D, U, B, M>(
        &mut self,
        rails: &mut RailSet<D, U, B>,
        minter: &mut M,
        attestation_payload: &[u8],
        attestation_signature: &[u8],
        recipient: RecipientId,
        payer_account: AccountId,
        memo: &str,
    ) -> Result<SettlementRecord>
    where
        D: PreferenceDirectory,
        U: UnifiedBalanceRail,
        B: BridgeRail,
        M: ExternalMinter,
    {
        let asset = self.config.mint_asset.clone();

        // 1. Mint and reconcile: `after - before` is the settled amount.
        let amount = self.accountant.reconcile(
            &mut self.custody,
            minter,
            attestation_payload,
            attestation_signature,
            &asset,
        )?;

        // 2-6. Shared routing tail.
        self.routing_tail(rails, payer_account, recipient, &asset, amount, memo)
    }

    // ------------------------------------------------------------------
    // Shared routing tail
    // ------------------------------------------------------------------

    fn routing_tail<D, U, B>(
        &mut self,
        rails: &mut RailSet<D, U, B>,
        payer: AccountId,
        recipient: RecipientId,
        asset: &str,
        amount: Decimal,
        memo: &str,
    ) -> Result<SettlementRecord>
    where
        D: PreferenceDirectory,
        U: UnifiedBalanceRail,
        B: BridgeRail,
    {
        // 3. Resolve the recipient's declared preference.
        let preference = rails.directory.resolve(&recipient);
        let route_kind = preference
            .as_ref()
            .map_or(RouteKind::UnifiedBalance, |p| p.route_kind);

        // 4. Dispatch to exactly one rail.
        let dispatched = match &preference {
            None => Err(OpensettleError::UnknownRecipient(recipient)),
            Some(pref) => self.dispatch(rails, pref, asset, amount),
        };

        // 5-6. Reputation update, record, events. Funds are already in
        // custody, so a dispatch failure is material and gets a record.
        match dispatched {
            Ok(()) => {
                let new_reputation = self.update_reputation(payer, true);
                let record = self.append_record(
                    payer,
                    recipient,
                    asset,
                    amount,
                    route_kind,
                    SettlementOutcome::Completed,
                    new_reputation,
                    memo,
                );
                self.events.push(EngineEvent::SettlementCompleted {
                    payer,
                    payee: recipient,
                    asset: asset.to_string(),
                    amount,
                    route_kind,
                    new_reputation,
                    memo: memo.to_string(),
                });
                tracing::info!(
                    %payer, %recipient, %asset, %amount, %route_kind,
                    new_reputation,
                    "settlement completed"
                );
                Ok(record)
            }
            Err(err) => {
                let new_reputation = self.update_reputation(payer, false);
                self.append_record(
                    payer,
                    recipient,
                    asset,
                    amount,
                    route_kind,
                    SettlementOutcome::Failed,
                    new_reputation,
                    memo,
                );
                tracing::warn!(
                    %payer, %recipient, %asset, %amount, %route_kind,
                    error = %err,
                    "settlement failed after fund acquisition"
                );
                Err(err)
            }
        }
    }

    fn dispatch<D, U, B>(
        &mut self,
        rails: &mut RailSet<D, U, B>,
        preference: &RecipientPreference,
        asset: &str,
        amount: Decimal,
    ) -> Result<()>
    where
        D: PreferenceDirectory,
        U: UnifiedBalanceRail,
        B: BridgeRail,
    {
        match preference.route_kind {
            // Same settlement domain: value stays on the engine's own
            // ledger, credited to the recipient.
            RouteKind::Direct => {
                self.custody
                    .settle_internal(preference.delivery_address, asset, amount)
            }
            // For the external rails the pool is debited before the rail
            // call and re-credited if the call fails, so delivered value
            // is never still counted in the pool.
            RouteKind::UnifiedBalance => {
                self.custody.debit_pool(asset, amount)?;
                match rails
                    .unified
                    .deposit_for(asset, preference.delivery_address, amount)
                {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        self.custody.credit_pool(asset, amount)?;
                        Err(err)
                    }
                }
            }
            RouteKind::BridgeBurnMint => {
                let domain = preference.bridge_domain.ok_or(
                    OpensettleError::MissingDestinationParam {
                        param: "bridge_domain",
                    },
                )?;
                self.custody.debit_pool(asset, amount)?;
                match rails.bridge.burn_and_mint(
                    amount,
                    domain,
                    preference.delivery_address,
                    asset,
                ) {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        self.custody.credit_pool(asset, amount)?;
                        Err(err)
                    }
                }
            }
        }
    }

    fn update_reputation(&mut self, payer: AccountId, success: bool) -> u32 {
        match &mut self.reputation {
            Some(ledger) => ledger.record(payer, success),
            None => constants::REPUTATION_UNTRACKED,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn append_record(
        &mut self,
        payer: AccountId,
        payee: RecipientId,
        asset: &str,
        amount: Decimal,
        route_kind: RouteKind,
        outcome: SettlementOutcome,
        new_reputation: u32,
        memo: &str,
    ) -> SettlementRecord {
        let record = SettlementRecord {
            id: SettlementId::new(),
            payer,
            payee,
            asset: asset.to_string(),
            amount,
            route_kind,
            outcome,
            new_reputation,
            memo: memo.to_string(),
            timestamp: Utc::now(),
        };
        self.records.push(record.clone());
        record
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The custody ledger.
    #[must_use]
    pub fn custody(&self) -> &CustodyLedger {
        &self.custody
    }

    /// Mutable custody access, for funding payers and simulating
    /// substrate outages.
    pub fn custody_mut(&mut self) -> &mut CustodyLedger {
        &mut self.custody
    }

    /// The append-only settlement records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[SettlementRecord] {
        &self.records
    }

    /// Emitted events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    /// The reputation ledger, if one is configured.
    #[must_use]
    pub fn reputation(&self) -> Option<&ReputationLedger> {
        self.reputation.as_ref()
    }

    /// The authorization validator (read access).
    #[must_use]
    pub fn validator(&self) -> &AuthorizationValidator {
        &self.validator
    }
}
