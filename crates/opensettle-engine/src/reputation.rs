//! Reputation ledger: keyed storage for per-account scores.
//!
//! All mutation funnels through [`ReputationLedger::record`]; nothing else
//! in the engine writes a score. Entries are created lazily at an
//! account's first settlement and are never deleted; an account's history
//! is permanent even if every counterparty later disappears from the
//! directory.

use std::collections::HashMap;

use opensettle_types::{AccountId, ReputationEntry};

/// Sole writer of reputation scores.
#[derive(Debug, Default)]
pub struct ReputationLedger {
    entries: HashMap<AccountId, ReputationEntry>,
}

impl ReputationLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one settlement outcome for an account and return the
    /// post-update score. Initializes the account at the neutral baseline
    /// on first contact.
    pub fn record(&mut self, account: AccountId, success: bool) -> u32 {
        self.entries.entry(account).or_default().apply(success)
    }

    /// An account's current score, if it has ever settled.
    #[must_use]
    pub fn score_of(&self, account: &AccountId) -> Option<u32> {
        self.entries.get(account).map(|e| e.score)
    }

    /// An account's full entry, including observability counters.
    #[must_use]
    pub fn entry(&self, account: &AccountId) -> Option<&ReputationEntry> {
        self.entries.get(account)
    }

    /// Number of accounts with a reputation history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no account has settled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
