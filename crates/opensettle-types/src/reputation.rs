//! Reputation scoring: a bounded step transition on a per-account score.
//!
//! The score lives in `[0, 100]`, starts at the neutral baseline of 50,
//! moves up by 1 on success and down by 5 on failure, and never decays.
//! Scoring depends only on the current score; the attempt counters exist
//! purely for observability.

use serde::{Deserialize, Serialize};

use crate::constants::{
    REPUTATION_BASELINE, REPUTATION_FAILURE_PENALTY, REPUTATION_MAX, REPUTATION_SUCCESS_DELTA,
};

/// One account's reputation state. Lazily created at the account's first
/// settlement; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationEntry {
    /// Current score, always within `[0, 100]`.
    pub score: u32,
    /// Total settlement attempts recorded against this account.
    pub total: u64,
    /// Attempts that completed.
    pub success: u64,
    /// Attempts that explicitly failed.
    pub failure: u64,
}

impl ReputationEntry {
    /// Fresh entry at the neutral baseline with no history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            score: REPUTATION_BASELINE,
            total: 0,
            success: 0,
            failure: 0,
        }
    }

    /// Apply one settlement outcome and return the post-update score.
    ///
    /// Pure step transition: `min(score + 1, 100)` on success,
    /// `max(score - 5, 0)` on failure (saturating).
    pub fn apply(&mut self, success: bool) -> u32 {
        self.total += 1;
        if success {
            self.success += 1;
            self.score = (self.score + REPUTATION_SUCCESS_DELTA).min(REPUTATION_MAX);
        } else {
            self.failure += 1;
            self.score = self.score.saturating_sub(REPUTATION_FAILURE_PENALTY);
        }
        self.score
    }
}

impl Default for ReputationEntry {
    fn default() -> Self {
        Self::new()
    }
}
