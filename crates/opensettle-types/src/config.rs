//! Configuration types for the OpenSettle engine.

use serde::{Deserialize, Serialize};

use crate::{constants, AccountId, Asset};

/// Policy for an external mint that reconciles to exactly zero.
///
/// The source system treats a zero-value settlement as degenerate but
/// valid; whether that should instead be a hard failure is left to the
/// operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroMintPolicy {
    /// Route the zero-value settlement normally (default).
    Accept,
    /// Fail the attempt with `OS_ERR_400` before routing.
    Reject,
}

/// Configuration for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The engine's own account, the executor every authorization must
    /// name, and the holder of the custody pool.
    pub executor: AccountId,
    /// The asset settled through the external mint path.
    pub mint_asset: Asset,
    /// Zero-amount reconciliation policy.
    pub zero_mint_policy: ZeroMintPolicy,
}

impl EngineConfig {
    /// Config with the default mint asset and permissive zero-mint policy.
    #[must_use]
    pub fn new(executor: AccountId) -> Self {
        Self {
            executor,
            mint_asset: constants::DEFAULT_MINT_ASSET.to_string(),
            zero_mint_policy: ZeroMintPolicy::Accept,
        }
    }

    /// Same config with a strict zero-mint policy.
    #[must_use]
    pub fn with_zero_mint_policy(mut self, policy: ZeroMintPolicy) -> Self {
        self.zero_mint_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = EngineConfig::new(AccountId([1u8; 32]));
        assert_eq!(cfg.mint_asset, "USDC");
        assert_eq!(cfg.zero_mint_policy, ZeroMintPolicy::Accept);
    }

    #[test]
    fn strict_zero_mint_policy() {
        let cfg = EngineConfig::new(AccountId([1u8; 32]))
            .with_zero_mint_policy(ZeroMintPolicy::Reject);
        assert_eq!(cfg.zero_mint_policy, ZeroMintPolicy::Reject);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = EngineConfig::new(AccountId([2u8; 32]));
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.executor, back.executor);
        assert_eq!(cfg.mint_asset, back.mint_asset);
        assert_eq!(cfg.zero_mint_policy, back.zero_mint_policy);
    }
}
