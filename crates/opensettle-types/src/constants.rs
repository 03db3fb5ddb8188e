//! System-wide constants for the OpenSettle engine.

/// Neutral baseline score assigned the first time an account settles.
pub const REPUTATION_BASELINE: u32 = 50;

/// Lower bound of the reputation score range.
pub const REPUTATION_MIN: u32 = 0;

/// Upper bound of the reputation score range.
pub const REPUTATION_MAX: u32 = 100;

/// Score increment applied on a successful settlement.
pub const REPUTATION_SUCCESS_DELTA: u32 = 1;

/// Score penalty applied on a failed settlement.
pub const REPUTATION_FAILURE_PENALTY: u32 = 5;

/// Sentinel emitted in records when no reputation ledger is configured.
/// Deliberately out of the valid [0, 100] range so "not tracked" can never
/// be confused with a real score.
pub const REPUTATION_UNTRACKED: u32 = 500;

// ---------------------------------------------------------------------------
// Bridge domain identifiers (not chain IDs; the bridge operator's own
// numbering of settlement domains).
// ---------------------------------------------------------------------------

/// Ethereum bridge domain.
pub const BRIDGE_DOMAIN_ETHEREUM: u32 = 0;

/// Optimism bridge domain.
pub const BRIDGE_DOMAIN_OPTIMISM: u32 = 2;

/// Arbitrum bridge domain.
pub const BRIDGE_DOMAIN_ARBITRUM: u32 = 3;

/// Base bridge domain.
pub const BRIDGE_DOMAIN_BASE: u32 = 6;

/// Arc bridge domain.
pub const BRIDGE_DOMAIN_ARC: u32 = 26;

/// Default asset settled through the external mint path.
pub const DEFAULT_MINT_ASSET: &str = "USDC";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenSettle";
