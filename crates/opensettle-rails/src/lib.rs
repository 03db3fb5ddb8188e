//! # opensettle-rails
//!
//! Seams for the engine's external collaborators: the read-only preference
//! directory, the two active delivery rails, and the external minter.
//!
//! The engine never implements a rail itself; it dispatches to exactly
//! one adapter per settlement attempt and treats any adapter failure as
//! terminal. The trait implementations shipped here are in-memory
//! stand-ins: an [`InMemoryDirectory`] for the external identity
//! directory, recording adapters that capture calls and can be scripted
//! to fail, and a fixed-net minter for balance-diff testing.

pub mod bridge;
pub mod directory;
pub mod minter;
pub mod unified_balance;

pub use bridge::{BridgeCall, BridgeRail, RecordingBridge};
pub use directory::{InMemoryDirectory, PreferenceDirectory};
pub use minter::{ExternalMinter, FixedNetMinter};
pub use unified_balance::{DepositCall, RecordingUnifiedBalance, UnifiedBalanceRail};

/// The adapter bundle a settlement attempt dispatches into. Grouped so the
/// router takes one parameter instead of three, and so tests can inspect
/// the recording adapters afterwards.
#[derive(Debug)]
pub struct RailSet<D, U, B> {
    /// Recipient preference directory (read-only).
    pub directory: D,
    /// Pooled unified-balance deposit rail.
    pub unified: U,
    /// Cross-domain burn-and-mint rail.
    pub bridge: B,
}

impl<D, U, B> RailSet<D, U, B> {
    /// Bundle a directory and two rail adapters.
    pub fn new(directory: D, unified: U, bridge: B) -> Self {
        Self {
            directory,
            unified,
            bridge,
        }
    }
}
