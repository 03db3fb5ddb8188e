//! # opensettle-types
//!
//! Shared types, errors, and configuration for the **OpenSettle**
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`RecipientId`], [`AuthNonce`], [`SettlementId`]
//! - **Authorization model**: [`TransferAuthorization`]
//! - **Routing model**: [`RouteKind`], [`RecipientPreference`]
//! - **Record model**: [`SettlementRecord`], [`SettlementOutcome`], [`EngineEvent`]
//! - **Reputation model**: [`ReputationEntry`]
//! - **Configuration**: [`EngineConfig`], [`ZeroMintPolicy`]
//! - **Errors**: [`OpensettleError`] with `OS_ERR_` prefix codes
//! - **Constants**: reputation bounds, bridge domains, defaults

pub mod authorization;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod preference;
pub mod record;
pub mod reputation;

// Re-export all primary types at crate root for ergonomic imports:
//   use opensettle_types::{AccountId, TransferAuthorization, RouteKind, ...};

pub use authorization::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use preference::*;
pub use record::*;
pub use reputation::*;

// Constants are accessed via `opensettle_types::constants::FOO`
// (not re-exported to avoid name collisions).
