//! # opensettle-engine
//!
//! The decision core of OpenSettle: settlement orchestration,
//! balance-diff mint reconciliation, and reputation accounting.
//!
//! ## Architecture
//!
//! Both entry modes converge on the [`SettlementRouter`]:
//!
//! ```text
//! settle_direct            ──▶ validate ──▶ pull ──┐
//!                                                  ├─▶ resolve preference
//! settle_from_external_mint ──▶ reconcile mint ────┘        │
//!                                                  dispatch one rail
//!                                                           │
//!                                       reputation update + record + event
//! ```
//!
//! One settlement attempt is one exclusive borrow of the router; the
//! substrate serializes attempts, and the engine holds no internal
//! concurrency.

pub mod accountant;
pub mod reputation;
pub mod router;

pub use accountant::ExternalMintAccountant;
pub use reputation::ReputationLedger;
pub use router::SettlementRouter;
