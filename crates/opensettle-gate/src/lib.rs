//! # opensettle-gate
//!
//! **Trust gate**: authorization validation, one-shot nonce consumption,
//! and custody-side fund acquisition.
//!
//! ## Architecture
//!
//! The gate sits between permissionless submitters and the router:
//! 1. **NonceRegistry**: permanent used-nonce set, the replay defense
//! 2. **AuthorizationValidator**: window, signature, executor, and nonce
//!    checks, in that order, with atomic check-and-mark consumption
//! 3. **CustodyLedger**: pulls authorized funds into the engine pool and
//!    holds internally settled credits
//!
//! Every settlement path acquires funds **through** this crate; the router
//! never touches payer balances directly.

pub mod custody;
pub mod nonce_registry;
pub mod validator;

pub use custody::CustodyLedger;
pub use nonce_registry::NonceRegistry;
pub use validator::{AuthorizationValidator, ValidatedPull};
