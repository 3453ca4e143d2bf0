//! Settlement core for the Tally ledger.
//!
//! This crate decides which proposed transactions a ledger accepts. It
//! provides:
//! - [`UtxoSet`] — the unspent-output mapping that is the sole ledger state
//! - [`check_transaction`] / [`RejectReason`] — single-transaction validation
//!   against a point-in-time set
//! - [`SettlementEngine`] — epoch resolution: double-spend exclusion,
//!   dependency-aware fixed-point acceptance, and atomic state updates
//!
//! One epoch is resolved to completion before the next begins; the engine
//! exclusively owns its state and exposes only snapshot copies outward.

pub mod error;
pub mod set;
pub mod settlement;
pub mod validate;

pub use error::LedgerError;
pub use set::UtxoSet;
pub use settlement::{EpochReport, SettlementEngine};
pub use validate::{check_transaction, RejectReason};
