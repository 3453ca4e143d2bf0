//! Foundation types for the Tally settlement ledger.
//!
//! This crate provides the data model shared by every other Tally crate:
//! transactions, the outputs they create, and the identifiers used to
//! address unspent outputs.
//!
//! # Key Types
//!
//! - [`TxId`] — Content-derived transaction identity (BLAKE3 hash)
//! - [`OutPoint`] — Address of a single transaction output (identity + index)
//! - [`OwnerId`] — Opaque owning-key identity carried by an output
//! - [`Amount`] — Exact minor-unit monetary quantity with checked arithmetic
//! - [`Transaction`] — Ordered inputs and outputs, with canonical signing
//!   payload derivation per input position

pub mod amount;
pub mod error;
pub mod outpoint;
pub mod owner;
pub mod signature;
pub mod transaction;
pub mod txid;

pub use amount::Amount;
pub use error::TypeError;
pub use outpoint::OutPoint;
pub use owner::OwnerId;
pub use signature::SignatureBytes;
pub use transaction::{Input, Output, Transaction};
pub use txid::TxId;
