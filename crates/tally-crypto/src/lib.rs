//! Cryptographic primitives for the Tally settlement ledger.
//!
//! This crate wraps ed25519 key material and exposes the signature
//! primitives the settlement core consumes:
//!
//! - [`SigningKey`] / [`VerifyingKey`] — key generation and ownership
//! - [`verify_signature`] — pure verification against an opaque [`OwnerId`]
//! - [`sign_input`] — derive an input's signing payload, sign it, and attach
//!   the signature to the transaction
//!
//! [`OwnerId`]: tally_types::OwnerId

pub mod signer;

pub use signer::{sign_input, verify_signature, SignatureError, SigningKey, VerifyingKey};
