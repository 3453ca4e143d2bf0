use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::TypeError;
use crate::outpoint::OutPoint;
use crate::owner::OwnerId;
use crate::signature::SignatureBytes;
use crate::txid::TxId;

/// Domain tag for transaction identity hashing.
const TXID_DOMAIN: &[u8] = b"tally-tx-v1:";
/// Domain tag for per-input signing payloads.
const SIGNING_DOMAIN: &[u8] = b"tally-txsig-v1:";

/// A value assigned to an owning key, created by a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub value: Amount,
    pub owner: OwnerId,
}

impl Output {
    pub fn new(value: Amount, owner: OwnerId) -> Self {
        Self { value, owner }
    }
}

/// A claim on a previously created output, authorized by a signature.
///
/// The signature covers the claiming transaction's signing payload for this
/// input's position, binding the claim to that transaction's outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub outpoint: OutPoint,
    pub signature: SignatureBytes,
}

impl Input {
    pub fn new(outpoint: OutPoint, signature: SignatureBytes) -> Self {
        Self { outpoint, signature }
    }

    /// An input claiming `outpoint` with the unsigned placeholder signature.
    pub fn unsigned(outpoint: OutPoint) -> Self {
        Self::new(outpoint, SignatureBytes::zero())
    }
}

/// An ordered set of input claims and created outputs.
///
/// Input order matters: it selects each input's signing payload and
/// signature slot. Output order matters: position `i` becomes outpoint
/// `(id, i)` once the transaction is accepted.
///
/// The settlement core treats transactions as read-only values; they are
/// only inspected and hashed, never mutated after signing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
}

impl Transaction {
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        Self { inputs, outputs }
    }

    /// Build a transaction claiming `outpoints` with placeholder signatures.
    ///
    /// Sign each input afterwards via its [`Transaction::signing_payload`]
    /// and [`Transaction::attach_signature`].
    pub fn unsigned(outpoints: Vec<OutPoint>, outputs: Vec<Output>) -> Self {
        Self {
            inputs: outpoints.into_iter().map(Input::unsigned).collect(),
            outputs,
        }
    }

    /// Content-derived identity over the canonical encoding.
    ///
    /// Covers every field, signatures included, so two transactions with the
    /// same claims but different authorization hash differently.
    pub fn id(&self) -> TxId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(TXID_DOMAIN);
        hasher.update(&(self.inputs.len() as u32).to_le_bytes());
        for input in &self.inputs {
            hasher.update(input.outpoint.txid.as_bytes());
            hasher.update(&input.outpoint.index.to_le_bytes());
            hasher.update(input.signature.as_bytes());
        }
        hasher.update(&(self.outputs.len() as u32).to_le_bytes());
        for output in &self.outputs {
            hasher.update(&output.value.minor_units().to_le_bytes());
            hasher.update(output.owner.as_bytes());
        }
        TxId::from_hash(*hasher.finalize().as_bytes())
    }

    /// The canonical signing payload for the input at `index`.
    ///
    /// Deterministic over the input's claimed outpoint and every declared
    /// output. Signature fields are excluded, so the payload is stable
    /// before and after signing.
    pub fn signing_payload(&self, index: usize) -> Result<Vec<u8>, TypeError> {
        let input = self.inputs.get(index).ok_or(TypeError::IndexOutOfRange {
            index,
            len: self.inputs.len(),
        })?;

        let mut payload =
            Vec::with_capacity(SIGNING_DOMAIN.len() + 40 + self.outputs.len() * 40);
        payload.extend_from_slice(SIGNING_DOMAIN);
        payload.extend_from_slice(input.outpoint.txid.as_bytes());
        payload.extend_from_slice(&input.outpoint.index.to_le_bytes());
        payload.extend_from_slice(&(self.outputs.len() as u32).to_le_bytes());
        for output in &self.outputs {
            payload.extend_from_slice(&output.value.minor_units().to_le_bytes());
            payload.extend_from_slice(output.owner.as_bytes());
        }
        Ok(payload)
    }

    /// Attach `signature` to the input at `index`.
    pub fn attach_signature(
        &mut self,
        index: usize,
        signature: SignatureBytes,
    ) -> Result<(), TypeError> {
        let len = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(TypeError::IndexOutOfRange { index, len })?;
        input.signature = signature;
        Ok(())
    }

    /// The outpoint this transaction's output at `index` occupies once
    /// accepted.
    pub fn outpoint(&self, index: u32) -> OutPoint {
        OutPoint::new(self.id(), index)
    }
}
