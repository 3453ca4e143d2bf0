use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tally_types::{OutPoint, Transaction, TxId};
use tracing::{debug, trace};

use crate::set::UtxoSet;
use crate::validate::{check_transaction, RejectReason};

/// Resolves epochs of proposed transactions against an exclusively owned
/// unspent-output set.
///
/// Construction deep-copies the caller's snapshot; the caller's set is never
/// aliased or mutated. Accepting a transaction is the only state mutation:
/// its claimed outpoints are removed and its created outputs inserted, all
/// or nothing. Validation alone never changes state.
pub struct SettlementEngine {
    utxos: UtxoSet,
}

/// Full classification of one settled epoch.
///
/// Every proposed transaction lands in exactly one bucket. `conflicted`
/// holds the claimants dropped by double-spend exclusion before any
/// validation ran; `rejected` holds the leftovers with the reason from
/// their final validation attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochReport {
    pub accepted: Vec<Transaction>,
    pub conflicted: Vec<TxId>,
    pub rejected: Vec<(TxId, RejectReason)>,
}

impl SettlementEngine {
    /// Create an engine over a copy of `snapshot`.
    pub fn new(snapshot: &UtxoSet) -> Self {
        Self {
            utxos: snapshot.clone(),
        }
    }

    /// Read-only view of the current unspent-output set.
    pub fn utxos(&self) -> &UtxoSet {
        &self.utxos
    }

    /// Point-in-time copy of the current unspent-output set.
    pub fn snapshot(&self) -> UtxoSet {
        self.utxos.clone()
    }

    /// Consume the engine, yielding its final state.
    pub fn into_utxos(self) -> UtxoSet {
        self.utxos
    }

    /// Validate `tx` against the current state, reporting the failed check.
    pub fn check(&self, tx: &Transaction) -> Result<(), RejectReason> {
        check_transaction(&self.utxos, tx)
    }

    /// Whether `tx` is valid against the current state. Pure; idempotent.
    pub fn is_valid(&self, tx: &Transaction) -> bool {
        self.check(tx).is_ok()
    }

    /// Settle one epoch, returning the accepted transactions in acceptance
    /// order.
    ///
    /// See [`SettlementEngine::settle_epoch_report`] for the full
    /// classification of the remaining candidates.
    pub fn settle_epoch(&mut self, proposed: &[Transaction]) -> Vec<Transaction> {
        self.settle_epoch_report(proposed).accepted
    }

    /// Settle one epoch and classify every candidate.
    ///
    /// Two phases:
    /// 1. Double-spend exclusion: every transaction claiming an outpoint
    ///    that another candidate also claims is dropped for the whole epoch,
    ///    regardless of which claim would have validated. Exclusion is
    ///    symmetric, so the surviving candidate set does not depend on scan
    ///    order.
    /// 2. Fixed-point acceptance: scan the survivors, accepting and applying
    ///    each transaction that validates against the current state, until a
    ///    full scan accepts nothing. An acceptance only ever adds outpoints
    ///    other candidates may claim, so the reachable accepted set is
    ///    maximal and unique; only its order varies with input order.
    pub fn settle_epoch_report(&mut self, proposed: &[Transaction]) -> EpochReport {
        let conflicted_indices = conflicting_claimants(proposed);
        let conflicted: Vec<TxId> = proposed
            .iter()
            .enumerate()
            .filter(|(index, _)| conflicted_indices.contains(index))
            .map(|(_, tx)| tx.id())
            .collect();

        let mut active: Vec<usize> = (0..proposed.len())
            .filter(|index| !conflicted_indices.contains(index))
            .collect();
        let mut accepted: Vec<Transaction> = Vec::new();
        let rejected: Vec<(TxId, RejectReason)>;
        let mut rounds = 0u32;

        loop {
            rounds += 1;
            let mut progressed = false;
            let mut remaining: Vec<(usize, RejectReason)> = Vec::with_capacity(active.len());

            for index in active {
                let tx = &proposed[index];
                match check_transaction(&self.utxos, tx) {
                    Ok(()) => {
                        self.apply(tx);
                        debug!(txid = %tx.id().short_hex(), round = rounds, "transaction accepted");
                        accepted.push(tx.clone());
                        progressed = true;
                    }
                    Err(reason) => remaining.push((index, reason)),
                }
            }

            if !progressed || remaining.is_empty() {
                rejected = remaining
                    .into_iter()
                    .map(|(index, reason)| (proposed[index].id(), reason))
                    .collect();
                break;
            }
            active = remaining.into_iter().map(|(index, _)| index).collect();
        }

        trace!(
            rounds,
            accepted = accepted.len(),
            conflicted = conflicted.len(),
            rejected = rejected.len(),
            "epoch settled"
        );

        EpochReport {
            accepted,
            conflicted,
            rejected,
        }
    }

    /// Apply an accepted transaction: consume its claims, record its
    /// outputs at `(id, position)`.
    fn apply(&mut self, tx: &Transaction) {
        for input in &tx.inputs {
            let consumed = self.utxos.remove(&input.outpoint);
            debug_assert!(
                consumed.is_some(),
                "accepted transaction claimed a missing outpoint"
            );
        }
        let txid = tx.id();
        for (index, output) in tx.outputs.iter().enumerate() {
            self.utxos.insert(OutPoint::new(txid, index as u32), *output);
        }
    }
}

/// Indices of every transaction claiming an outpoint that some other
/// transaction in the batch also claims.
///
/// Conflict is decided at the outpoint level, before validation, and covers
/// outpoints that do not exist yet (two claims on an output a third
/// candidate would create still conflict). An outpoint claimed twice within
/// one transaction is a validity matter, not a cross-transaction conflict.
fn conflicting_claimants(proposed: &[Transaction]) -> HashSet<usize> {
    let mut first_claim: HashMap<OutPoint, usize> = HashMap::new();
    let mut conflicted: HashSet<usize> = HashSet::new();

    for (index, tx) in proposed.iter().enumerate() {
        let mut seen_in_tx: HashSet<OutPoint> = HashSet::new();
        for input in &tx.inputs {
            if !seen_in_tx.insert(input.outpoint) {
                continue;
            }
            match first_claim.entry(input.outpoint) {
                Entry::Occupied(first) => {
                    debug!(
                        outpoint = %input.outpoint,
                        first = *first.get(),
                        second = index,
                        "conflicting claims, excluding all claimants"
                    );
                    conflicted.insert(*first.get());
                    conflicted.insert(index);
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }
    }

    conflicted
}
