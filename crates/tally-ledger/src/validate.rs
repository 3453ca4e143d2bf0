use std::collections::HashSet;

use tally_crypto::verify_signature;
use tally_types::{Amount, OutPoint, Transaction};

use crate::set::UtxoSet;

/// Why a transaction failed validation.
///
/// The first failed check wins; later checks are not evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("input {input} references unknown output {outpoint}")]
    MissingOutput { input: usize, outpoint: OutPoint },

    #[error("output {outpoint} claimed by more than one input")]
    DuplicateClaim { outpoint: OutPoint },

    #[error("signature on input {input} does not verify")]
    BadSignature { input: usize },

    #[error("value arithmetic overflows")]
    ValueOverflow,

    #[error("outputs total {output_total} exceeds inputs total {input_total}")]
    OutputsExceedInputs {
        input_total: Amount,
        output_total: Amount,
    },
}

/// Validate `tx` against a point-in-time unspent-output set.
///
/// Checks, in order, short-circuiting on the first failure:
/// 1. every claimed outpoint is unspent in `utxos`;
/// 2. no outpoint is claimed by two inputs of `tx` (each claim consumes the
///    outpoint from a working set, so an outpoint satisfies at most one
///    input);
/// 3. each input's signature verifies under the claimed output's owner over
///    the transaction's signing payload for that input position;
/// 4. input and output value sums stay within range (output values cannot be
///    negative by construction of [`Amount`]);
/// 5. claimed value covers declared value — any surplus is an implicit fee,
///    permitted and not tracked here.
///
/// Pure predicate: never mutates `utxos`, repeated calls against the same
/// set return the same result.
pub fn check_transaction(utxos: &UtxoSet, tx: &Transaction) -> Result<(), RejectReason> {
    let mut claimed: HashSet<OutPoint> = HashSet::with_capacity(tx.inputs.len());
    let mut input_total = Amount::ZERO;

    for (index, input) in tx.inputs.iter().enumerate() {
        let source = utxos
            .get(&input.outpoint)
            .map_err(|_| RejectReason::MissingOutput {
                input: index,
                outpoint: input.outpoint,
            })?;

        if !claimed.insert(input.outpoint) {
            return Err(RejectReason::DuplicateClaim {
                outpoint: input.outpoint,
            });
        }

        match tx.signing_payload(index) {
            Ok(payload) if verify_signature(&source.owner, &payload, &input.signature) => {}
            _ => return Err(RejectReason::BadSignature { input: index }),
        }

        input_total = input_total
            .checked_add(source.value)
            .ok_or(RejectReason::ValueOverflow)?;
    }

    let output_total =
        Amount::sum(tx.outputs.iter().map(|o| o.value)).ok_or(RejectReason::ValueOverflow)?;

    if output_total > input_total {
        return Err(RejectReason::OutputsExceedInputs {
            input_total,
            output_total,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use tally_crypto::{sign_input, SigningKey};
    use tally_types::{Output, TxId};

    use super::*;

    fn key(seed: u8) -> SigningKey {
        SigningKey::from_bytes([seed; 32])
    }

    fn genesis_outpoint(seed: u8) -> OutPoint {
        OutPoint::new(TxId::from_hash([seed; 32]), 0)
    }

    fn seeded_set(entries: &[(OutPoint, u64, &SigningKey)]) -> UtxoSet {
        entries
            .iter()
            .map(|(op, value, key)| {
                (*op, Output::new(Amount::from_minor_units(*value), key.owner_id()))
            })
            .collect()
    }

    fn signed_tx(claims: &[(OutPoint, &SigningKey)], outputs: Vec<Output>) -> Transaction {
        let mut tx =
            Transaction::unsigned(claims.iter().map(|(op, _)| *op).collect(), outputs);
        for (index, (_, key)) in claims.iter().enumerate() {
            sign_input(&mut tx, index, key).unwrap();
        }
        tx
    }

    #[test]
    fn valid_transfer_passes() {
        let k1 = key(1);
        let k2 = key(2);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        let tx = signed_tx(
            &[(op, &k1)],
            vec![Output::new(Amount::from_minor_units(10), k2.owner_id())],
        );
        assert_eq!(check_transaction(&utxos, &tx), Ok(()));
    }

    #[test]
    fn missing_output_rejected_first() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = UtxoSet::new();

        let tx = signed_tx(&[(op, &k1)], vec![]);
        assert_eq!(
            check_transaction(&utxos, &tx),
            Err(RejectReason::MissingOutput {
                input: 0,
                outpoint: op
            })
        );
    }

    #[test]
    fn duplicate_claim_rejected() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        // Both claims correctly signed; the second still cannot be satisfied.
        let tx = signed_tx(&[(op, &k1), (op, &k1)], vec![]);
        assert_eq!(
            check_transaction(&utxos, &tx),
            Err(RejectReason::DuplicateClaim { outpoint: op })
        );
    }

    #[test]
    fn wrong_key_signature_rejected() {
        let k1 = key(1);
        let intruder = key(2);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        let tx = signed_tx(&[(op, &intruder)], vec![]);
        assert_eq!(
            check_transaction(&utxos, &tx),
            Err(RejectReason::BadSignature { input: 0 })
        );
    }

    #[test]
    fn unsigned_input_rejected() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        let tx = Transaction::unsigned(vec![op], vec![]);
        assert_eq!(
            check_transaction(&utxos, &tx),
            Err(RejectReason::BadSignature { input: 0 })
        );
    }

    #[test]
    fn signature_binds_declared_outputs() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        let mut tx = signed_tx(
            &[(op, &k1)],
            vec![Output::new(Amount::from_minor_units(10), k1.owner_id())],
        );
        // Redirect the value after signing; the old signature must not carry.
        tx.outputs[0].owner = key(2).owner_id();
        assert_eq!(
            check_transaction(&utxos, &tx),
            Err(RejectReason::BadSignature { input: 0 })
        );
    }

    #[test]
    fn outputs_exceeding_inputs_rejected() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        let tx = signed_tx(
            &[(op, &k1)],
            vec![Output::new(Amount::from_minor_units(11), k1.owner_id())],
        );
        assert_eq!(
            check_transaction(&utxos, &tx),
            Err(RejectReason::OutputsExceedInputs {
                input_total: Amount::from_minor_units(10),
                output_total: Amount::from_minor_units(11),
            })
        );
    }

    #[test]
    fn exact_conservation_passes() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        let tx = signed_tx(
            &[(op, &k1)],
            vec![Output::new(Amount::from_minor_units(10), k1.owner_id())],
        );
        assert_eq!(check_transaction(&utxos, &tx), Ok(()));
    }

    #[test]
    fn implicit_fee_passes() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);

        let tx = signed_tx(
            &[(op, &k1)],
            vec![Output::new(Amount::from_minor_units(7), k1.owner_id())],
        );
        assert_eq!(check_transaction(&utxos, &tx), Ok(()));
    }

    #[test]
    fn output_sum_overflow_rejected() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, u64::MAX, &k1)]);

        let tx = signed_tx(
            &[(op, &k1)],
            vec![
                Output::new(Amount::from_minor_units(u64::MAX), k1.owner_id()),
                Output::new(Amount::from_minor_units(1), k1.owner_id()),
            ],
        );
        assert_eq!(check_transaction(&utxos, &tx), Err(RejectReason::ValueOverflow));
    }

    #[test]
    fn validation_never_mutates_the_set() {
        let k1 = key(1);
        let op = genesis_outpoint(1);
        let utxos = seeded_set(&[(op, 10, &k1)]);
        let before = utxos.clone();

        let tx = signed_tx(
            &[(op, &k1)],
            vec![Output::new(Amount::from_minor_units(10), k1.owner_id())],
        );
        for _ in 0..3 {
            assert_eq!(check_transaction(&utxos, &tx), Ok(()));
        }
        assert_eq!(utxos, before);
    }
}
