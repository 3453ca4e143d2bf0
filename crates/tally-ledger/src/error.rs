use tally_types::OutPoint;

/// Errors produced by ledger state operations.
///
/// Routine settlement outcomes — an invalid transaction, a double-spend
/// conflict — are never errors; they surface as exclusion from the accepted
/// set or as a [`RejectReason`](crate::RejectReason).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("unknown outpoint {outpoint}")]
    UnknownOutpoint { outpoint: OutPoint },
}
