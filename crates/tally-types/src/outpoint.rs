use std::fmt;

use serde::{Deserialize, Serialize};

use crate::txid::TxId;

/// Address of a single transaction output.
///
/// An `OutPoint` names the output at position `index` of the transaction
/// identified by `txid`. It is the key type of the unspent-output set: an
/// outpoint is present there exactly while the output it names has been
/// created and not yet consumed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: TxId,
    pub index: u32,
}

impl OutPoint {
    pub fn new(txid: TxId, index: u32) -> Self {
        Self { txid, index }
    }
}

impl fmt::Debug for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OutPoint({}:{})", self.txid.short_hex(), self.index)
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_requires_both_fields() {
        let a = OutPoint::new(TxId::from_hash([1; 32]), 0);
        let b = OutPoint::new(TxId::from_hash([1; 32]), 0);
        let other_index = OutPoint::new(TxId::from_hash([1; 32]), 1);
        let other_txid = OutPoint::new(TxId::from_hash([2; 32]), 0);
        assert_eq!(a, b);
        assert_ne!(a, other_index);
        assert_ne!(a, other_txid);
    }

    #[test]
    fn usable_as_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        let op = OutPoint::new(TxId::from_hash([3; 32]), 7);
        map.insert(op, "entry");
        assert_eq!(map.get(&OutPoint::new(TxId::from_hash([3; 32]), 7)), Some(&"entry"));
    }

    #[test]
    fn display_includes_index() {
        let op = OutPoint::new(TxId::from_hash([0; 32]), 42);
        let display = format!("{op}");
        assert!(display.ends_with(":42"));
    }

    #[test]
    fn serde_roundtrip() {
        let op = OutPoint::new(TxId::from_hash([9; 32]), 3);
        let json = serde_json::to_string(&op).unwrap();
        let parsed: OutPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(op, parsed);
    }
}
