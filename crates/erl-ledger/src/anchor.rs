use erl_crypto::{DualHasher, MerkleTree};
use erl_types::{ContentHash, LedgerTime, Receipt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A recorded Merkle checkpoint over a batch of receipts.
///
/// Each anchor is also appended to the chain as an `"anchor"` receipt whose
/// payload carries the same root, batch size, algorithms and time, so an
/// anchor can be re-derived from the chain alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleAnchor {
    /// Merkle root over the batch's payload hashes.
    pub root: ContentHash,
    /// Number of receipts folded into `root`.
    pub batch_size: usize,
    /// When the anchor was taken; equal to the anchor receipt's timestamp.
    pub timestamp: LedgerTime,
    /// Position of the anchor receipt in the ledger.
    pub receipt_index: usize,
    /// Digest algorithms behind `root`, in digest order.
    pub hash_algorithms: Vec<String>,
}

impl MerkleAnchor {
    /// Payload of the anchor receipt.
    pub(crate) fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("root".into(), Value::from(self.root.as_str()));
        payload.insert("batch_size".into(), Value::from(self.batch_size));
        payload.insert(
            "hash_algorithms".into(),
            Value::from(self.hash_algorithms.clone()),
        );
        payload.insert(
            "anchored_at".into(),
            json!({
                "physical_ms": self.timestamp.physical_ms,
                "logical": self.timestamp.logical,
            }),
        );
        payload
    }
}

/// Merkle root over the payload hashes of `receipts`, in order.
pub fn batch_root(hasher: &DualHasher, receipts: &[Receipt]) -> ContentHash {
    MerkleTree::root_of(
        hasher,
        receipts.iter().map(|r| r.payload_hash.clone()).collect(),
    )
}
