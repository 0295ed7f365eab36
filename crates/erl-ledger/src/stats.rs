use std::collections::BTreeMap;

use erl_crypto::{DualHasher, VerifyMode};
use erl_types::{ContentHash, LedgerTime, Receipt};
use serde::{Deserialize, Serialize};

use crate::anchor::batch_root;
use crate::verification::verify_receipts;

/// Summary of a ledger's current contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    pub total_receipts: usize,
    /// Receipt count per receipt type, whatever the type string is.
    pub by_type: BTreeMap<String, usize>,
    pub last_receipt_timestamp: Option<LedgerTime>,
    pub merkle_root: ContentHash,
    /// Result of a full (link + payload) verification.
    pub chain_valid: bool,
    /// Number of `"anchor"` receipts.
    pub anchor_count: usize,
}

impl LedgerStats {
    pub fn from_receipts(hasher: &DualHasher, receipts: &[Receipt]) -> Self {
        let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
        for receipt in receipts {
            *by_type.entry(receipt.receipt_type.clone()).or_default() += 1;
        }

        let verification = verify_receipts(hasher, receipts, VerifyMode::Full);
        let merkle_root = verification
            .merkle_root
            .unwrap_or_else(|| batch_root(hasher, receipts));

        Self {
            total_receipts: receipts.len(),
            anchor_count: receipts.iter().filter(|r| r.is_anchor()).count(),
            by_type,
            last_receipt_timestamp: receipts.last().map(|r| r.timestamp),
            merkle_root,
            chain_valid: verification.valid,
        }
    }

    /// Count for one receipt type, 0 if never seen.
    pub fn count(&self, receipt_type: &str) -> usize {
        self.by_type.get(receipt_type).copied().unwrap_or(0)
    }
}
