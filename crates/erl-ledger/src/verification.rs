use erl_crypto::{ChainVerifier, ChainViolation, DualHasher, VerifyMode};
use erl_types::{ContentHash, Receipt};
use serde::{Deserialize, Serialize};

use crate::anchor::batch_root;

/// Outcome of a chain verification pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub mode: VerifyMode,
    pub total_receipts: usize,
    /// Current Merkle root over all receipts. Only set when `valid`.
    pub merkle_root: Option<ContentHash>,
    /// First violation found. Only set when not `valid`.
    pub violation: Option<ChainViolation>,
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Verify a sequence of receipts, live or imported.
pub fn verify_receipts(
    hasher: &DualHasher,
    receipts: &[Receipt],
    mode: VerifyMode,
) -> VerificationResult {
    match ChainVerifier::verify(hasher, receipts, mode) {
        Ok(total_receipts) => VerificationResult {
            valid: true,
            mode,
            total_receipts,
            merkle_root: Some(batch_root(hasher, receipts)),
            violation: None,
        },
        Err(violation) => VerificationResult {
            valid: false,
            mode,
            total_receipts: receipts.len(),
            merkle_root: None,
            violation: Some(violation),
        },
    }
}
