use erl_types::Receipt;
use tracing::{debug, info, warn};

use crate::anchor::MerkleAnchor;
use crate::verification::VerificationResult;

/// Something that happened to a ledger.
#[derive(Clone, Copy, Debug)]
pub enum LedgerEvent<'a> {
    /// A receipt was appended (anchor receipts included).
    Appended(&'a Receipt),
    /// An anchor was recorded, right after its receipt was appended.
    Anchored(&'a MerkleAnchor),
    /// A verification pass finished.
    Verified(&'a VerificationResult),
    /// The ledger was cleared.
    Reset { cleared: usize },
}

/// Side-channel subscriber to ledger events.
///
/// Observers are called after the ledger has released its lock, so they may
/// query the ledger. They cannot influence the operation that fired them.
pub trait LedgerObserver: Send + Sync {
    fn on_event(&self, event: &LedgerEvent<'_>);
}

/// Writes ledger events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl LedgerObserver for TracingObserver {
    fn on_event(&self, event: &LedgerEvent<'_>) {
        match event {
            LedgerEvent::Appended(receipt) => debug!(
                receipt_type = %receipt.receipt_type,
                payload_hash = receipt.payload_hash.short(),
                timestamp = %receipt.timestamp,
                genesis = receipt.is_genesis(),
                "receipt appended"
            ),
            LedgerEvent::Anchored(anchor) => info!(
                root = anchor.root.short(),
                batch_size = anchor.batch_size,
                receipt_index = anchor.receipt_index,
                "merkle anchor recorded"
            ),
            LedgerEvent::Verified(result) => match &result.violation {
                Some(violation) => warn!(
                    index = violation.index(),
                    total = result.total_receipts,
                    "{violation}"
                ),
                None => info!(total = result.total_receipts, "receipt chain verified"),
            },
            LedgerEvent::Reset { cleared } => info!(cleared, "ledger reset"),
        }
    }
}
