use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hash::{ChainLink, ContentHash};
use crate::identity::TenantId;
use crate::temporal::LedgerTime;

/// Receipt type tags used by the demo session.
///
/// Informative only: the ledger accepts any string as a receipt type.
pub mod receipt_types {
    pub const DEMO_INIT: &str = "demo_init";
    pub const TERRESTRIAL_VERIFICATION: &str = "terrestrial_verification";
    pub const ORBITAL_VERIFICATION: &str = "orbital_verification";
    pub const MODE_SWITCH: &str = "mode_switch";
    pub const LOCATION_PROOF: &str = "location_proof";
    pub const ARTIFACT_GENERATION: &str = "artifact_generation";
    pub const ANCHOR: &str = "anchor";
    pub const DEMO_COMPLETE: &str = "demo_complete";
}

/// One immutable, hash-chained record of an event.
///
/// `payload_hash` covers `payload` alone. `prev_hash` is the payload hash of
/// the preceding receipt, which is what turns a list of receipts into a
/// chain. Receipts are built once by the ledger and never edited in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Open-ended event tag, e.g. `"mode_switch"` or `"anchor"`.
    pub receipt_type: String,
    /// When the ledger accepted this receipt.
    pub timestamp: LedgerTime,
    /// Tenant of the ledger that produced this receipt.
    pub tenant_id: TenantId,
    /// Caller-supplied payload, stored verbatim.
    pub payload: Map<String, Value>,
    /// Dual hash of `payload`.
    pub payload_hash: ContentHash,
    /// Link to the previous receipt's payload hash.
    pub prev_hash: ChainLink,
}

impl Receipt {
    /// Returns `true` if this receipt records a Merkle anchor.
    pub fn is_anchor(&self) -> bool {
        self.receipt_type == receipt_types::ANCHOR
    }

    /// Returns `true` if this receipt opens a chain.
    pub fn is_genesis(&self) -> bool {
        self.prev_hash.is_genesis()
    }

    /// Look up a top-level payload field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}
