use std::fmt;
use std::io::Write;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use erl_crypto::canonical::into_mapping;
use erl_crypto::{DualHasher, MerkleProof, MerkleTree, VerifyMode};
use erl_types::{receipt_types, ChainLink, ContentHash, LedgerTime, Receipt, TenantId};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::anchor::{batch_root, MerkleAnchor};
use crate::clock::{Clock, SystemClock};
use crate::config::LedgerConfig;
use crate::error::{ConfigError, ExportError, LedgerError};
use crate::export::{to_json_lines, write_json_lines};
use crate::observer::{LedgerEvent, LedgerObserver, TracingObserver};
use crate::stats::LedgerStats;
use crate::verification::{verify_receipts, VerificationResult};

/// Whether a ledger holds any receipts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerPhase {
    Empty,
    Populated,
}

/// Append-only, hash-chained receipt ledger for one session.
///
/// Each ledger is an owned value; share it by reference or `Arc`. Mutations
/// (`append`, `anchor*`, `reset`) take the write lock; everything else takes
/// the read lock. A receipt is fully built (hashed, linked, stamped) before
/// it becomes visible.
pub struct ReceiptLedger {
    tenant_id: TenantId,
    hasher: DualHasher,
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn LedgerObserver>>,
    inner: RwLock<LedgerState>,
}

#[derive(Default)]
struct LedgerState {
    receipts: Vec<Receipt>,
    anchors: Vec<MerkleAnchor>,
    last_time: Option<LedgerTime>,
}

impl ReceiptLedger {
    /// Build a ledger from configuration.
    pub fn new(config: &LedgerConfig) -> Result<Self, ConfigError> {
        let mut builder = Self::builder()
            .tenant(config.tenant()?)
            .hasher(config.hash.build_hasher()?);
        if config.log_events {
            builder = builder.observer(Arc::new(TracingObserver));
        }
        Ok(builder.build())
    }

    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn hasher(&self) -> &DualHasher {
        &self.hasher
    }

    // ---- Writes ----

    /// Append a receipt and return it.
    ///
    /// `payload` must be a JSON object. It is hashed before the lock is
    /// taken, so an encoding failure leaves the ledger untouched.
    pub fn append(
        &self,
        receipt_type: impl Into<String>,
        payload: Value,
    ) -> Result<Receipt, LedgerError> {
        let payload = into_mapping(payload)?;
        let payload_hash = self.hasher.hash_map(&payload)?;

        let receipt = {
            let mut state = self.write();
            let timestamp = self.next_time(&state);
            self.push(&mut state, receipt_type.into(), payload, payload_hash, timestamp)
        };

        self.notify(&LedgerEvent::Appended(&receipt));
        Ok(receipt)
    }

    /// Append any serializable value as the payload.
    pub fn append_serialize<T: Serialize + ?Sized>(
        &self,
        receipt_type: impl Into<String>,
        payload: &T,
    ) -> Result<Receipt, LedgerError> {
        let value = serde_json::to_value(payload)
            .map_err(|e| erl_crypto::EncodingError::Unsupported(e.to_string()))?;
        self.append(receipt_type, value)
    }

    /// Anchor every receipt currently in the ledger.
    ///
    /// A failure leaves the ledger, its clock and its anchors untouched.
    pub fn anchor(&self) -> Result<Receipt, LedgerError> {
        self.record_anchor(|receipts| batch_root(&self.hasher, receipts), |r| r.len())
    }

    /// Anchor an explicit batch of receipts.
    pub fn anchor_batch(&self, batch: &[Receipt]) -> Result<Receipt, LedgerError> {
        let root = batch_root(&self.hasher, batch);
        self.record_anchor(|_| root.clone(), |_| batch.len())
    }

    /// Anchor the receipts appended since the previous anchor receipt.
    pub fn anchor_pending(&self) -> Result<Receipt, LedgerError> {
        self.record_anchor(
            |receipts| batch_root(&self.hasher, pending(receipts)),
            |receipts| pending(receipts).len(),
        )
    }

    /// Clear all receipts and anchors, starting a new session.
    pub fn reset(&self) {
        let cleared = {
            let mut state = self.write();
            let cleared = state.receipts.len();
            *state = LedgerState::default();
            cleared
        };
        self.notify(&LedgerEvent::Reset { cleared });
    }

    // ---- Reads ----

    /// Full verification: chain links and payload hashes.
    pub fn verify(&self) -> VerificationResult {
        self.verify_with(VerifyMode::Full)
    }

    /// Chain links only.
    pub fn verify_links(&self) -> VerificationResult {
        self.verify_with(VerifyMode::Links)
    }

    pub fn verify_with(&self, mode: VerifyMode) -> VerificationResult {
        let result = verify_receipts(&self.hasher, &self.read().receipts, mode);
        self.notify(&LedgerEvent::Verified(&result));
        result
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats::from_receipts(&self.hasher, &self.read().receipts)
    }

    /// Merkle root over the whole ledger.
    pub fn merkle_root(&self) -> ContentHash {
        batch_root(&self.hasher, &self.read().receipts)
    }

    /// Merkle root over an explicit batch. Does not touch ledger state.
    pub fn merkle_root_of(&self, batch: &[Receipt]) -> ContentHash {
        batch_root(&self.hasher, batch)
    }

    /// Inclusion proof for receipt `index` against the current ledger root.
    pub fn prove_inclusion(&self, index: usize) -> Option<MerkleProof> {
        let leaves = self
            .read()
            .receipts
            .iter()
            .map(|r| r.payload_hash.clone())
            .collect();
        MerkleTree::from_leaves(&self.hasher, leaves).proof(index)
    }

    /// One JSON document per receipt, in append order.
    pub fn export_ledger(&self) -> Result<Vec<String>, ExportError> {
        to_json_lines(&self.read().receipts)
    }

    /// Write the export as newline-terminated lines.
    pub fn export_to<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        write_json_lines(&self.read().receipts, writer)
    }

    pub fn receipts(&self) -> Vec<Receipt> {
        self.read().receipts.clone()
    }

    pub fn receipt(&self, index: usize) -> Option<Receipt> {
        self.read().receipts.get(index).cloned()
    }

    pub fn last(&self) -> Option<Receipt> {
        self.read().receipts.last().cloned()
    }

    /// Anchors recorded through this ledger, oldest first.
    pub fn anchors(&self) -> Vec<MerkleAnchor> {
        self.read().anchors.clone()
    }

    pub fn len(&self) -> usize {
        self.read().receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().receipts.is_empty()
    }

    pub fn phase(&self) -> LedgerPhase {
        if self.is_empty() {
            LedgerPhase::Empty
        } else {
            LedgerPhase::Populated
        }
    }

    // ---- Internals ----

    fn record_anchor(
        &self,
        root_of: impl FnOnce(&[Receipt]) -> ContentHash,
        size_of: impl FnOnce(&[Receipt]) -> usize,
    ) -> Result<Receipt, LedgerError> {
        let (receipt, anchor) = {
            let mut state = self.write();
            let timestamp = self.next_time(&state);
            let anchor = MerkleAnchor {
                root: root_of(&state.receipts),
                batch_size: size_of(&state.receipts),
                timestamp,
                receipt_index: state.receipts.len(),
                hash_algorithms: self.hasher.algorithms().map(String::from).to_vec(),
            };
            let payload = anchor.payload();
            let payload_hash = self.hasher.hash_map(&payload)?;
            let receipt = self.push(
                &mut state,
                receipt_types::ANCHOR.to_string(),
                payload,
                payload_hash,
                timestamp,
            );
            state.anchors.push(anchor.clone());
            (receipt, anchor)
        };

        self.notify(&LedgerEvent::Appended(&receipt));
        self.notify(&LedgerEvent::Anchored(&anchor));
        Ok(receipt)
    }

    // Committed by `push`, so a failed write does not advance the clock.
    fn next_time(&self, state: &LedgerState) -> LedgerTime {
        LedgerTime::tick(state.last_time, self.clock.now_ms())
    }

    fn push(
        &self,
        state: &mut LedgerState,
        receipt_type: String,
        payload: Map<String, Value>,
        payload_hash: ContentHash,
        timestamp: LedgerTime,
    ) -> Receipt {
        let receipt = Receipt {
            receipt_type,
            timestamp,
            tenant_id: self.tenant_id.clone(),
            payload,
            payload_hash,
            prev_hash: ChainLink::after(state.receipts.last().map(|r| &r.payload_hash)),
        };
        state.last_time = Some(timestamp);
        state.receipts.push(receipt.clone());
        receipt
    }

    fn notify(&self, event: &LedgerEvent<'_>) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    // State is never left half-mutated, so a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ReceiptLedger {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for ReceiptLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptLedger")
            .field("tenant_id", &self.tenant_id)
            .field("hasher", &self.hasher)
            .field("receipts", &self.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Receipts after the most recent anchor receipt.
fn pending(receipts: &[Receipt]) -> &[Receipt] {
    let start = receipts
        .iter()
        .rposition(Receipt::is_anchor)
        .map_or(0, |i| i + 1);
    &receipts[start..]
}

/// Builder for a [`ReceiptLedger`] with injected collaborators.
pub struct LedgerBuilder {
    tenant_id: TenantId,
    hasher: DualHasher,
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn LedgerObserver>>,
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self {
            tenant_id: TenantId::default(),
            hasher: DualHasher::default(),
            clock: Arc::new(SystemClock),
            observers: Vec::new(),
        }
    }
}

impl LedgerBuilder {
    pub fn tenant(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    pub fn hasher(mut self, hasher: DualHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn LedgerObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn build(self) -> ReceiptLedger {
        ReceiptLedger {
            tenant_id: self.tenant_id,
            hasher: self.hasher,
            clock: self.clock,
            observers: self.observers,
            inner: RwLock::new(LedgerState::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use erl_crypto::{AlgorithmId, ChainViolation, EncodingError};
    use serde_json::json;

    use super::*;
    use crate::clock::ManualClock;

    fn ledger() -> ReceiptLedger {
        ReceiptLedger::builder()
            .clock(Arc::new(ManualClock::new(1_700_000_000_000)))
            .build()
    }

    fn populated(n: usize) -> ReceiptLedger {
        let ledger = ledger();
        for i in 0..n {
            ledger
                .append("component_verification", json!({ "component": i, "passed": true }))
                .unwrap();
        }
        ledger
    }

    /// Records event names.
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl LedgerObserver for Recorder {
        fn on_event(&self, event: &LedgerEvent<'_>) {
            let name = match event {
                LedgerEvent::Appended(r) => format!("appended:{}", r.receipt_type),
                LedgerEvent::Anchored(a) => format!("anchored:{}", a.batch_size),
                LedgerEvent::Verified(v) => format!("verified:{}", v.valid),
                LedgerEvent::Reset { cleared } => format!("reset:{cleared}"),
            };
            self.events.lock().unwrap().push(name);
        }
    }

    #[test]
    fn first_receipt_links_to_genesis() {
        let ledger = ledger();
        assert_eq!(ledger.phase(), LedgerPhase::Empty);
        let r = ledger.append("demo_init", json!({"session": 1})).unwrap();
        assert_eq!(r.prev_hash, ChainLink::Genesis);
        assert_eq!(r.prev_hash.as_str(), "GENESIS");
        assert_eq!(ledger.phase(), LedgerPhase::Populated);
    }

    #[test]
    fn append_links_to_previous_payload_hash() {
        let ledger = ledger();
        let a = ledger.append("a", json!({"n": 1})).unwrap();
        let b = ledger.append("b", json!({"n": 2})).unwrap();
        assert_eq!(b.prev_hash.hash(), Some(&a.payload_hash));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn payload_hash_covers_payload_only() {
        let ledger = ledger();
        let payload = json!({"component": "gyro", "score": 0.97});
        let r = ledger.append("terrestrial_verification", payload.clone()).unwrap();
        assert_eq!(r.payload_hash, ledger.hasher().hash_value(&payload).unwrap());
        assert_eq!(r.tenant_id, TenantId::default());
    }

    #[test]
    fn timestamps_strictly_increase_on_frozen_clock() {
        let ledger = populated(5);
        let receipts = ledger.receipts();
        for pair in receipts.windows(2) {
            assert!(pair[1].timestamp.is_after(&pair[0].timestamp));
        }
        assert_eq!(receipts[4].timestamp.logical, 4);
    }

    #[test]
    fn non_mapping_payload_is_rejected_without_mutation() {
        let ledger = populated(2);
        let err = ledger.append("bad", json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, LedgerError::Encoding(EncodingError::NotAMapping("array")));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn append_serialize_accepts_structs() {
        #[derive(Serialize)]
        struct Score {
            component: &'static str,
            entropy: u32,
        }
        let ledger = ledger();
        let r = ledger
            .append_serialize("component_verification", &Score { component: "imu", entropy: 7 })
            .unwrap();
        assert_eq!(r.payload["entropy"], 7);
    }

    #[test]
    fn empty_ledger_verifies() {
        let result = ledger().verify();
        assert!(result.valid);
        assert_eq!(result.total_receipts, 0);
        assert_eq!(result.merkle_root, Some(DualHasher::default().empty_root()));
    }

    #[test]
    fn populated_ledger_verifies_with_root() {
        let ledger = populated(7);
        let result = ledger.verify();
        assert!(result.valid);
        assert_eq!(result.total_receipts, 7);
        assert_eq!(result.merkle_root, Some(ledger.merkle_root()));
        assert!(result.violation.is_none());
    }

    #[test]
    fn tampered_payload_hash_detected() {
        let ledger = populated(4);
        let forged = ledger.hasher().hash_value(&json!("forged")).unwrap();
        ledger.write().receipts[2].payload_hash = forged;

        let result = ledger.verify();
        assert!(!result.valid);
        assert!(result.merkle_root.is_none());
        // Link check runs first: receipt 2 still links correctly, but its
        // stored hash no longer matches its payload.
        assert!(matches!(
            result.violation,
            Some(ChainViolation::PayloadMismatch { index: 2, .. })
        ));

        // Links-only mode sees the break at the successor.
        let links = ledger.verify_links();
        assert!(matches!(
            links.violation,
            Some(ChainViolation::BrokenLink { index: 3, .. })
        ));
    }

    #[test]
    fn tampered_prev_hash_detected() {
        let ledger = populated(5);
        let expected = ledger.receipt(2).unwrap().payload_hash;
        let forged = ledger.hasher().hash_value(&json!("forged")).unwrap();
        ledger.write().receipts[3].prev_hash = ChainLink::Receipt(forged.clone());

        let result = ledger.verify();
        assert_eq!(
            result.violation,
            Some(ChainViolation::BrokenLink {
                index: 3,
                expected,
                found: ChainLink::Receipt(forged),
            })
        );
    }

    #[test]
    fn tampered_genesis_link_detected() {
        let ledger = populated(2);
        let forged = ledger.hasher().hash_value(&json!("forged")).unwrap();
        ledger.write().receipts[0].prev_hash = ChainLink::Receipt(forged);
        let result = ledger.verify_links();
        assert!(matches!(
            result.violation,
            Some(ChainViolation::GenesisMismatch { .. })
        ));
    }

    #[test]
    fn tampered_payload_content_needs_full_mode() {
        let ledger = populated(3);
        ledger.write().receipts[1]
            .payload
            .insert("passed".into(), json!(false));

        assert!(ledger.verify_links().valid);
        let result = ledger.verify();
        assert!(matches!(
            result.violation,
            Some(ChainViolation::PayloadMismatch { index: 1, .. })
        ));
    }

    #[test]
    fn ledger_stays_queryable_after_violation() {
        let ledger = populated(3);
        ledger.write().receipts.remove(1);
        assert!(!ledger.verify().valid);

        let stats = ledger.stats();
        assert_eq!(stats.total_receipts, 2);
        assert!(!stats.chain_valid);
        assert_eq!(ledger.export_ledger().unwrap().len(), 2);
    }

    #[test]
    fn merkle_root_of_single_receipt() {
        let ledger = populated(1);
        let leaf = ledger.receipt(0).unwrap().payload_hash;
        assert_eq!(ledger.merkle_root(), ledger.hasher().hash_chain(&leaf, &leaf));
    }

    #[test]
    fn merkle_root_of_batch_is_read_only() {
        let ledger = populated(4);
        let receipts = ledger.receipts();
        let batch = &receipts[1..3];
        let first = ledger.merkle_root_of(batch);
        assert_eq!(first, ledger.merkle_root_of(batch));
        assert_eq!(ledger.len(), 4);
        assert_ne!(first, ledger.merkle_root());
    }

    #[test]
    fn anchor_records_root_and_history() {
        let ledger = populated(3);
        let root_before = ledger.merkle_root();
        let receipt = ledger.anchor().unwrap();

        assert!(receipt.is_anchor());
        assert_eq!(receipt.payload["root"], root_before.as_str());
        assert_eq!(receipt.payload["batch_size"], 3);
        assert_eq!(receipt.payload["hash_algorithms"], json!(["sha256", "blake3"]));

        let anchors = ledger.anchors();
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].root, root_before);
        assert_eq!(anchors[0].receipt_index, 3);
        assert_eq!(anchors[0].timestamp, receipt.timestamp);
        assert!(ledger.verify().valid);
    }

    #[test]
    fn anchoring_twice_gives_distinct_receipts_with_equal_roots() {
        let ledger = populated(2);
        let originals = ledger.receipts();
        let first = ledger.anchor_batch(&originals).unwrap();
        let second = ledger.anchor_batch(&originals).unwrap();

        assert_eq!(first.payload["root"], second.payload["root"]);
        assert_ne!(first.payload_hash, second.payload_hash);
        assert_ne!(first.timestamp, second.timestamp);
        assert_eq!(second.prev_hash.hash(), Some(&first.payload_hash));
    }

    #[test]
    fn back_to_back_anchors_on_unchanged_ledger_differ() {
        let ledger = populated(2);
        let first = ledger.anchor().unwrap();
        let second = ledger.anchor().unwrap();
        // The second anchor folds the first anchor receipt in.
        assert_eq!(first.payload["batch_size"], 2);
        assert_eq!(second.payload["batch_size"], 3);
        assert_ne!(first.payload_hash, second.payload_hash);
    }

    #[test]
    fn anchor_pending_covers_only_new_receipts() {
        let ledger = populated(3);
        ledger.anchor_pending().unwrap();
        ledger.append("mode_switch", json!({"to": "orbital"})).unwrap();
        ledger.append("orbital_verification", json!({"score": 0.9})).unwrap();

        let receipts = ledger.receipts();
        let expected = ledger.merkle_root_of(&receipts[4..]);
        let anchor = ledger.anchor_pending().unwrap();
        assert_eq!(anchor.payload["batch_size"], 2);
        assert_eq!(anchor.payload["root"], expected.as_str());
    }

    #[test]
    fn anchor_on_empty_ledger_uses_empty_root() {
        let ledger = ledger();
        let anchor = ledger.anchor().unwrap();
        assert_eq!(anchor.payload["root"], ledger.hasher().empty_root().as_str());
        assert_eq!(anchor.payload["batch_size"], 0);
        assert_eq!(anchor.prev_hash, ChainLink::Genesis);
    }

    #[test]
    fn inclusion_proof_verifies_against_root() {
        let ledger = populated(5);
        let proof = ledger.prove_inclusion(3).unwrap();
        assert_eq!(proof.root, ledger.merkle_root());
        assert!(proof.verify(ledger.hasher()));
        assert!(ledger.prove_inclusion(5).is_none());
    }

    #[test]
    fn stats_count_by_type() {
        let ledger = ledger();
        for t in ["a", "b", "a"] {
            ledger.append(t, json!({})).unwrap();
        }
        let stats = ledger.stats();
        assert_eq!(stats.total_receipts, 3);
        assert_eq!(stats.by_type.len(), 2);
        assert_eq!(stats.count("a"), 2);
        assert_eq!(stats.count("b"), 1);
        assert_eq!(stats.count("c"), 0);
        assert!(stats.chain_valid);
        assert_eq!(stats.merkle_root, ledger.merkle_root());
        assert_eq!(stats.last_receipt_timestamp, Some(ledger.last().unwrap().timestamp));
    }

    #[test]
    fn reset_clears_everything() {
        let ledger = populated(3);
        ledger.anchor().unwrap();
        ledger.reset();

        assert_eq!(ledger.phase(), LedgerPhase::Empty);
        assert_eq!(ledger.stats().total_receipts, 0);
        assert!(ledger.anchors().is_empty());

        let r = ledger.append("demo_init", json!({})).unwrap();
        assert!(r.is_genesis());

        // Reset on empty is a no-op.
        ledger.reset();
        ledger.reset();
        assert!(ledger.is_empty());
    }

    #[test]
    fn observers_see_events_in_order() {
        let recorder = Arc::new(Recorder::default());
        let ledger = ReceiptLedger::builder().observer(recorder.clone()).build();

        ledger.append("a", json!({})).unwrap();
        ledger.anchor().unwrap();
        ledger.verify();
        ledger.reset();

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "appended:a",
                "appended:anchor",
                "anchored:1",
                "verified:true",
                "reset:2",
            ]
        );
    }

    #[test]
    fn failed_append_notifies_nobody() {
        let recorder = Arc::new(Recorder::default());
        let ledger = ReceiptLedger::builder().observer(recorder.clone()).build();
        assert!(ledger.append("bad", json!(null)).is_err());
        assert!(recorder.events.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_append_does_not_advance_clock() {
        let ledger = ledger();
        ledger.append("a", json!({})).unwrap();
        assert!(ledger.append("bad", json!([1, 2])).is_err());
        let next = ledger.append("b", json!({})).unwrap();
        assert_eq!(next.timestamp.logical, 1);
    }

    #[test]
    fn signed_zero_payloads_share_a_hash() {
        let ledger = ledger();
        let a = ledger.append("fix", json!({ "lat": 0.0 })).unwrap();
        let b = ledger.append("fix", json!({ "lat": -0.0 })).unwrap();
        assert_eq!(a.payload_hash, b.payload_hash);
        assert!(ledger.verify().valid);
    }

    #[test]
    fn configured_algorithms_flow_into_anchor() {
        let config = LedgerConfig {
            tenant_id: "orbital-lab".into(),
            hash: crate::config::HashConfig {
                primary: AlgorithmId::Sha512,
                secondary: AlgorithmId::Blake3,
            },
            log_events: false,
        };
        let ledger = ReceiptLedger::new(&config).unwrap();
        let r = ledger.append("x", json!({})).unwrap();
        assert_eq!(r.tenant_id.as_str(), "orbital-lab");
        assert_eq!(r.payload_hash.components().next().unwrap().len(), 128);
        let anchor = ledger.anchor().unwrap();
        assert_eq!(anchor.payload["hash_algorithms"], json!(["sha512", "blake3"]));
    }

    #[test]
    fn concurrent_appends_keep_chain_valid() {
        let ledger = Arc::new(ReceiptLedger::default());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let ledger = Arc::clone(&ledger);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        ledger.append("worker", json!({ "thread": t, "i": i })).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let result = ledger.verify();
        assert!(result.valid);
        assert_eq!(result.total_receipts, 100);
    }
}
