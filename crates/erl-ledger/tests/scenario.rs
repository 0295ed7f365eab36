use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::sync::Arc;

use erl_ledger::{
    read_export, read_export_file, receipt_types, verify_receipts, ChainViolation, DualHasher,
    LedgerStats, ManualClock, ReceiptLedger, VerifyMode,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn ledger() -> ReceiptLedger {
    ReceiptLedger::builder()
        .clock(Arc::new(ManualClock::new(1_717_000_000_000)))
        .build()
}

fn demo_session() -> ReceiptLedger {
    let ledger = ledger();
    ledger
        .append(receipt_types::DEMO_INIT, json!({"session_id": "s-1", "mode": "terrestrial"}))
        .unwrap();
    ledger
        .append(
            receipt_types::TERRESTRIAL_VERIFICATION,
            json!({"component": "gyroscope", "entropy_score": 0.93, "passed": true}),
        )
        .unwrap();
    ledger
        .append(
            receipt_types::MODE_SWITCH,
            json!({"from": "terrestrial", "to": "orbital"}),
        )
        .unwrap();
    ledger.anchor().unwrap();
    ledger
}

#[test]
fn three_receipts_and_an_anchor() {
    let ledger = ledger();
    ledger.append("verification", json!({"component": "gyroscope"})).unwrap();
    ledger.append("mode_switch", json!({"to": "orbital"})).unwrap();
    ledger.append("verification", json!({"component": "star_tracker"})).unwrap();
    ledger.anchor().unwrap();

    let result = ledger.verify();
    assert!(result.valid);
    assert_eq!(result.total_receipts, 4);

    let stats = ledger.stats();
    assert_eq!(stats.total_receipts, 4);
    assert_eq!(stats.by_type["verification"], 2);
    assert_eq!(stats.by_type["mode_switch"], 1);
    assert_eq!(stats.by_type["anchor"], 1);
    assert_eq!(stats.anchor_count, 1);
    assert!(stats.chain_valid);

    let receipts = ledger.receipts();
    assert_eq!(receipts[3].payload["batch_size"], 3);
    assert_eq!(receipts[3].prev_hash.hash(), Some(&receipts[2].payload_hash));
}

#[test]
fn demo_session_anchor_closes_the_batch() {
    let ledger = demo_session();
    let stats = ledger.stats();
    assert_eq!(stats.count(receipt_types::ANCHOR), 1);
    assert_eq!(stats.total_receipts, 4);

    let anchor = ledger.last().unwrap();
    assert!(anchor.is_anchor());
    assert_eq!(anchor.payload["root"], ledger.anchors()[0].root.as_str());
}

#[test]
fn export_round_trips_through_file() {
    let ledger = demo_session();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.ndjson");

    ledger
        .export_to(BufWriter::new(File::create(&path).unwrap()))
        .unwrap();

    let imported = read_export_file(&path).unwrap();
    assert_eq!(imported, ledger.receipts());

    let hasher = DualHasher::default();
    let result = verify_receipts(&hasher, &imported, VerifyMode::Full);
    assert!(result.valid);
    assert_eq!(result.merkle_root, Some(ledger.merkle_root()));
    assert_eq!(LedgerStats::from_receipts(&hasher, &imported), ledger.stats());
}

#[test]
fn export_lines_are_self_contained_json() {
    let ledger = demo_session();
    let lines = ledger.export_ledger().unwrap();
    assert_eq!(lines.len(), 4);

    let first: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["receipt_type"], "demo_init");
    assert_eq!(first["prev_hash"], "GENESIS");
    assert_eq!(first["tenant_id"], "entropy-demo");
    for line in &lines {
        assert!(!line.contains('\n'));
    }
}

#[test]
fn edited_export_is_detected() {
    let ledger = demo_session();
    let mut lines = ledger.export_ledger().unwrap();

    let mut doc: Value = serde_json::from_str(&lines[1]).unwrap();
    doc["payload"]["entropy_score"] = json!(0.99);
    lines[1] = doc.to_string();

    let imported = read_export(Cursor::new(lines.join("\n"))).unwrap();
    let hasher = DualHasher::default();

    assert!(verify_receipts(&hasher, &imported, VerifyMode::Links).valid);

    let result = verify_receipts(&hasher, &imported, VerifyMode::Full);
    assert!(!result.valid);
    assert_eq!(result.violation.as_ref().map(ChainViolation::index), Some(1));
}

#[test]
fn dropped_line_is_detected() {
    let ledger = demo_session();
    let mut lines = ledger.export_ledger().unwrap();
    lines.remove(2);

    let imported = read_export(Cursor::new(lines.join("\n"))).unwrap();
    let result = verify_receipts(&DualHasher::default(), &imported, VerifyMode::Links);
    assert!(matches!(
        result.violation,
        Some(ChainViolation::BrokenLink { index: 2, .. })
    ));
}

#[test]
fn reset_starts_a_fresh_chain() {
    let ledger = demo_session();
    let old_root = ledger.merkle_root();
    ledger.reset();

    assert_eq!(ledger.merkle_root(), DualHasher::default().empty_root());
    let r = ledger.append(receipt_types::DEMO_INIT, json!({"session_id": "s-2"})).unwrap();
    assert!(r.is_genesis());
    assert_ne!(ledger.merkle_root(), old_root);
}

fn payload() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..5)
        .prop_map(|m| json!(m))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn any_append_sequence_verifies(
        entries in prop::collection::vec(("x[a-z_]{0,9}", payload()), 0..20),
        anchor_every in 1usize..6,
    ) {
        let ledger = ledger();
        for (i, (receipt_type, payload)) in entries.into_iter().enumerate() {
            ledger.append(receipt_type, payload).unwrap();
            if i % anchor_every == 0 {
                ledger.anchor_pending().unwrap();
            }
        }

        let result = ledger.verify();
        prop_assert!(result.valid);
        prop_assert_eq!(result.total_receipts, ledger.len());

        let stats = ledger.stats();
        prop_assert_eq!(stats.by_type.values().sum::<usize>(), stats.total_receipts);
        prop_assert_eq!(stats.anchor_count, ledger.anchors().len());

        let receipts = ledger.receipts();
        for pair in receipts.windows(2) {
            prop_assert!(pair[1].timestamp > pair[0].timestamp);
        }
    }
}
