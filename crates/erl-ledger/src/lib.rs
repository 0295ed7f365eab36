//! Append-only receipt ledger for the entropy receipt ledger (ERL).
//!
//! This crate is the heart of ERL. It provides:
//! - `ReceiptLedger`: an owned, hash-chained sequence of receipts
//! - Merkle anchoring of the whole ledger, an explicit batch, or the
//!   receipts since the last anchor
//! - Link and payload integrity verification, reported as values
//! - Summary statistics
//! - Line-delimited JSON export and offline verification of exports
//! - Observers for logging without touching the append path

pub mod anchor;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod observer;
pub mod stats;
pub mod verification;

pub use anchor::{batch_root, MerkleAnchor};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{HashConfig, LedgerConfig};
pub use error::{ConfigError, ExportError, LedgerError};
pub use export::{read_export, read_export_file, to_json_lines, write_json_lines};
pub use ledger::{LedgerBuilder, LedgerPhase, ReceiptLedger};
pub use observer::{LedgerEvent, LedgerObserver, TracingObserver};
pub use stats::LedgerStats;
pub use verification::{verify_receipts, VerificationResult};

pub use erl_crypto::{ChainViolation, DualHasher, EncodingError, VerifyMode};
pub use erl_types::{receipt_types, ChainLink, ContentHash, LedgerTime, Receipt, TenantId};
