use erl_types::{ChainLink, ContentHash, Receipt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::hasher::DualHasher;

/// A record that participates in a payload hash chain.
pub trait ChainedRecord {
    /// Stored payload.
    fn payload(&self) -> &Map<String, Value>;
    /// Stored hash of the payload.
    fn payload_hash(&self) -> &ContentHash;
    /// Link to the previous record's payload hash.
    fn prev_hash(&self) -> &ChainLink;
}

impl ChainedRecord for Receipt {
    fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    fn payload_hash(&self) -> &ContentHash {
        &self.payload_hash
    }

    fn prev_hash(&self) -> &ChainLink {
        &self.prev_hash
    }
}

/// Which checks a verification pass runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyMode {
    /// Chain links only: catches reordering, insertion and deletion.
    Links,
    /// Chain links plus payload hash recomputation: also catches content edits.
    #[default]
    Full,
}

/// Hash chain integrity verifier.
///
/// Checks, in order for every record:
/// 1. The first record links to `GENESIS`; every later record links to the
///    payload hash of the one before it
/// 2. In [`VerifyMode::Full`], the stored payload hash matches the payload
///
/// A payload that cannot be canonically serialized fails the pass too.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify a chain, returning the record count or the first violation.
    pub fn verify<R: ChainedRecord>(
        hasher: &DualHasher,
        records: &[R],
        mode: VerifyMode,
    ) -> Result<usize, ChainViolation> {
        let mut previous: Option<&ContentHash> = None;

        for (index, record) in records.iter().enumerate() {
            let link = record.prev_hash();
            match previous {
                None if !link.is_genesis() => {
                    return Err(ChainViolation::GenesisMismatch {
                        found: link.clone(),
                    });
                }
                Some(expected) if link.hash() != Some(expected) => {
                    return Err(ChainViolation::BrokenLink {
                        index,
                        expected: expected.clone(),
                        found: link.clone(),
                    });
                }
                _ => {}
            }

            if mode == VerifyMode::Full {
                let computed = hasher.hash_map(record.payload()).map_err(|e| {
                    ChainViolation::Unencodable {
                        index,
                        reason: e.to_string(),
                    }
                })?;
                if computed != *record.payload_hash() {
                    return Err(ChainViolation::PayloadMismatch {
                        index,
                        stored: record.payload_hash().clone(),
                        computed,
                    });
                }
            }

            previous = Some(record.payload_hash());
        }

        Ok(records.len())
    }
}

/// First integrity failure found in a chain.
///
/// This is a finding, not a crash: callers report it and keep querying.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainViolation {
    #[error("tampering detected at receipt 0: expected GENESIS link, found {found}")]
    GenesisMismatch { found: ChainLink },

    #[error("tampering detected at receipt {index}: prev_hash {found} does not match preceding payload hash {expected}")]
    BrokenLink {
        index: usize,
        expected: ContentHash,
        found: ChainLink,
    },

    #[error("tampering detected at receipt {index}: payload hashes to {computed}, stored {stored}")]
    PayloadMismatch {
        index: usize,
        stored: ContentHash,
        computed: ContentHash,
    },

    #[error("tampering detected at receipt {index}: payload cannot be canonically serialized: {reason}")]
    Unencodable { index: usize, reason: String },
}

impl ChainViolation {
    /// Index of the offending record.
    pub fn index(&self) -> usize {
        match self {
            Self::GenesisMismatch { .. } => 0,
            Self::BrokenLink { index, .. }
            | Self::PayloadMismatch { index, .. }
            | Self::Unencodable { index, .. } => *index,
        }
    }
}
