use std::fmt;
use std::sync::Arc;

use erl_types::ContentHash;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::algorithm::{AlgorithmId, DigestAlgorithm};
use crate::canonical::{CanonicalBytes, EncodingError};

/// Payload hashed to produce the root of an empty Merkle batch.
pub const EMPTY_BATCH: &str = "empty";

/// Compound content hasher over two independent digest algorithms.
///
/// Every hash is `"<primary hex>:<secondary hex>"` over the same canonical
/// bytes. Forging a collision means breaking both algorithms at once.
/// The algorithms are chosen at construction time and must differ.
#[derive(Clone)]
pub struct DualHasher {
    primary: Arc<dyn DigestAlgorithm>,
    secondary: Arc<dyn DigestAlgorithm>,
}

impl DualHasher {
    /// Build a hasher from two distinct algorithms.
    pub fn new(
        primary: Arc<dyn DigestAlgorithm>,
        secondary: Arc<dyn DigestAlgorithm>,
    ) -> Result<Self, HasherError> {
        if primary.name() == secondary.name() {
            return Err(HasherError::DuplicateAlgorithm(primary.name()));
        }
        Ok(Self { primary, secondary })
    }

    /// Build a hasher from built-in algorithm identifiers.
    pub fn from_ids(primary: AlgorithmId, secondary: AlgorithmId) -> Result<Self, HasherError> {
        Self::new(primary.algorithm(), secondary.algorithm())
    }

    /// Hash any serializable value.
    pub fn hash<T: Serialize + ?Sized>(&self, value: &T) -> Result<ContentHash, EncodingError> {
        Ok(self.hash_canonical(&CanonicalBytes::new(value)?))
    }

    /// Hash a JSON value.
    pub fn hash_value(&self, value: &Value) -> Result<ContentHash, EncodingError> {
        Ok(self.hash_canonical(&CanonicalBytes::from_value(value)?))
    }

    /// Hash a receipt payload.
    pub fn hash_map(&self, map: &Map<String, Value>) -> Result<ContentHash, EncodingError> {
        Ok(self.hash_canonical(&CanonicalBytes::from_map(map)?))
    }

    /// Digest already-canonical bytes with both algorithms.
    pub fn hash_canonical(&self, bytes: &CanonicalBytes) -> ContentHash {
        ContentHash::from_digests(
            &self.primary.digest_hex(bytes.as_bytes()),
            &self.secondary.digest_hex(bytes.as_bytes()),
        )
    }

    /// Combine two hashes: the dual hash of their concatenation as a JSON
    /// string.
    pub fn hash_chain(&self, left: &ContentHash, right: &ContentHash) -> ContentHash {
        self.hash_str(&format!("{left}{right}"))
    }

    /// Root of an empty Merkle batch.
    pub fn empty_root(&self) -> ContentHash {
        self.hash_str(EMPTY_BATCH)
    }

    fn hash_str(&self, text: &str) -> ContentHash {
        self.hash_canonical(&CanonicalBytes::from_str_value(text))
    }

    /// Algorithm identifiers in digest order.
    pub fn algorithms(&self) -> [&'static str; 2] {
        [self.primary.name(), self.secondary.name()]
    }
}

impl Default for DualHasher {
    /// SHA-256 + BLAKE3.
    fn default() -> Self {
        Self {
            primary: AlgorithmId::Sha256.algorithm(),
            secondary: AlgorithmId::Blake3.algorithm(),
        }
    }
}

impl fmt::Debug for DualHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DualHasher({}:{})", self.primary.name(), self.secondary.name())
    }
}

/// Errors from hasher construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HasherError {
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("dual hash needs two different algorithms, got {0} twice")]
    DuplicateAlgorithm(&'static str),
}
