//! Hashing primitives for the entropy receipt ledger.
//!
//! Provides canonical (key-sorted) JSON serialization, a dual hasher that
//! combines two independent digest algorithms into one identifier, binary
//! Merkle trees with inclusion proofs, and hash chain verification.
//!
//! All digests come from established libraries (`sha2`, `blake3`).

pub mod algorithm;
pub mod canonical;
pub mod chain;
pub mod hasher;
pub mod merkle;

pub use algorithm::{AlgorithmId, Blake3Digest, DigestAlgorithm, Sha256Digest, Sha512Digest};
pub use canonical::{CanonicalBytes, EncodingError};
pub use chain::{ChainVerifier, ChainViolation, ChainedRecord, VerifyMode};
pub use hasher::{DualHasher, HasherError};
pub use merkle::{MerkleProof, MerkleTree, Side};
