use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::hasher::HasherError;

/// A standard digest function the dual hasher can be built from.
pub trait DigestAlgorithm: Send + Sync {
    /// Stable identifier recorded in anchor payloads (e.g. `"sha256"`).
    fn name(&self) -> &'static str;

    /// Lowercase hex digest of `data`.
    fn digest_hex(&self, data: &[u8]) -> String;
}

/// SHA-256 (FIPS 180-4).
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl DigestAlgorithm for Sha256Digest {
    fn name(&self) -> &'static str {
        AlgorithmId::Sha256.as_str()
    }

    fn digest_hex(&self, data: &[u8]) -> String {
        hex::encode(Sha256::digest(data))
    }
}

/// SHA-512 (FIPS 180-4).
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha512Digest;

impl DigestAlgorithm for Sha512Digest {
    fn name(&self) -> &'static str {
        AlgorithmId::Sha512.as_str()
    }

    fn digest_hex(&self, data: &[u8]) -> String {
        hex::encode(Sha512::digest(data))
    }
}

/// BLAKE3, 256-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Digest;

impl DigestAlgorithm for Blake3Digest {
    fn name(&self) -> &'static str {
        AlgorithmId::Blake3.as_str()
    }

    fn digest_hex(&self, data: &[u8]) -> String {
        blake3::hash(data).to_hex().to_string()
    }
}

/// Built-in algorithms selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    Sha256,
    Sha512,
    Blake3,
}

impl AlgorithmId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
            Self::Blake3 => "blake3",
        }
    }

    /// Instantiate the algorithm.
    pub fn algorithm(self) -> Arc<dyn DigestAlgorithm> {
        match self {
            Self::Sha256 => Arc::new(Sha256Digest),
            Self::Sha512 => Arc::new(Sha512Digest),
            Self::Blake3 => Arc::new(Blake3Digest),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(HasherError::UnknownAlgorithm(s.to_string())),
        }
    }
}
