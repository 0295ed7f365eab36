use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Sentinel `prev_hash` value of the first receipt in a ledger.
pub const GENESIS: &str = "GENESIS";

/// Compound digest identifier: hex digests joined by `':'`.
///
/// The ledger produces these from two independent algorithms
/// (`"<primary>:<secondary>"`). Equality is plain string equality, so two
/// hashes match only when every component matches.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Join a primary and secondary hex digest into one identifier.
    pub fn from_digests(primary: &str, secondary: &str) -> Self {
        Self(format!("{primary}:{secondary}"))
    }

    /// The full identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The individual hex digests, in algorithm order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split(':')
    }

    /// Short form for log lines: first 8 chars of the primary digest.
    pub fn short(&self) -> &str {
        let primary = self.components().next().unwrap_or_default();
        primary.get(..8).unwrap_or(primary)
    }
}

impl FromStr for ContentHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TypeError::EmptyHash);
        }
        let well_formed = s.split(':').all(|part| {
            !part.is_empty() && part.bytes().all(|b| b.is_ascii_hexdigit())
        });
        if !well_formed {
            return Err(TypeError::InvalidHash(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ContentHash {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.0
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Back-pointer from a receipt to its predecessor.
///
/// Serialized as a bare string: either [`GENESIS`] or the predecessor's
/// payload hash.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChainLink {
    Genesis,
    Receipt(ContentHash),
}

impl ChainLink {
    /// Link for a receipt appended after `previous`, or genesis when there is none.
    pub fn after(previous: Option<&ContentHash>) -> Self {
        match previous {
            Some(hash) => Self::Receipt(hash.clone()),
            None => Self::Genesis,
        }
    }

    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis)
    }

    /// The referenced payload hash, if this is not the genesis link.
    pub fn hash(&self) -> Option<&ContentHash> {
        match self {
            Self::Genesis => None,
            Self::Receipt(hash) => Some(hash),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Genesis => GENESIS,
            Self::Receipt(hash) => hash.as_str(),
        }
    }
}

impl FromStr for ChainLink {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GENESIS {
            Ok(Self::Genesis)
        } else {
            s.parse().map(Self::Receipt)
        }
    }
}

impl TryFrom<String> for ChainLink {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChainLink> for String {
    fn from(link: ChainLink) -> Self {
        match link {
            ChainLink::Genesis => GENESIS.to_string(),
            ChainLink::Receipt(hash) => hash.into(),
        }
    }
}

impl fmt::Debug for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => f.write_str("ChainLink(GENESIS)"),
            Self::Receipt(hash) => write!(f, "ChainLink({})", hash.short()),
        }
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
