use std::fs;
use std::path::Path;

use erl_crypto::{AlgorithmId, DualHasher};
use erl_types::{TenantId, DEFAULT_TENANT};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Ledger configuration, usually read from a TOML file.
///
/// ```toml
/// tenant_id = "orbital-lab"
/// log_events = true
///
/// [hash]
/// primary = "sha256"
/// secondary = "blake3"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Identifier stamped on every receipt.
    pub tenant_id: String,
    /// Digest algorithms behind the dual hash.
    pub hash: HashConfig,
    /// Install the `tracing` observer.
    pub log_events: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            tenant_id: DEFAULT_TENANT.to_string(),
            hash: HashConfig::default(),
            log_events: true,
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn tenant(&self) -> Result<TenantId, ConfigError> {
        Ok(self.tenant_id.parse()?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    pub primary: AlgorithmId,
    pub secondary: AlgorithmId,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            primary: AlgorithmId::Sha256,
            secondary: AlgorithmId::Blake3,
        }
    }
}

impl HashConfig {
    pub fn build_hasher(&self) -> Result<DualHasher, ConfigError> {
        Ok(DualHasher::from_ids(self.primary, self.secondary)?)
    }
}
