use std::io;

use erl_crypto::{EncodingError, HasherError};
use erl_types::TypeError;

/// Errors produced by ledger operations.
///
/// Integrity problems are not errors: they come back from `verify` as a
/// [`VerificationResult`](crate::VerificationResult).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Errors from exporting or importing line-delimited receipts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize receipt {index}: {message}")]
    Serialize { index: usize, message: String },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Errors from loading configuration or building a ledger from it.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Hasher(#[from] HasherError),

    #[error(transparent)]
    Tenant(#[from] TypeError),
}
