use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("empty content hash")]
    EmptyHash,

    #[error("invalid content hash {0:?}: expected hex components separated by ':'")]
    InvalidHash(String),

    #[error("empty tenant identifier")]
    EmptyTenant,
}
