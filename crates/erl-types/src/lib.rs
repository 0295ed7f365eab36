//! Foundation types for the entropy receipt ledger (ERL).
//!
//! Every other ERL crate depends on `erl-types`.
//!
//! # Key Types
//!
//! - [`Receipt`]: One immutable, hash-chained record of an event
//! - [`ContentHash`]: Compound digest string produced by the dual hasher
//! - [`ChainLink`]: A receipt's back-pointer: the `GENESIS` sentinel or a payload hash
//! - [`LedgerTime`]: Hybrid logical timestamp, strictly increasing per ledger
//! - [`TenantId`]: Process-wide identifier stamped on every receipt

pub mod error;
pub mod hash;
pub mod identity;
pub mod receipt;
pub mod temporal;

pub use error::TypeError;
pub use hash::{ChainLink, ContentHash, GENESIS};
pub use identity::{TenantId, DEFAULT_TENANT};
pub use receipt::{receipt_types, Receipt};
pub use temporal::LedgerTime;
