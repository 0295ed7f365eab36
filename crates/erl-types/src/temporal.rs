use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Hybrid logical timestamp assigned to a receipt at append time.
///
/// Combines a wall-clock millisecond component with a logical counter for
/// events that land on the same (or an earlier) millisecond. A ledger only
/// ever hands out timestamps through [`LedgerTime::tick`], so the sequence of
/// receipt timestamps is strictly increasing even if the wall clock stalls
/// or steps backwards.
///
/// Ordering: `physical_ms` → `logical`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerTime {
    /// Wall-clock milliseconds since UNIX epoch.
    pub physical_ms: u64,
    /// Logical counter for events at the same physical time.
    pub logical: u32,
}

impl LedgerTime {
    pub const fn new(physical_ms: u64, logical: u32) -> Self {
        Self {
            physical_ms,
            logical,
        }
    }

    /// Current wall-clock milliseconds since the UNIX epoch.
    pub fn wall_clock_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    /// Next timestamp for a local event observed at `wall_ms`.
    ///
    /// Physical time is `max(wall_ms, last.physical_ms)`. If it advanced the
    /// logical counter resets to 0, otherwise it increments.
    pub fn tick(last: Option<Self>, wall_ms: u64) -> Self {
        match last {
            None => Self::new(wall_ms, 0),
            Some(prev) if wall_ms > prev.physical_ms => Self::new(wall_ms, 0),
            Some(prev) => Self::new(prev.physical_ms, prev.logical.saturating_add(1)),
        }
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl fmt::Debug for LedgerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerTime({}ms.{})", self.physical_ms, self.logical)
    }
}

impl fmt::Display for LedgerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.physical_ms, self.logical)
    }
}
