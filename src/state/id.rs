//! Connection identifier generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for one accepted connection.
///
/// Ids are never reused within a process run, so a stale id can never alias
/// a newer connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Generates connection ids in accept order.
pub struct IdGenerator {
    counter: AtomicU64,
}

/// Ids start at 1 so a zero never shows up in generated names.
const ID_COUNTER_START: u64 = 1;

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(ID_COUNTER_START),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> ConnectionId {
        ConnectionId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}
