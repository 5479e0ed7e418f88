use serde::{Deserialize, Serialize};
use std::fmt;

pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Soft safety cap on the simulated pool. The ledger never allocates,
/// so the cap only keeps a fat-fingered size from making the totals
/// meaningless.
pub const MAX_POOL_BYTES: u64 = 64 * 1024 * BYTES_PER_MB;

/// A single simulated memory reservation, tracked purely as a byte
/// count. Owned exclusively by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub size_bytes: u64,
}

impl Block {
    pub fn new(size_bytes: u64) -> Self {
        Self { size_bytes }
    }

    pub fn size_mb(&self) -> u64 {
        self.size_bytes / BYTES_PER_MB
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub blocks: usize,
    pub total_bytes: u64,
    pub total_mb: u64,
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Allocated blocks: {}\nTotal allocated: {} bytes ({} MB)",
            self.blocks, self.total_bytes, self.total_mb
        )
    }
}
