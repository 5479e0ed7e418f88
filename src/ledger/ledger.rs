use crate::ledger::error::{LedgerError, LedgerResult};
use crate::ledger::types::{Block, LedgerSummary, BYTES_PER_MB, MAX_POOL_BYTES};

/// Ordered pool of simulated memory blocks, most-recently-added last.
///
/// Invariant: `total_bytes` equals the sum of the remaining block
/// sizes at all times. Not shared with background tasks — the
/// presentation layer serializes calls to it.
#[derive(Debug, Default)]
pub struct ByteLedger {
    blocks: Vec<Block>,
    total_bytes: u64,
}

impl ByteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one block of `size_mb` megabytes.
    pub fn grow(&mut self, size_mb: u64) -> LedgerResult<String> {
        if size_mb == 0 {
            return Err(LedgerError::InvalidSize);
        }

        let size_bytes = size_mb
            .checked_mul(BYTES_PER_MB)
            .filter(|b| *b <= MAX_POOL_BYTES - self.total_bytes)
            .ok_or(LedgerError::CapExceeded {
                requested_mb: size_mb,
                available_mb: (MAX_POOL_BYTES - self.total_bytes) / BYTES_PER_MB,
            })?;

        self.blocks.push(Block::new(size_bytes));
        self.total_bytes += size_bytes;
        self.publish_gauges();

        Ok(format!(
            "Allocated {} bytes ({} MB)",
            size_bytes,
            size_bytes / BYTES_PER_MB
        ))
    }

    /// Remove `size_mb` megabytes from the tail of the pool, popping
    /// whole blocks first and truncating the last one if needed.
    ///
    /// Removing more than is available is not an error: everything
    /// available is removed and the text reports the amount actually
    /// released. An empty pool is a reported no-op.
    pub fn shrink(&mut self, size_mb: u64) -> LedgerResult<String> {
        if size_mb == 0 {
            return Err(LedgerError::InvalidSize);
        }
        if self.blocks.is_empty() {
            return Ok("No memory blocks to release".to_string());
        }

        let requested = size_mb.saturating_mul(BYTES_PER_MB);
        let mut remaining = requested;

        while remaining > 0 {
            let Some(last) = self.blocks.last_mut() else {
                break;
            };
            if last.size_bytes <= remaining {
                remaining -= last.size_bytes;
                self.total_bytes -= last.size_bytes;
                self.blocks.pop();
            } else {
                last.size_bytes -= remaining;
                self.total_bytes -= remaining;
                remaining = 0;
            }
        }

        let released = requested - remaining;
        self.publish_gauges();

        Ok(format!(
            "Released {} bytes ({} MB)",
            released,
            released / BYTES_PER_MB
        ))
    }

    /// Drop every block. Idempotent.
    pub fn reset(&mut self) -> String {
        self.blocks.clear();
        self.total_bytes = 0;
        self.publish_gauges();
        "Memory pool reset".to_string()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            blocks: self.blocks.len(),
            total_bytes: self.total_bytes,
            total_mb: self.total_bytes / BYTES_PER_MB,
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn publish_gauges(&self) {
        debug_assert_eq!(
            self.total_bytes,
            self.blocks.iter().map(|b| b.size_bytes).sum::<u64>()
        );
        crate::metrics::set_ledger_usage(self.blocks.len(), self.total_bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grow_appends_block() {
        let mut ledger = ByteLedger::new();
        let msg = ledger.grow(10).unwrap();

        assert_eq!(ledger.block_count(), 1);
        assert_eq!(ledger.total_bytes(), 10 * BYTES_PER_MB);
        assert!(msg.contains("10485760 bytes"));
        assert!(msg.contains("(10 MB)"));
    }

    #[test]
    fn test_grow_zero_rejected() {
        let mut ledger = ByteLedger::new();
        assert_eq!(ledger.grow(0), Err(LedgerError::InvalidSize));
        assert_eq!(ledger.total_bytes(), 0);
    }

    #[test]
    fn test_grow_shrink_round_trip() {
        let mut ledger = ByteLedger::new();
        ledger.grow(5).unwrap();
        let before = ledger.total_bytes();

        ledger.grow(10).unwrap();
        ledger.shrink(10).unwrap();

        assert_eq!(ledger.total_bytes(), before);
        assert_eq!(ledger.block_count(), 1);
    }

    #[test]
    fn test_shrink_truncates_last_block() {
        let mut ledger = ByteLedger::new();
        ledger.grow(10).unwrap();
        ledger.grow(5).unwrap();

        // Pops the 5 MB block, then truncates the 10 MB block by 2 MB.
        let msg = ledger.shrink(7).unwrap();

        assert_eq!(ledger.block_count(), 1);
        assert_eq!(ledger.total_bytes(), 8 * BYTES_PER_MB);
        assert_eq!(ledger.blocks()[0].size_bytes, 8 * BYTES_PER_MB);
        assert!(msg.contains("(7 MB)"));
    }

    #[test]
    fn test_shrink_empty_is_noop() {
        let mut ledger = ByteLedger::new();
        let msg = ledger.shrink(10).unwrap();

        assert_eq!(ledger.total_bytes(), 0);
        assert_eq!(msg, "No memory blocks to release");
    }

    #[test]
    fn test_shrink_beyond_available_reports_actual() {
        let mut ledger = ByteLedger::new();
        ledger.grow(3).unwrap();

        let msg = ledger.shrink(100).unwrap();

        assert_eq!(ledger.total_bytes(), 0);
        assert_eq!(ledger.block_count(), 0);
        assert!(msg.contains("(3 MB)"));
        assert!(!msg.contains("(100 MB)"));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut ledger = ByteLedger::new();
        ledger.grow(4).unwrap();
        ledger.grow(8).unwrap();

        ledger.reset();
        assert_eq!(ledger.total_bytes(), 0);
        assert_eq!(ledger.block_count(), 0);

        ledger.reset();
        assert_eq!(ledger.total_bytes(), 0);
    }

    #[test]
    fn test_cap_exceeded_leaves_state_unchanged() {
        let mut ledger = ByteLedger::new();
        ledger.grow(1).unwrap();

        let over = MAX_POOL_BYTES / BYTES_PER_MB;
        let result = ledger.grow(over);

        assert!(matches!(result, Err(LedgerError::CapExceeded { .. })));
        assert_eq!(ledger.total_bytes(), BYTES_PER_MB);
        assert_eq!(ledger.block_count(), 1);
    }

    #[test]
    fn test_summary_truncates_mb() {
        let mut ledger = ByteLedger::new();
        ledger.grow(3).unwrap();
        ledger.shrink(1).unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.blocks, 1);
        assert_eq!(summary.total_bytes, 2 * BYTES_PER_MB);
        assert_eq!(summary.total_mb, 2);

        let text = summary.to_string();
        assert!(text.contains("Allocated blocks: 1"));
        assert!(text.contains("(2 MB)"));
    }
}
