//! Metrics and observability module
//!
//! Records deskpulse activity through the `metrics` facade so any
//! recorder the embedding application installs can pick it up.
//!
//! Key metrics exposed:
//! - Send sessions started / failed
//! - Chunks, cycles and bytes sent
//! - Observed throughput (megabits/second)
//! - Simulated memory pool size (blocks, bytes)

pub mod recorder;

pub use recorder::{
    init_metrics, record_chunk_sent, record_cycle_complete, record_rate, record_send_failure,
    record_session_started, set_ledger_usage,
};
