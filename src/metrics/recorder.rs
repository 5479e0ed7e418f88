//! Metrics recorder for deskpulse stress operations

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::sync::atomic::{AtomicBool, Ordering};

static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize metric descriptions (call once at startup)
pub fn init_metrics() {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return; // Already initialized
    }

    describe_counter!(
        "deskpulse_sessions_started_total",
        "Total number of send sessions started"
    );
    describe_counter!(
        "deskpulse_send_failures_total",
        "Total number of runs terminated by a send failure"
    );
    describe_counter!("deskpulse_chunks_sent_total", "Total number of chunks sent");
    describe_counter!("deskpulse_bytes_sent_total", "Total bytes sent");
    describe_counter!(
        "deskpulse_send_cycles_total",
        "Total number of completed send cycles"
    );

    describe_gauge!(
        "deskpulse_ledger_blocks",
        "Current number of simulated memory blocks"
    );
    describe_gauge!(
        "deskpulse_ledger_bytes",
        "Current simulated memory pool size in bytes"
    );

    describe_histogram!(
        "deskpulse_rate_megabits",
        "Observed cumulative send rate in megabits per second"
    );
}

/// Record a send session starting
pub fn record_session_started() {
    counter!("deskpulse_sessions_started_total").increment(1);
}

/// Record a run terminated by a send failure
pub fn record_send_failure() {
    counter!("deskpulse_send_failures_total").increment(1);
}

/// Record one chunk going out
pub fn record_chunk_sent(chunk_size: usize) {
    counter!("deskpulse_chunks_sent_total").increment(1);
    counter!("deskpulse_bytes_sent_total").increment(chunk_size as u64);
}

/// Record a completed send cycle
pub fn record_cycle_complete() {
    counter!("deskpulse_send_cycles_total").increment(1);
}

/// Record an observed throughput sample
pub fn record_rate(megabits_per_second: f64) {
    histogram!("deskpulse_rate_megabits").record(megabits_per_second);
}

/// Update the simulated memory pool gauges
pub fn set_ledger_usage(blocks: usize, total_bytes: u64) {
    gauge!("deskpulse_ledger_blocks").set(blocks as f64);
    gauge!("deskpulse_ledger_bytes").set(total_bytes as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_metrics() {
        // Should not panic when called multiple times
        init_metrics();
        init_metrics();
    }

    #[test]
    fn test_recorders_are_safe_without_a_sink() {
        record_session_started();
        record_chunk_sent(8192);
        record_cycle_complete();
        record_send_failure();
        record_rate(42.0);
        set_ledger_usage(3, 3 * 1024 * 1024);
    }
}
