use crate::monitor::types::RateReport;
use crate::traffic::SendSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Fixed sampling period of the rate monitor.
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);

/// Cumulative-since-start throughput in megabits per second, using the
/// 1024² divisor. Unreported (`None`) until any time has elapsed.
pub fn rate_megabits(bytes_sent: u64, elapsed: Duration) -> Option<f64> {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return None;
    }
    Some((bytes_sent as f64 * 8.0) / (1024.0 * 1024.0) / secs)
}

/// Periodic sampler of one send session.
///
/// Spawned by `TrafficGenerator::start` alongside the send loop; a new
/// start always gets a fresh monitor. Publishes a report every second
/// while the session is running, then one final paused report before
/// exiting. It never restarts on its own.
pub struct RateMonitor;

impl RateMonitor {
    pub(crate) fn spawn(session: Arc<SendSession>) -> watch::Receiver<RateReport> {
        let (tx, rx) = watch::channel(RateReport::initial());

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SAMPLE_PERIOD);
            ticker.tick().await; // first tick resolves immediately

            loop {
                ticker.tick().await;
                let status = session.snapshot();

                if !status.running {
                    let _ = tx.send(RateReport {
                        running: false,
                        bytes_sent: status.bytes_sent,
                        megabits_per_second: None,
                    });
                    break;
                }

                let rate = rate_megabits(status.bytes_sent, status.elapsed);
                if let Some(rate) = rate {
                    crate::metrics::record_rate(rate);
                }
                let _ = tx.send(RateReport {
                    running: true,
                    bytes_sent: status.bytes_sent,
                    megabits_per_second: rate,
                });
            }

            tracing::debug!(session = %session.id(), "rate monitor stopped");
        });

        rx
    }
}
