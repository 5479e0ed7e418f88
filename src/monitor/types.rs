use crate::monitor::error::{MonitorError, MonitorResult};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Default refresh interval for the link sampler.
pub const DEFAULT_REFRESH: Duration = Duration::from_millis(700);

/// One rate-monitor observation of the active send session.
#[derive(Debug, Clone, Serialize)]
pub struct RateReport {
    pub running: bool,
    pub bytes_sent: u64,
    /// Cumulative-since-start rate. `None` while no full second has
    /// elapsed yet, or once the session has stopped.
    pub megabits_per_second: Option<f64>,
}

impl RateReport {
    pub(crate) fn initial() -> Self {
        Self {
            running: true,
            bytes_sent: 0,
            megabits_per_second: None,
        }
    }
}

impl fmt::Display for RateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.running, self.megabits_per_second) {
            (true, Some(rate)) => write!(f, "Sending, rate: {rate:.2} Mbps"),
            (true, None) => write!(f, "Sending, rate: measuring..."),
            (false, _) => write!(f, "Sending paused"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkMonitorConfig {
    pub refresh: Duration,
}

impl Default for LinkMonitorConfig {
    fn default() -> Self {
        Self {
            refresh: DEFAULT_REFRESH,
        }
    }
}

impl LinkMonitorConfig {
    pub fn with_refresh_ms(refresh_ms: u64) -> MonitorResult<Self> {
        if refresh_ms == 0 {
            return Err(MonitorError::InvalidRefreshInterval(refresh_ms));
        }
        Ok(Self {
            refresh: Duration::from_millis(refresh_ms),
        })
    }
}

/// System-wide interface throughput over one refresh window.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LinkSample {
    pub up_bytes_per_sec: f64,
    pub down_bytes_per_sec: f64,
}

impl LinkSample {
    pub fn zero() -> Self {
        Self {
            up_bytes_per_sec: 0.0,
            down_bytes_per_sec: 0.0,
        }
    }
}

impl fmt::Display for LinkSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "↑ {}   ↓ {}",
            crate::monitor::link::format_speed(self.up_bytes_per_sec),
            crate::monitor::link::format_speed(self.down_bytes_per_sec)
        )
    }
}
