use crate::monitor::{LinkMonitor, LinkMonitorConfig};

/// Network-speed panel: owns the link sampler for its lifetime.
pub struct ThroughputPanel {
    pub(crate) monitor: LinkMonitor,
    pub(crate) config: LinkMonitorConfig,
}

impl ThroughputPanel {
    pub(crate) fn open(config: LinkMonitorConfig) -> Self {
        Self {
            monitor: LinkMonitor::spawn(config),
            config,
        }
    }

    pub fn refresh_ms(&self) -> u128 {
        self.config.refresh.as_millis()
    }
}

impl Drop for ThroughputPanel {
    fn drop(&mut self) {
        self.monitor.stop();
    }
}

/// Memory-manager panel state: the last status line shown to the user.
pub struct LedgerPanel {
    pub last_message: String,
}

impl Default for LedgerPanel {
    fn default() -> Self {
        Self {
            last_message: "Memory manager ready".to_string(),
        }
    }
}

/// Packet-sender panel state: the last status line shown to the user.
pub struct SenderPanel {
    pub last_message: String,
}

impl Default for SenderPanel {
    fn default() -> Self {
        Self {
            last_message: "Enter parameters and press start".to_string(),
        }
    }
}
