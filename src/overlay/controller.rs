use crate::ledger::ByteLedger;
use crate::monitor::{local_ipv4, LinkMonitorConfig, MonitorResult};
use crate::overlay::types::{LedgerPanel, SenderPanel, ThroughputPanel};
use crate::platform::{NullPlatform, PlatformIntegration};
use crate::traffic::{SendRequest, TrafficGenerator};

/// Top-level owner of the overlay's state.
///
/// Sub-panels are explicit optional handles rather than ad hoc
/// existence checks; opening is idempotent, closing drops the handle
/// (and with it any background sampler the panel owns). The core
/// operations keep working whether or not their panel is open.
pub struct OverlayController {
    ledger: ByteLedger,
    traffic: TrafficGenerator,
    throughput_panel: Option<ThroughputPanel>,
    ledger_panel: Option<LedgerPanel>,
    sender_panel: Option<SenderPanel>,
    link_config: LinkMonitorConfig,
    platform: Box<dyn PlatformIntegration>,
}

impl OverlayController {
    pub fn new(platform: Box<dyn PlatformIntegration>) -> Self {
        crate::metrics::init_metrics();
        Self {
            ledger: ByteLedger::new(),
            traffic: TrafficGenerator::new(),
            throughput_panel: None,
            ledger_panel: None,
            sender_panel: None,
            link_config: LinkMonitorConfig::default(),
            platform,
        }
    }

    /// Controller with the in-memory platform backend.
    pub fn headless() -> Self {
        Self::new(Box::new(NullPlatform::new()))
    }

    // -------------------- network-speed panel --------------------

    pub fn open_throughput_panel(&mut self) {
        if self.throughput_panel.is_none() {
            self.throughput_panel = Some(ThroughputPanel::open(self.link_config));
        }
    }

    pub fn close_throughput_panel(&mut self) {
        self.throughput_panel = None;
    }

    pub fn throughput_panel_open(&self) -> bool {
        self.throughput_panel.is_some()
    }

    /// Change the sampler refresh interval, restarting the sampler if
    /// the panel is open.
    pub fn set_throughput_refresh(&mut self, refresh_ms: u64) -> MonitorResult<()> {
        self.link_config = LinkMonitorConfig::with_refresh_ms(refresh_ms)?;
        if self.throughput_panel.is_some() {
            self.throughput_panel = Some(ThroughputPanel::open(self.link_config));
        }
        Ok(())
    }

    pub fn throughput_text(&self) -> String {
        match &self.throughput_panel {
            Some(panel) => panel.monitor.latest().to_string(),
            None => "Network panel closed".to_string(),
        }
    }

    pub fn local_ip_text(&self) -> String {
        match local_ipv4() {
            Some(ip) => format!("IPv4 address: {ip}"),
            None => "IPv4 address unavailable".to_string(),
        }
    }

    // -------------------- memory-manager panel --------------------

    pub fn open_ledger_panel(&mut self) {
        if self.ledger_panel.is_none() {
            self.ledger_panel = Some(LedgerPanel::default());
        }
    }

    pub fn close_ledger_panel(&mut self) {
        self.ledger_panel = None;
    }

    pub fn ledger_panel_open(&self) -> bool {
        self.ledger_panel.is_some()
    }

    pub fn grow_memory(&mut self, size_mb: u64) -> String {
        let message = match self.ledger.grow(size_mb) {
            Ok(text) => text,
            Err(e) => e.to_string(),
        };
        self.note_ledger(&message);
        message
    }

    pub fn reduce_memory(&mut self, size_mb: u64) -> String {
        let message = match self.ledger.shrink(size_mb) {
            Ok(text) => text,
            Err(e) => e.to_string(),
        };
        self.note_ledger(&message);
        message
    }

    pub fn reset_memory(&mut self) -> String {
        let message = self.ledger.reset();
        self.note_ledger(&message);
        message
    }

    pub fn memory_summary(&self) -> String {
        self.ledger.summary().to_string()
    }

    /// Full panel text: pool summary plus the last action's outcome.
    pub fn memory_panel_text(&self) -> String {
        match &self.ledger_panel {
            Some(panel) => format!("{}\n{}", self.memory_summary(), panel.last_message),
            None => "Memory panel closed".to_string(),
        }
    }

    fn note_ledger(&mut self, message: &str) {
        if let Some(panel) = self.ledger_panel.as_mut() {
            panel.last_message = message.to_string();
        }
    }

    // -------------------- packet-sender panel --------------------

    pub fn open_sender_panel(&mut self) {
        if self.sender_panel.is_none() {
            self.sender_panel = Some(SenderPanel::default());
        }
    }

    pub fn close_sender_panel(&mut self) {
        self.sender_panel = None;
    }

    pub fn sender_panel_open(&self) -> bool {
        self.sender_panel.is_some()
    }

    pub fn start_sending(&mut self, request: &SendRequest) -> String {
        let message = match self.traffic.start(request) {
            Ok(()) => "Sending started...".to_string(),
            Err(e) => format!("Parameter error: {e}"),
        };
        self.note_sender(&message);
        message
    }

    pub fn pause_sending(&mut self) -> String {
        self.traffic.pause();
        let message = "Sending paused".to_string();
        self.note_sender(&message);
        message
    }

    /// Current sender status line: the latest rate report while a
    /// monitor is live, the last recorded error after a failed run.
    pub fn sender_status_text(&self) -> String {
        let status = self.traffic.status();
        if let Some(error) = status.last_error {
            return error;
        }
        match self.traffic.rate_reports() {
            Some(reports) => reports.borrow().to_string(),
            None => "Enter parameters and press start".to_string(),
        }
    }

    fn note_sender(&mut self, message: &str) {
        if let Some(panel) = self.sender_panel.as_mut() {
            panel.last_message = message.to_string();
        }
    }

    // -------------------- platform --------------------

    pub fn toggle_autostart(&self) -> String {
        let enabled = match self.platform.is_autostart_enabled() {
            Ok(enabled) => enabled,
            Err(e) => return e.to_string(),
        };
        let result = if enabled {
            self.platform.disable_autostart()
        } else {
            self.platform.enable_autostart()
        };
        match result {
            Ok(()) if enabled => "Autostart disabled".to_string(),
            Ok(()) => "Autostart enabled".to_string(),
            Err(e) => e.to_string(),
        }
    }

    pub fn show_tray_icon(&self) -> String {
        match self.platform.show_tray_icon() {
            Ok(()) => "Tray icon shown".to_string(),
            Err(e) => e.to_string(),
        }
    }

    pub fn set_sleep_inhibited(&self, inhibited: bool) -> String {
        match self.platform.set_sleep_inhibited(inhibited) {
            Ok(()) if inhibited => "System sleep inhibited".to_string(),
            Ok(()) => "System sleep allowed".to_string(),
            Err(e) => e.to_string(),
        }
    }

    // -------------------- lifecycle --------------------

    /// Close every panel, stop sending and drop all simulated memory.
    pub fn shutdown(&mut self) {
        tracing::info!("overlay shutting down");
        self.close_throughput_panel();
        self.close_ledger_panel();
        self.close_sender_panel();
        self.traffic.pause();
        self.ledger.reset();
    }

    // -------------------- typed access --------------------

    pub fn ledger(&self) -> &ByteLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ByteLedger {
        &mut self.ledger
    }

    pub fn traffic(&self) -> &TrafficGenerator {
        &self.traffic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::SizeUnit;

    #[test]
    fn test_ledger_ops_render_errors_as_text() {
        let mut overlay = OverlayController::headless();

        let ok = overlay.grow_memory(10);
        assert!(ok.contains("(10 MB)"));

        let err = overlay.grow_memory(0);
        assert!(err.contains("positive number of megabytes"));
        assert_eq!(overlay.ledger().total_bytes(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_panel_open_is_idempotent() {
        let mut overlay = OverlayController::headless();
        assert!(!overlay.ledger_panel_open());

        overlay.open_ledger_panel();
        overlay.grow_memory(2);
        overlay.open_ledger_panel(); // keeps existing state

        assert!(overlay.memory_panel_text().contains("(2 MB)"));
        overlay.close_ledger_panel();
        assert_eq!(overlay.memory_panel_text(), "Memory panel closed");

        // Operations still work with the panel closed.
        overlay.reduce_memory(2);
        assert_eq!(overlay.ledger().total_bytes(), 0);
    }

    #[tokio::test]
    async fn test_sender_panel_flow() {
        let mut overlay = OverlayController::headless();
        overlay.open_sender_panel();

        let bad = SendRequest::new("999.1.1.1", 1.0, SizeUnit::Megabytes, 0);
        let message = overlay.start_sending(&bad);
        assert!(message.starts_with("Parameter error:"));
        assert!(!overlay.traffic().status().running);

        overlay.pause_sending();
        assert_eq!(overlay.sender_status_text(), "Enter parameters and press start");
    }

    #[test]
    fn test_autostart_toggle_round_trip() {
        let overlay = OverlayController::headless();
        assert_eq!(overlay.toggle_autostart(), "Autostart enabled");
        assert_eq!(overlay.toggle_autostart(), "Autostart disabled");
    }

    #[tokio::test]
    async fn test_shutdown_clears_everything() {
        let mut overlay = OverlayController::headless();
        overlay.open_ledger_panel();
        overlay.open_sender_panel();
        overlay.grow_memory(5);

        overlay.shutdown();

        assert!(!overlay.ledger_panel_open());
        assert!(!overlay.sender_panel_open());
        assert_eq!(overlay.ledger().total_bytes(), 0);
    }

    #[test]
    fn test_throughput_refresh_validation() {
        let mut overlay = OverlayController::headless();
        assert!(overlay.set_throughput_refresh(0).is_err());
        assert!(overlay.set_throughput_refresh(250).is_ok());
        assert_eq!(overlay.throughput_text(), "Network panel closed");
    }
}
