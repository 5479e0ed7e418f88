use crate::platform::error::PlatformResult;
use std::sync::atomic::{AtomicBool, Ordering};

/// Capabilities the overlay needs from the host OS.
pub trait PlatformIntegration: Send + Sync {
    fn enable_autostart(&self) -> PlatformResult<()>;

    fn disable_autostart(&self) -> PlatformResult<()>;

    fn is_autostart_enabled(&self) -> PlatformResult<bool>;

    fn show_tray_icon(&self) -> PlatformResult<()>;

    /// Keep the system from sleeping while stress runs are active.
    fn set_sleep_inhibited(&self, inhibited: bool) -> PlatformResult<()>;
}

/// In-memory implementation for headless use and tests. State lives in
/// atomics instead of a registry, otherwise the contract is identical.
#[derive(Debug, Default)]
pub struct NullPlatform {
    autostart: AtomicBool,
    tray_shown: AtomicBool,
    sleep_inhibited: AtomicBool,
}

impl NullPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tray_shown(&self) -> bool {
        self.tray_shown.load(Ordering::Relaxed)
    }

    pub fn sleep_inhibited(&self) -> bool {
        self.sleep_inhibited.load(Ordering::Relaxed)
    }
}

impl PlatformIntegration for NullPlatform {
    fn enable_autostart(&self) -> PlatformResult<()> {
        self.autostart.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn disable_autostart(&self) -> PlatformResult<()> {
        self.autostart.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn is_autostart_enabled(&self) -> PlatformResult<bool> {
        Ok(self.autostart.load(Ordering::Relaxed))
    }

    fn show_tray_icon(&self) -> PlatformResult<()> {
        self.tray_shown.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn set_sleep_inhibited(&self, inhibited: bool) -> PlatformResult<()> {
        self.sleep_inhibited.store(inhibited, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autostart_round_trip() {
        let platform = NullPlatform::new();
        assert!(!platform.is_autostart_enabled().unwrap());

        platform.enable_autostart().unwrap();
        assert!(platform.is_autostart_enabled().unwrap());

        platform.disable_autostart().unwrap();
        assert!(!platform.is_autostart_enabled().unwrap());
    }

    #[test]
    fn test_tray_and_sleep_flags() {
        let platform = NullPlatform::new();
        assert!(!platform.tray_shown());

        platform.show_tray_icon().unwrap();
        assert!(platform.tray_shown());

        platform.set_sleep_inhibited(true).unwrap();
        assert!(platform.sleep_inhibited());
        platform.set_sleep_inhibited(false).unwrap();
        assert!(!platform.sleep_inhibited());
    }
}
