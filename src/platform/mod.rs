//! Platform integration seam
//!
//! Autostart, tray icon and sleep inhibition are OS side concerns; the
//! core only depends on this capability trait so it stays
//! platform-agnostic. Real backends live with the presentation layer.

pub mod error;
pub mod integration;

pub use error::{PlatformError, PlatformResult};
pub use integration::{NullPlatform, PlatformIntegration};
