//! Overlay controller
//!
//! Owns the core components and models each of the overlay's
//! sub-panels as an explicit optional handle with open/close lifecycle
//! operations. Every operation returns display text; failures are
//! rendered into the returned string, never thrown past this boundary.

pub mod controller;
pub mod types;

pub use controller::OverlayController;
pub use types::{LedgerPanel, SenderPanel, ThroughputPanel};
