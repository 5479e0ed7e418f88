//! deskpulse — resource-stress core for a desktop overlay
//!
//! The engineering lives in three small components: a simulated memory
//! pool with byte-accurate grow/shrink bookkeeping ([`ledger`]), a
//! cancellable UDP traffic generator ([`traffic`]) and the periodic
//! samplers that turn its counters into human-readable throughput
//! ([`monitor`]). The [`overlay`] controller ties them together the way
//! the overlay's windows do, and [`platform`] is the seam for OS side
//! concerns like autostart and the tray icon. Everything the
//! presentation layer needs comes back as display text or a snapshot;
//! nothing in here renders or blocks a UI thread.

pub mod ledger;
pub mod metrics;
pub mod monitor;
pub mod overlay;
pub mod platform;
pub mod traffic;
