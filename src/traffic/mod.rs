//! UDP traffic generation
//!
//! A controllable, cancellable datagram stream toward a single
//! destination. Each `start()` opens a fresh send session with its own
//! byte counter; `pause()` cancels cooperatively at chunk granularity.

pub mod error;
pub mod generator;
pub mod types;

pub use error::{TrafficError, TrafficResult};
pub use generator::{SendSession, TrafficGenerator};
pub use types::{SendRequest, SizeUnit, TrafficStatus, CHUNK_SIZE, DEFAULT_PORT};
