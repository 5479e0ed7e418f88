use crate::traffic::error::TrafficError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddrV4;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Destination port datagrams are written to.
pub const DEFAULT_PORT: u16 = 12345;

/// Per-write payload bound. Chunking keeps the buffer size independent
/// of the requested total, so a multi-gigabyte cycle never needs an
/// oversized allocation, and bounds pause latency to one chunk write.
pub const CHUNK_SIZE: usize = 8 * 1024;

pub(crate) const PAYLOAD_BYTE: u8 = b'X';

/// Send-buffer size requested from the kernel for the UDP socket.
pub(crate) const SEND_BUFFER_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeUnit {
    Megabytes,
    Gigabytes,
}

impl SizeUnit {
    pub fn bytes(&self) -> u64 {
        match self {
            SizeUnit::Megabytes => 1024 * 1024,
            SizeUnit::Gigabytes => 1024 * 1024 * 1024,
        }
    }
}

impl FromStr for SizeUnit {
    type Err = TrafficError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MB" => Ok(SizeUnit::Megabytes),
            "GB" => Ok(SizeUnit::Gigabytes),
            other => Err(TrafficError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeUnit::Megabytes => write!(f, "MB"),
            SizeUnit::Gigabytes => write!(f, "GB"),
        }
    }
}

/// User-entered parameters for one send session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendRequest {
    pub destination: String,
    pub magnitude: f64,
    pub unit: SizeUnit,
    pub interval_ms: u64,
    pub port: u16,
}

impl SendRequest {
    pub fn new(destination: impl Into<String>, magnitude: f64, unit: SizeUnit, interval_ms: u64) -> Self {
        Self {
            destination: destination.into(),
            magnitude,
            unit,
            interval_ms,
            port: DEFAULT_PORT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Validated, immutable per-session configuration.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionConfig {
    pub target: SocketAddrV4,
    pub target_bytes: u64,
    pub interval: Duration,
}

/// Point-in-time view of the current session, read under its mutex.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficStatus {
    pub session_id: Option<Uuid>,
    pub running: bool,
    pub bytes_sent: u64,
    pub target_bytes: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub elapsed: Duration,
    pub last_error: Option<String>,
}

impl TrafficStatus {
    /// Snapshot before any session has ever started.
    pub fn idle() -> Self {
        Self {
            session_id: None,
            running: false,
            bytes_sent: 0,
            target_bytes: 0,
            started_at: None,
            elapsed: Duration::ZERO,
            last_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_unit_parsing() {
        assert_eq!("MB".parse::<SizeUnit>().unwrap(), SizeUnit::Megabytes);
        assert_eq!("gb".parse::<SizeUnit>().unwrap(), SizeUnit::Gigabytes);
        assert_eq!(" Mb ".parse::<SizeUnit>().unwrap(), SizeUnit::Megabytes);

        assert!(matches!(
            "TB".parse::<SizeUnit>(),
            Err(TrafficError::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_size_unit_bytes() {
        assert_eq!(SizeUnit::Megabytes.bytes(), 1024 * 1024);
        assert_eq!(SizeUnit::Gigabytes.bytes(), 1024 * 1024 * 1024);
    }

    #[test]
    fn test_request_defaults_to_well_known_port() {
        let request = SendRequest::new("127.0.0.1", 1.0, SizeUnit::Megabytes, 1000);
        assert_eq!(request.port, DEFAULT_PORT);
        assert_eq!(request.with_port(9999).port, 9999);
    }
}
