use crate::monitor::rate::RateMonitor;
use crate::monitor::types::RateReport;
use crate::traffic::error::{TrafficError, TrafficResult};
use crate::traffic::types::{
    SendRequest, SessionConfig, TrafficStatus, CHUNK_SIZE, PAYLOAD_BYTE, SEND_BUFFER_BYTES,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::UdpSocket;
use tokio::sync::watch;
use uuid::Uuid;

/// State shared between the send loop, the rate monitor and the
/// control surface. Guarded by one mutex.
#[derive(Debug)]
struct SessionShared {
    running: bool,
    bytes_sent: u64,
    started_at: Instant,
    last_error: Option<String>,
}

/// One `start()`..`pause()`-or-failure lifetime of the generator.
///
/// Sessions are replaced, never merged: a new `start()` allocates a
/// fresh session and cancels the old one, so a loop that has not yet
/// observed cancellation can only touch its own retired counter.
#[derive(Debug)]
pub struct SendSession {
    id: Uuid,
    config: SessionConfig,
    started_wall: DateTime<Utc>,
    shared: Mutex<SessionShared>,
}

impl SendSession {
    fn new(config: SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            started_wall: Utc::now(),
            shared: Mutex::new(SessionShared {
                running: true,
                bytes_sent: 0,
                started_at: Instant::now(),
                last_error: None,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().running
    }

    pub fn snapshot(&self) -> TrafficStatus {
        let shared = self.shared.lock();
        TrafficStatus {
            session_id: Some(self.id),
            running: shared.running,
            bytes_sent: shared.bytes_sent,
            target_bytes: self.config.target_bytes,
            started_at: Some(self.started_wall),
            elapsed: shared.started_at.elapsed(),
            last_error: shared.last_error.clone(),
        }
    }

    fn cancel(&self) {
        self.shared.lock().running = false;
    }

    fn add_bytes(&self, n: u64) {
        self.shared.lock().bytes_sent += n;
    }

    fn fail(&self, error: String) {
        let mut shared = self.shared.lock();
        shared.running = false;
        shared.last_error = Some(error);
    }
}

/// Controllable UDP datagram stream toward a single destination.
///
/// `Idle -> Sending -> Idle` (paused or fatal send error); restartable
/// indefinitely.
#[derive(Debug, Default)]
pub struct TrafficGenerator {
    session: RwLock<Option<Arc<SendSession>>>,
    rate_rx: RwLock<Option<watch::Receiver<RateReport>>>,
}

impl TrafficGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `request` and launch a new send session.
    ///
    /// Returns immediately once the send loop and its rate monitor are
    /// spawned. On a validation error nothing changes — a session that
    /// was already sending keeps sending. Transmission errors are not
    /// returned here; they surface through [`TrafficGenerator::status`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, request: &SendRequest) -> TrafficResult<()> {
        let config = validate(request)?;
        let session = Arc::new(SendSession::new(config));

        let previous = self.session.write().replace(session.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        tracing::info!(
            session = %session.id,
            target = %config.target,
            target_bytes = config.target_bytes,
            "starting send session"
        );
        crate::metrics::record_session_started();

        *self.rate_rx.write() = Some(RateMonitor::spawn(session.clone()));
        tokio::spawn(send_loop(session));

        Ok(())
    }

    /// Request cancellation of the current session. Idempotent.
    ///
    /// Returns without waiting for the loop to observe the flag; the
    /// lag is bounded by one in-flight chunk write.
    pub fn pause(&self) {
        if let Some(session) = self.session.read().as_ref() {
            session.cancel();
        }
    }

    pub fn status(&self) -> TrafficStatus {
        match self.session.read().as_ref() {
            Some(session) => session.snapshot(),
            None => TrafficStatus::idle(),
        }
    }

    /// Receiver for the current session's rate reports, if any session
    /// has been started. Each `start()` replaces the channel.
    pub fn rate_reports(&self) -> Option<watch::Receiver<RateReport>> {
        self.rate_rx.read().clone()
    }
}

fn validate(request: &SendRequest) -> TrafficResult<SessionConfig> {
    let ip: Ipv4Addr = request
        .destination
        .trim()
        .parse()
        .map_err(|_| TrafficError::InvalidAddress(request.destination.clone()))?;

    if !request.magnitude.is_finite() || request.magnitude <= 0.0 {
        return Err(TrafficError::InvalidMagnitude(request.magnitude));
    }
    let target_bytes = (request.magnitude * request.unit.bytes() as f64) as u64;
    if target_bytes == 0 {
        return Err(TrafficError::InvalidMagnitude(request.magnitude));
    }

    Ok(SessionConfig {
        target: SocketAddrV4::new(ip, request.port),
        target_bytes,
        interval: std::time::Duration::from_millis(request.interval_ms),
    })
}

async fn send_loop(session: Arc<SendSession>) {
    let socket = match bind_socket(session.config.target).await {
        Ok(socket) => socket,
        Err(e) => {
            tracing::warn!(session = %session.id, "socket setup failed: {}", e);
            crate::metrics::record_send_failure();
            session.fail(format!("Socket setup failed: {e}"));
            return;
        }
    };

    let payload = Bytes::from(vec![PAYLOAD_BYTE; CHUNK_SIZE]);

    while session.is_running() {
        let mut sent_in_cycle: u64 = 0;

        while sent_in_cycle < session.config.target_bytes && session.is_running() {
            let remaining = session.config.target_bytes - sent_in_cycle;
            let len = remaining.min(CHUNK_SIZE as u64) as usize;

            match socket.send(&payload[..len]).await {
                Ok(n) => {
                    session.add_bytes(n as u64);
                    sent_in_cycle += n as u64;
                    crate::metrics::record_chunk_sent(n);
                }
                Err(e) => {
                    tracing::warn!(session = %session.id, "send failed: {}", e);
                    crate::metrics::record_send_failure();
                    session.fail(format!("Send failed: {e}"));
                    return;
                }
            }
        }

        if !session.is_running() {
            break;
        }
        crate::metrics::record_cycle_complete();

        tokio::time::sleep(session.config.interval).await;
    }

    tracing::debug!(session = %session.id, "send loop exited");
}

async fn bind_socket(target: SocketAddrV4) -> std::io::Result<UdpSocket> {
    use socket2::{Domain, Protocol, Socket, Type};

    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_send_buffer_size(SEND_BUFFER_BYTES)?;
    socket.bind(&SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)).into())?;
    socket.set_nonblocking(true)?;

    let socket = UdpSocket::from_std(socket.into())?;
    socket.connect(SocketAddr::V4(target)).await?;
    Ok(socket)
}
