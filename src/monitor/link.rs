use crate::monitor::types::{LinkMonitorConfig, LinkSample};
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use sysinfo::Networks;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Background sampler of system-wide interface byte counters.
///
/// Feeds the overlay's network-speed panel: every refresh interval it
/// reads the per-interface totals, derives up/down bytes-per-second
/// deltas and publishes a [`LinkSample`]. Stopped cooperatively; the
/// stop flag is polled once per refresh.
pub struct LinkMonitor {
    stop: Arc<AtomicBool>,
    rx: watch::Receiver<LinkSample>,
    task: JoinHandle<()>,
}

impl LinkMonitor {
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: LinkMonitorConfig) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = watch::channel(LinkSample::zero());
        let flag = stop.clone();

        let task = tokio::spawn(async move {
            let mut networks = Networks::new_with_refreshed_list();
            let (mut prev_up, mut prev_down) = interface_totals(&networks);
            let mut last = Instant::now();

            while !flag.load(Ordering::Relaxed) {
                tokio::time::sleep(config.refresh).await;
                if flag.load(Ordering::Relaxed) {
                    break;
                }

                networks.refresh();
                let (up, down) = interface_totals(&networks);
                let dt = last.elapsed().as_secs_f64();
                last = Instant::now();
                if dt <= 0.0 {
                    continue;
                }

                let sample = LinkSample {
                    up_bytes_per_sec: up.saturating_sub(prev_up) as f64 / dt,
                    down_bytes_per_sec: down.saturating_sub(prev_down) as f64 / dt,
                };
                prev_up = up;
                prev_down = down;

                let _ = tx.send(sample);
            }

            tracing::debug!("link monitor stopped");
        });

        Self { stop, rx, task }
    }

    pub fn samples(&self) -> watch::Receiver<LinkSample> {
        self.rx.clone()
    }

    pub fn latest(&self) -> LinkSample {
        *self.rx.borrow()
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for LinkMonitor {
    fn drop(&mut self) {
        self.stop();
        self.task.abort();
    }
}

fn interface_totals(networks: &Networks) -> (u64, u64) {
    networks.iter().fold((0, 0), |(up, down), (_, data)| {
        (up + data.total_transmitted(), down + data.total_received())
    })
}

/// Human-readable throughput, switching from KB/s to MB/s at 1024 KB/s.
pub fn format_speed(bytes_per_sec: f64) -> String {
    let kb = bytes_per_sec / 1024.0;
    if kb >= 1024.0 {
        format!("{:.2} MB/s", kb / 1024.0)
    } else {
        format!("{kb:.2} KB/s")
    }
}

/// The host's outbound IPv4 address, resolved by a routing lookup on a
/// connected UDP socket. No packet is sent.
pub fn local_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect(("203.0.113.1", 9)).ok()?;
    match socket.local_addr().ok()? {
        SocketAddr::V4(addr) => Some(*addr.ip()),
        SocketAddr::V6(_) => None,
    }
}
