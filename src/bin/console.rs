use deskpulse::overlay::OverlayController;
use deskpulse::traffic::{SendRequest, SizeUnit};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    deskpulse::metrics::init_metrics();

    println!("deskpulse - console walkthrough");
    println!("================================\n");

    let mut overlay = OverlayController::headless();

    // Memory manager
    println!("Memory manager");
    println!("--------------");
    overlay.open_ledger_panel();
    println!("  {}", overlay.grow_memory(128));
    println!("  {}", overlay.grow_memory(64));
    println!("  {}", overlay.reduce_memory(100));
    for line in overlay.memory_summary().lines() {
        println!("  {line}");
    }

    // Network speed panel
    println!("\nNetwork speed");
    println!("-------------");
    overlay.open_throughput_panel();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    println!("  {}", overlay.throughput_text());
    println!("  {}", overlay.local_ip_text());

    // Traffic generator against a local receiver so sends cannot fail
    println!("\nTraffic generator");
    println!("-----------------");
    let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await?;
    let port = receiver.local_addr()?.port();

    overlay.open_sender_panel();
    let request = SendRequest::new("127.0.0.1", 8.0, SizeUnit::Megabytes, 500).with_port(port);
    println!("  {}", overlay.start_sending(&request));

    for _ in 0..3 {
        tokio::time::sleep(Duration::from_secs(1)).await;
        println!("  {}", overlay.sender_status_text());
    }

    println!("  {}", overlay.pause_sending());
    let status = overlay.traffic().status();
    println!(
        "  Final: {} bytes sent over {:.1}s",
        status.bytes_sent,
        status.elapsed.as_secs_f64()
    );

    overlay.shutdown();
    println!("\nDone.");
    Ok(())
}
