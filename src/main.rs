//! PariharaNav - reactive obstacle avoidance daemon
//!
//! Receives scan frames over the UDP transport, runs the avoidance
//! controller on each frame, and publishes the resulting velocity commands.
//! One frame is processed to completion at a time; frames arriving during a
//! reverse hold are dropped by the socket.

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use parihara_nav::config::PariharaConfig;
use parihara_nav::controller::AvoidanceController;
use parihara_nav::error::{PariharaError, Result};
use parihara_nav::transport::{UdpCommandSink, UdpScanSource};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("parihara_nav=info".parse().unwrap()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let config = if args.len() > 1 && !args[1].starts_with("--") {
        // Load config from file
        let config_path = Path::new(&args[1]);
        info!("Loading configuration from {:?}", config_path);
        PariharaConfig::load(config_path)?
    } else if Path::new("parihara.toml").exists() {
        info!("Loading configuration from parihara.toml");
        PariharaConfig::load(Path::new("parihara.toml"))?
    } else {
        info!("Using default configuration");
        PariharaConfig::default()
    };

    info!("PariharaNav v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Safety distance {:.2}m, reverse below {:.2}m for {:.1}s",
        config.thresholds.safety_distance,
        config.thresholds.reverse_distance,
        config.thresholds.reverse_duration_secs
    );
    info!(
        "Monitored bearings: front {}, flanks {} / {} (min frame length {})",
        config.bearings.front,
        config.bearings.left_flank,
        config.bearings.right_flank,
        config.bearings.min_frame_len()
    );

    // Wire the transport
    info!("Listening for scans on {}", config.transport.scan_listen);
    info!("Publishing commands to {}", config.transport.command_target);
    let mut scans = UdpScanSource::bind(&config.transport.scan_listen, Duration::from_millis(100))?;
    let mut sink = UdpCommandSink::new(&config.transport.command_target)?;

    let mut controller = AvoidanceController::new(&config);

    // Dispatch loop: one frame at a time, run to completion
    loop {
        let frame = match scans.recv() {
            Ok(Some(frame)) => frame,
            Ok(None) => continue,
            Err(e) => {
                warn!("Scan receive error: {}", e);
                continue;
            }
        };

        match controller.process_frame(&frame, &mut sink) {
            Ok(command) => {
                tracing::debug!(
                    linear = command.linear,
                    angular = command.angular,
                    "Command emitted"
                );
            }
            Err(PariharaError::MalformedScan { required, actual }) => {
                // Already failed closed with a stop command
                warn!(
                    "Short scan frame dropped ({} readings, need {})",
                    actual, required
                );
            }
            Err(e) => return Err(e),
        }
    }
}
