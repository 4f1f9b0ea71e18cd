//! # BEP Link
//!
//! Read a BEP motion controller over serial and log its decoded
//! telemetry frames.
//!
//! Connects to the configured port, scans the byte stream for frames
//! and prints a status line every N frames. Intended both as a working
//! monitor and as the reference consumer of the library.

use anyhow::Result;
use tracing::{debug, info, warn};
use tracing_subscriber;

mod config;
mod error;
mod bep;
mod serial;
mod telemetry;

use config::Config;
use telemetry::TelemetryChannel;

/// Main entry point for the BEP Link monitor
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Load configuration from the optional path in argv, else defaults
///    - Connect the telemetry channel to the configured serial port
///
/// 2. **Main Loop**
///    - Log a status line every `log_interval_frames` decoded frames
///    - Emit each frame as a JSON debug line
///    - Exit when the link closes or on Ctrl+C
///
/// 3. **Shutdown**
///    - Disconnect the channel (detaches the stream, resets state)
///    - Log total frame count
///
/// # Errors
///
/// Returns error if the configuration file is invalid. Serial open
/// failures surface through the link status and end the process with
/// a log line rather than a panic.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .init();

    info!("BEP Link v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut channel = TelemetryChannel::new();
    channel.connect(&config.serial)?;
    info!("Connecting to {} @ {} baud", config.serial.port, config.serial.baud_rate);

    let mut frames = channel.frames();
    let mut status = channel.status();
    let log_interval = config.telemetry.log_interval_frames;

    let mut frame_count: u64 = 0;
    let mut was_opened = false;

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(frame) = *frames.borrow_and_update() else { continue };

                frame_count += 1;
                if frame_count % log_interval == 0 {
                    info!(
                        "Frame {}: yaw={:.1} pitch={:.1} roll={:.1} joy=({:.2}, {:.2}) buttons={:?}",
                        frame_count, frame.yaw, frame.pitch, frame.roll,
                        frame.joy_x, frame.joy_y, frame.buttons,
                    );
                }
                debug!("{}", serde_json::to_string(&frame).unwrap_or_default());
            }

            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = (*status.borrow_and_update()).clone();

                if current.opened && !was_opened {
                    info!("Link opened");
                    was_opened = true;
                } else if !current.opened && was_opened {
                    if let Some(err) = &current.last_error {
                        warn!("Link lost: {}", err);
                    } else {
                        info!("Link closed by device");
                    }
                    break;
                } else if !current.opened && !current.connecting {
                    if let Some(err) = &current.last_error {
                        warn!("Connect failed: {}", err);
                    }
                    break;
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    channel.disconnect().await;
    info!("Total frames decoded: {}", frame_count);

    Ok(())
}
