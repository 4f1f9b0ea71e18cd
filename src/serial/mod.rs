//! # Serial Communication Module
//!
//! Opens the serial link to the BEP controller.
//!
//! This module handles:
//! - Opening the configured port at the configured baud rate (8N1)
//! - Exposing the port as a [`ByteSource`] for the telemetry channel
//!
//! Port enumeration and selection live outside this crate; the port
//! path and baud rate arrive as opaque configuration.

pub mod byte_source;

use async_trait::async_trait;
use std::io;
use tokio::io::AsyncReadExt;
use tokio_serial::SerialPortBuilderExt;
use tracing::debug;

use crate::config::SerialConfig;
use crate::error::{BepLinkError, Result};

pub use byte_source::ByteSource;

/// Serial port handle for a BEP controller
///
/// Wraps the opened stream together with the path it was opened at.
pub struct BepSerial {
    /// Serial port handle
    port: tokio_serial::SerialStream,
    /// Device path (e.g., /dev/ttyACM0)
    device_path: String,
}

impl std::fmt::Debug for BepSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BepSerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl BepSerial {
    /// Open the configured serial port with controller settings (8N1)
    ///
    /// # Errors
    ///
    /// Returns [`BepLinkError::Serial`] if the port cannot be opened
    /// or configured.
    pub fn open(config: &SerialConfig) -> Result<Self> {
        debug!("Opening serial port: {} @ {} baud", config.port, config.baud_rate);

        let port = tokio_serial::new(&config.port, config.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| BepLinkError::Serial(format!("Failed to open {}: {}", config.port, e)))?;

        Ok(Self {
            port,
            device_path: config.port.clone(),
        })
    }

    /// Path of the opened device
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

#[async_trait]
impl ByteSource for BepSerial {
    async fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf).await
    }
}
