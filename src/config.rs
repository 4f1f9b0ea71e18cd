//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::Deserialize;
use serde::de::Error;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Serial port configuration
///
/// The port path and baud rate are opaque inputs; selecting a device
/// is the job of whatever launches this process.
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Read buffer size for one transport delivery
    #[serde(default = "default_read_chunk_bytes")]
    pub read_chunk_bytes: usize,
}

/// Telemetry output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    /// Frames between status log lines
    #[serde(default = "default_log_interval_frames")]
    pub log_interval_frames: u64,
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyACM0".to_string() }
fn default_baud_rate() -> u32 { 115_200 }
fn default_read_chunk_bytes() -> usize { 256 }

fn default_log_interval_frames() -> u64 { 100 }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            read_chunk_bytes: default_read_chunk_bytes(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_interval_frames: default_log_interval_frames(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            return Err(crate::error::BepLinkError::Config(
                toml::de::Error::custom("serial port cannot be empty")
            ));
        }

        if self.serial.baud_rate == 0 {
            return Err(crate::error::BepLinkError::Config(
                toml::de::Error::custom("baud_rate must be greater than 0")
            ));
        }

        if self.serial.read_chunk_bytes == 0 || self.serial.read_chunk_bytes > 65536 {
            return Err(crate::error::BepLinkError::Config(
                toml::de::Error::custom("read_chunk_bytes must be between 1 and 65536")
            ));
        }

        if self.telemetry.log_interval_frames == 0 {
            return Err(crate::error::BepLinkError::Config(
                toml::de::Error::custom("log_interval_frames must be greater than 0")
            ));
        }

        Ok(())
    }
}
