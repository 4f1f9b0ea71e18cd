//! # Error Types
//!
//! Custom error types for BEP Link using `thiserror`.

use thiserror::Error;

/// Main error type for BEP Link
#[derive(Debug, Error)]
pub enum BepLinkError {
    /// Serial port errors (open/configure failures)
    #[error("Serial port error: {0}")]
    Serial(String),

    /// Transport errors reported by the byte stream while a link is open
    #[error("Transport error: {0}")]
    Transport(String),

    /// A session is already running on this channel
    #[error("Link is already connected")]
    AlreadyConnected,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for BEP Link
pub type Result<T> = std::result::Result<T, BepLinkError>;
