//! # Telemetry Module
//!
//! Delivers decoded telemetry frames to consumers.
//!
//! This module handles:
//! - Connection lifecycle to the serial byte stream (open/close/error)
//! - Feeding arriving chunks through the frame detector
//! - Publishing frames with latest-value semantics (each new frame
//!   replaces the previous one; no queue or history)

pub mod channel;

pub use channel::{LinkStatus, TelemetryChannel};
