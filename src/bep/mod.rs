//! # BEP Protocol Module
//!
//! Implementation of the BEP motion controller telemetry protocol.
//!
//! This module handles:
//! - Frame boundary recovery from an unstructured byte stream
//! - Start/end signature validation (no length prefix exists)
//! - Little-endian field decoding of the 80-byte telemetry packet
//! - Resynchronization after corrupt or partial data

pub mod protocol;
pub mod window;
pub mod detector;
pub mod decoder;
