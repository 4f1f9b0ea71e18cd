//! # BEP Link Library
//!
//! Decode motion telemetry from a BEP serial motion controller.
//!
//! This library recovers 80-byte telemetry frames from the controller's
//! raw serial byte stream (no length prefix; frames are bounded by magic
//! signatures) and publishes them to subscribers with latest-value
//! semantics.

pub mod config;
pub mod error;
pub mod bep;
pub mod serial;
pub mod telemetry;
