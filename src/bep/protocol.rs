//! # BEP Protocol Constants and Types
//!
//! Core protocol definitions for BEP motion controller telemetry.
//!
//! A telemetry packet is a fixed 80 bytes bounded by two 8-byte magic
//! signatures. There is no length prefix and no checksum; integrity is
//! established by requiring both signatures to be present at the
//! expected distance from each other.

use serde::Serialize;

/// Length of the start/end magic signatures
pub const SIGNATURE_LEN: usize = 8;

/// Frame start signature
///
/// The trailing `\r\n\x1a\n` guard bytes detect line-ending mangling
/// and truncation on the transport, in the same spirit as the PNG
/// magic number.
pub const FRAME_SIGNATURE: [u8; SIGNATURE_LEN] =
    [0x94, b'B', b'E', b'P', 0x0D, 0x0A, 0x1A, 0x0A];

/// Frame end signature (first byte differs from the start signature)
pub const END_SIGNATURE: [u8; SIGNATURE_LEN] =
    [0x95, b'B', b'E', b'P', 0x0D, 0x0A, 0x1A, 0x0A];

/// Total size of one telemetry packet, signatures included
pub const PACKET_LEN: usize = 80;

/// Maximum number of raw bytes retained while hunting for a frame
///
/// Two packets worth of stream. Older bytes can never contribute to a
/// future frame, so they are dropped first.
pub const WINDOW_CAP: usize = 160;

/// A complete, signature-validated telemetry packet
pub type RawPacket = [u8; PACKET_LEN];

/// Number of decoded button states (bits 0-3 of the button byte)
pub const BUTTON_COUNT: usize = 4;

/// One decoded telemetry frame from the controller
///
/// Constructed atomically by [`crate::bep::decoder::decode_packet`]
/// once a packet has passed signature validation; immutable afterwards.
/// All multi-byte fields are little-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryFrame {
    /// Milliseconds since the device powered on
    pub global_time: u32,

    /// Running frame counter
    pub count: u16,

    /// Firmware revision of the base unit
    pub global_version: u16,

    /// Controller number (multi-controller setups)
    pub number: u16,

    /// Firmware revision of the controller
    pub version: u16,

    /// Milliseconds since the controller connected
    pub time: u32,

    /// Orientation yaw in degrees
    pub yaw: f32,

    /// Orientation pitch in degrees
    pub pitch: f32,

    /// Orientation roll in degrees
    pub roll: f32,

    /// Accelerometer X axis, raw sensor units
    pub x_accel: i16,

    /// Accelerometer Y axis, raw sensor units
    pub y_accel: i16,

    /// Accelerometer Z axis, raw sensor units
    pub z_accel: i16,

    /// Joystick X axis, -1.0 to 1.0
    pub joy_x: f32,

    /// Joystick Y axis, -1.0 to 1.0
    pub joy_y: f32,

    /// Button states, least-significant bit first
    pub buttons: [bool; BUTTON_COUNT],
}
