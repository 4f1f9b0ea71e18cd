//! # Frame Detector
//!
//! Recovers frame boundaries from the unstructured byte stream.
//!
//! The stream has no length prefix, so the end signature is the only
//! reliable boundary marker. When it appears at the tail of the
//! window, the trailing [`PACKET_LEN`] bytes must open with the start
//! signature; the paired check is a cheap corruption filter in a
//! protocol that carries no checksum. Any validation failure discards
//! the whole window: resynchronization costs at most a few stray
//! bytes and never leaves the detector wedged on garbage.

use super::protocol::{END_SIGNATURE, FRAME_SIGNATURE, PACKET_LEN, RawPacket, SIGNATURE_LEN, WINDOW_CAP};
use super::window::ByteWindow;

/// Incremental frame boundary detector
///
/// Feeds on arbitrarily fragmented byte chunks and yields complete,
/// signature-validated packets. Chunk boundaries carry no meaning;
/// the scan advances one byte at a time, so a frame split across any
/// number of deliveries (or two frames packed into one) decodes the
/// same as a frame arriving whole.
#[derive(Debug)]
pub struct FrameDetector {
    window: ByteWindow,
}

impl FrameDetector {
    /// Create a detector with an empty window
    pub fn new() -> Self {
        Self {
            window: ByteWindow::new(WINDOW_CAP),
        }
    }

    /// Advance the scan by one byte
    ///
    /// Returns a packet when this byte completes a valid frame. On a
    /// framing failure (end signature present but the candidate does
    /// not open with the start signature, or too few bytes retained
    /// to form a candidate) the window is discarded and scanning
    /// resumes from empty.
    pub fn push_byte(&mut self, byte: u8) -> Option<RawPacket> {
        self.window.append(std::slice::from_ref(&byte));

        if self.window.len() < SIGNATURE_LEN {
            return None;
        }

        if self.window.tail(SIGNATURE_LEN) != END_SIGNATURE {
            return None;
        }

        let candidate = self.window.tail(PACKET_LEN);
        if candidate.len() < PACKET_LEN || candidate[..SIGNATURE_LEN] != FRAME_SIGNATURE {
            // Resync: discard everything up to and including the false match
            self.window.reset();
            return None;
        }

        let mut packet: RawPacket = [0; PACKET_LEN];
        packet.copy_from_slice(candidate);

        // A completed frame consumes the entire window, stray leading
        // bytes included
        self.window.reset();
        Some(packet)
    }

    /// Feed a chunk of arriving bytes, collecting every completed frame
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<RawPacket> {
        let mut packets = Vec::new();
        for &byte in chunk {
            if let Some(packet) = self.push_byte(byte) {
                packets.push(packet);
            }
        }
        packets
    }

    /// Discard all accumulated bytes
    ///
    /// Used when a connection closes so no stale bytes carry into the
    /// next session.
    pub fn reset(&mut self) {
        self.window.reset();
    }

    /// Number of bytes currently retained while hunting for a frame
    pub fn pending_len(&self) -> usize {
        self.window.len()
    }
}

impl Default for FrameDetector {
    fn default() -> Self {
        Self::new()
    }
}
