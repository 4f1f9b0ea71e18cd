//! # Telemetry Packet Decoder
//!
//! Turns a signature-validated 80-byte packet into a [`TelemetryFrame`].
//!
//! Packet layout (all multi-byte values little-endian):
//!
//! | offset | width | field          |
//! |--------|-------|----------------|
//! | 0      | 8     | start signature |
//! | 8      | 4     | global_time (u32) |
//! | 12     | 2     | count (u16)    |
//! | 14     | 2     | global_version (u16) |
//! | 16     | 2     | number (u16)   |
//! | 18     | 2     | version (u16)  |
//! | 20     | 4     | time (u32)     |
//! | 24     | 4     | yaw (f32)      |
//! | 28     | 4     | pitch (f32)    |
//! | 32     | 4     | roll (f32)     |
//! | 36     | 2     | x_accel (i16)  |
//! | 38     | 2     | y_accel (i16)  |
//! | 40     | 2     | z_accel (i16)  |
//! | 48     | 4     | joy_x (f32)    |
//! | 52     | 4     | joy_y (f32)    |
//! | 56     | 1     | buttons, bits 0-3 |
//! | 72     | 8     | end signature  |

use super::protocol::{RawPacket, TelemetryFrame};

/// Decode one telemetry packet
///
/// Pure and total over 80-byte input: every offset is in-bounds by
/// construction, so no error path exists. The caller guarantees the
/// packet already passed signature validation; signature bytes are
/// not re-inspected here.
pub fn decode_packet(packet: &RawPacket) -> TelemetryFrame {
    TelemetryFrame {
        global_time: u32::from_le_bytes([packet[8], packet[9], packet[10], packet[11]]),
        count: u16::from_le_bytes([packet[12], packet[13]]),
        global_version: u16::from_le_bytes([packet[14], packet[15]]),
        number: u16::from_le_bytes([packet[16], packet[17]]),
        version: u16::from_le_bytes([packet[18], packet[19]]),
        time: u32::from_le_bytes([packet[20], packet[21], packet[22], packet[23]]),
        yaw: f32::from_le_bytes([packet[24], packet[25], packet[26], packet[27]]),
        pitch: f32::from_le_bytes([packet[28], packet[29], packet[30], packet[31]]),
        roll: f32::from_le_bytes([packet[32], packet[33], packet[34], packet[35]]),
        x_accel: i16::from_le_bytes([packet[36], packet[37]]),
        y_accel: i16::from_le_bytes([packet[38], packet[39]]),
        z_accel: i16::from_le_bytes([packet[40], packet[41]]),
        joy_x: f32::from_le_bytes([packet[48], packet[49], packet[50], packet[51]]),
        joy_y: f32::from_le_bytes([packet[52], packet[53], packet[54], packet[55]]),
        buttons: decode_buttons(packet[56]),
    }
}

/// Split the button byte into four independent states, LSB first
fn decode_buttons(byte: u8) -> [bool; 4] {
    [
        byte & 0b0000_0001 != 0,
        byte & 0b0000_0010 != 0,
        byte & 0b0000_0100 != 0,
        byte & 0b0000_1000 != 0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bep::protocol::{END_SIGNATURE, FRAME_SIGNATURE, PACKET_LEN, SIGNATURE_LEN};

    fn build_packet(fill: impl Fn(&mut RawPacket)) -> RawPacket {
        let mut packet: RawPacket = [0; PACKET_LEN];
        packet[..SIGNATURE_LEN].copy_from_slice(&FRAME_SIGNATURE);
        packet[PACKET_LEN - SIGNATURE_LEN..].copy_from_slice(&END_SIGNATURE);
        fill(&mut packet);
        packet
    }

    #[test]
    fn test_decode_zero_payload() {
        let packet = build_packet(|_| {});
        let frame = decode_packet(&packet);

        assert_eq!(frame.global_time, 0);
        assert_eq!(frame.count, 0);
        assert_eq!(frame.global_version, 0);
        assert_eq!(frame.number, 0);
        assert_eq!(frame.version, 0);
        assert_eq!(frame.time, 0);
        assert_eq!(frame.yaw, 0.0);
        assert_eq!(frame.pitch, 0.0);
        assert_eq!(frame.roll, 0.0);
        assert_eq!(frame.x_accel, 0);
        assert_eq!(frame.y_accel, 0);
        assert_eq!(frame.z_accel, 0);
        assert_eq!(frame.joy_x, 0.0);
        assert_eq!(frame.joy_y, 0.0);
        assert_eq!(frame.buttons, [false; 4]);
    }

    #[test]
    fn test_decode_unsigned_fields_little_endian() {
        let packet = build_packet(|p| {
            p[8..12].copy_from_slice(&1000u32.to_le_bytes());
            p[12..14].copy_from_slice(&513u16.to_le_bytes());
            p[14..16].copy_from_slice(&2u16.to_le_bytes());
            p[16..18].copy_from_slice(&7u16.to_le_bytes());
            p[18..20].copy_from_slice(&3u16.to_le_bytes());
            p[20..24].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        });
        let frame = decode_packet(&packet);

        assert_eq!(frame.global_time, 1000);
        assert_eq!(frame.count, 513);
        assert_eq!(frame.global_version, 2);
        assert_eq!(frame.number, 7);
        assert_eq!(frame.version, 3);
        assert_eq!(frame.time, 0xDEAD_BEEF);
    }

    #[test]
    fn test_decode_byte_order_is_little_endian() {
        // 0x01 in the low byte, 0x02 in the high byte
        let packet = build_packet(|p| {
            p[12] = 0x01;
            p[13] = 0x02;
        });
        let frame = decode_packet(&packet);

        assert_eq!(frame.count, 0x0201);
    }

    #[test]
    fn test_decode_orientation_floats() {
        let packet = build_packet(|p| {
            p[24..28].copy_from_slice(&90.5f32.to_le_bytes());
            p[28..32].copy_from_slice(&(-45.25f32).to_le_bytes());
            p[32..36].copy_from_slice(&180.0f32.to_le_bytes());
        });
        let frame = decode_packet(&packet);

        assert_eq!(frame.yaw, 90.5);
        assert_eq!(frame.pitch, -45.25);
        assert_eq!(frame.roll, 180.0);
    }

    #[test]
    fn test_decode_signed_accelerometer() {
        let packet = build_packet(|p| {
            p[36..38].copy_from_slice(&(-5i16).to_le_bytes());
            p[38..40].copy_from_slice(&32767i16.to_le_bytes());
            p[40..42].copy_from_slice(&(-32768i16).to_le_bytes());
        });
        let frame = decode_packet(&packet);

        assert_eq!(frame.x_accel, -5);
        assert_eq!(frame.y_accel, 32767);
        assert_eq!(frame.z_accel, -32768);
    }

    #[test]
    fn test_decode_joystick_axes() {
        let packet = build_packet(|p| {
            p[48..52].copy_from_slice(&0.75f32.to_le_bytes());
            p[52..56].copy_from_slice(&(-1.0f32).to_le_bytes());
        });
        let frame = decode_packet(&packet);

        assert_eq!(frame.joy_x, 0.75);
        assert_eq!(frame.joy_y, -1.0);
    }

    #[test]
    fn test_decode_buttons_bit_pattern() {
        let packet = build_packet(|p| p[56] = 0b0000_1011);
        let frame = decode_packet(&packet);

        assert_eq!(frame.buttons, [true, true, false, true]);
    }

    #[test]
    fn test_decode_buttons_ignores_high_bits() {
        // Bits 4-7 carry no button state
        let packet = build_packet(|p| p[56] = 0b1111_0000);
        let frame = decode_packet(&packet);

        assert_eq!(frame.buttons, [false; 4]);
    }

    #[test]
    fn test_decode_matches_direct_offset_decoding_of_filler() {
        // Arbitrary filler between the signatures; every field must
        // come straight from its table offset
        let packet = build_packet(|p| {
            for (i, b) in p[SIGNATURE_LEN..PACKET_LEN - SIGNATURE_LEN].iter_mut().enumerate() {
                *b = (i * 7 + 3) as u8;
            }
        });
        let frame = decode_packet(&packet);

        assert_eq!(
            frame.global_time,
            u32::from_le_bytes([packet[8], packet[9], packet[10], packet[11]])
        );
        assert_eq!(frame.version, u16::from_le_bytes([packet[18], packet[19]]));
        assert_eq!(
            frame.yaw.to_bits(),
            f32::from_le_bytes([packet[24], packet[25], packet[26], packet[27]]).to_bits()
        );
        assert_eq!(frame.z_accel, i16::from_le_bytes([packet[40], packet[41]]));
        assert_eq!(frame.buttons[0], packet[56] & 1 != 0);
    }
}
