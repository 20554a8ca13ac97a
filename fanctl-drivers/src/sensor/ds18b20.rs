//! DS18B20 protocol helpers
//!
//! The 1-Wire transport is board specific; this module holds the command
//! set and the scratchpad decoding shared by every transport.
//!
//! Scratchpad layout:
//!
//! | Byte | Content                 |
//! |------|-------------------------|
//! | 0-1  | Temperature, LE, 1/16 °C |
//! | 2-3  | Alarm thresholds        |
//! | 4    | Configuration           |
//! | 5-7  | Reserved                |
//! | 8    | CRC-8 over bytes 0-7    |

use fanctl_core::traits::SensorError;

/// Address every device on the bus
pub const SKIP_ROM: u8 = 0xCC;
/// Start a temperature conversion
pub const CONVERT_T: u8 = 0x44;
/// Read the 9-byte scratchpad
pub const READ_SCRATCHPAD: u8 = 0xBE;
/// Write alarm thresholds and configuration
pub const WRITE_SCRATCHPAD: u8 = 0x4E;

/// Configuration register value for 12-bit resolution
pub const RESOLUTION_12_BIT: u8 = 0x7F;

/// Worst-case 12-bit conversion time (ms)
pub const CONVERSION_MS: u32 = 750;

/// Scratchpad length in bytes
pub const SCRATCHPAD_LEN: usize = 9;

/// Dallas/Maxim CRC-8 (polynomial x^8 + x^5 + x^4 + 1, reflected)
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}

/// Decode a scratchpad read into degrees Celsius
///
/// An idle bus reads back all ones and a data line held low reads back all
/// zeros, whose CRC is also zero. Both are reported as a disconnected sensor.
pub fn decode_scratchpad(data: &[u8; SCRATCHPAD_LEN]) -> Result<f32, SensorError> {
    if data.iter().all(|&b| b == 0xFF) || data.iter().all(|&b| b == 0x00) {
        return Err(SensorError::Disconnected);
    }
    if crc8(data) != 0 {
        return Err(SensorError::CrcMismatch);
    }
    let raw = i16::from_le_bytes([data[0], data[1]]);
    Ok(raw as f32 / 16.0)
}

/// Command bytes configuring alarms off and the given resolution
pub fn configure_command(resolution: u8) -> [u8; 5] {
    [SKIP_ROM, WRITE_SCRATCHPAD, 0x00, 0x00, resolution]
}
