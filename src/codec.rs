//! # Bit-Field Codec
//!
//! Pure functions that pull physical quantities out of fixed byte positions of
//! an already validated frame. Nothing here checks integrity or holds state;
//! callers pass the bytes named in each protocol's layout.
//!
//! Most fields on these sensors are packed into the low seven bits of each byte
//! because bit 7 is either a start marker (5n1) or a parity bit (592TXR).
//!
//! ```rust
//! use acurite_rs::codec::{th_temperature_c, wind_direction};
//!
//! assert_eq!(th_temperature_c(0x01, 0xF4), 50.0);
//! assert_eq!(wind_direction(0x0B), 90.0);
//! ```

use crate::constants::{
    FIVE_IN_ONE_MSG_TYPE_MASK, FIVE_IN_ONE_TEMP_OFFSET, RAIN_MM_PER_TIP, TH592_TEMP_OFFSET,
    WIND_DIRECTIONS,
};

/// 5n1 temperature in °F (documented range -40 to 158).
pub fn five_in_one_temperature_f(high: u8, low: u8) -> f64 {
    let raw = (((high & 0x0F) as i32) << 7) | (low & 0x7F) as i32;
    (raw - FIVE_IN_ONE_TEMP_OFFSET) as f64 / 10.0
}

/// Basic TH temperature in °C.
///
/// The 12-bit field is two's complement; it is placed in the top of a 16-bit
/// word and shifted back arithmetically to sign-extend it.
pub fn th_temperature_c(byte1: u8, byte2: u8) -> f64 {
    let shifted = ((((byte1 & 0x0F) as u16) << 8) | byte2 as u16) << 4;
    ((shifted as i16) >> 4) as f64 / 10.0
}

/// 592TXR temperature in °C, encoded as `(C + 100) * 10` over 14 bits.
pub fn th592_temperature_c(high: u8, low: u8) -> f64 {
    let raw = (((high & 0x7F) as i32) << 7) | (low & 0x7F) as i32;
    (raw - TH592_TEMP_OFFSET) as f64 / 10.0
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// 5n1 wind speed.
///
/// The unit is uncalibrated: a raw 49 has been observed as 41 km/h on the
/// reference display, so the value is reported as-is without scaling.
pub fn wind_speed(high: u8, low: u8) -> u8 {
    ((high & 0x1F) << 3) | ((low & 0x70) >> 4)
}

/// Wind direction in degrees for the compass index in the low nibble.
pub fn wind_direction(byte: u8) -> f64 {
    WIND_DIRECTIONS[(byte & 0x0F) as usize]
}

/// Relative humidity in percent (1 to 99).
pub fn humidity(byte: u8) -> u8 {
    byte & 0x7F
}

/// Raw 14-bit 5n1 rain counter (0.01 in per unit).
pub fn rain_counter(high: u8, low: u8) -> u16 {
    (((high & 0x7F) as u16) << 7) | (low & 0x7F) as u16
}

/// Rain gauge running total in millimetres (0.5 mm per bucket tip).
pub fn rain_gauge_total_mm(byte1: u8, byte2: u8) -> f64 {
    let tips = (((byte1 & 0x0F) as u16) << 8) + byte2 as u16;
    tips as f64 * RAIN_MM_PER_TIP
}

/// 5n1 message type from the low nibble of byte 2.
pub fn message_type(byte2: u8) -> u8 {
    byte2 & FIVE_IN_ONE_MSG_TYPE_MASK
}

/// 592TXR channel letter selected by the switch in the battery compartment.
///
/// The switch drives the top two bits of the sensor ID byte.
pub fn th592_channel(sensor_id: u8) -> Option<char> {
    match sensor_id >> 6 {
        0b11 => Some('A'),
        0b10 => Some('B'),
        0b00 => Some('C'),
        _ => None,
    }
}
