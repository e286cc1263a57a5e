//! Acurite Protocol Constants
//!
//! This module defines the row geometry, field scale factors and lookup tables
//! shared by the validators and the bit-field codec.

/// Capacity in bytes of a single candidate row handed over by the demodulator
pub const ROW_CAPACITY: usize = 34;

/// Maximum number of candidate rows in one demodulation window
pub const MAX_ROWS: usize = 50;

/// Number of bytes the 5n1 frame occupies after repair (7 data bytes + sum)
pub const FIVE_IN_ONE_FRAME_LEN: usize = 8;

/// Byte holding the bit that the demodulator shifts off the front of a 5n1 row
pub const FIVE_IN_ONE_REPAIR_BYTE: usize = 8;

/// Number of leading 5n1 bytes covered by the modular sum
pub const FIVE_IN_ONE_SUM_LEN: usize = 7;

/// 5n1 message type carrying wind speed, wind direction and rain counter
pub const FIVE_IN_ONE_MSG_WIND_RAIN: u8 = 0x01;

/// 5n1 message type carrying wind speed, temperature and humidity
pub const FIVE_IN_ONE_MSG_WIND_TEMP_HUMIDITY: u8 = 0x08;

/// Mask selecting the 5n1 message type from byte 2
pub const FIVE_IN_ONE_MSG_TYPE_MASK: u8 = 0x0F;

/// Number of leading rain gauge bytes inspected by the structural check
pub const RAIN_GAUGE_FRAME_LEN: usize = 5;

/// Number of leading basic TH bytes covered by the sum
pub const TH_SUM_LEN: usize = 4;

/// Number of leading 592TXR bytes covered by the sum
pub const TH592_SUM_LEN: usize = 6;

/// 592TXR bytes protected by an odd-parity bit in bit 7
pub const TH592_PARITY_BYTES: [usize; 3] = [3, 4, 5];

/// Zero offset of the 592TXR temperature field, in tenths of a degree C
pub const TH592_TEMP_OFFSET: i32 = 1000;

/// Zero offset of the 5n1 temperature field, in tenths of a degree F
pub const FIVE_IN_ONE_TEMP_OFFSET: i32 = 400;

/// Rainfall per 5n1 rain counter unit, in inches
pub const RAIN_INCHES_PER_UNIT: f64 = 0.01;

/// Rainfall per rain gauge bucket tip, in millimetres
pub const RAIN_MM_PER_TIP: f64 = 0.5;

/// Modulus of the 14-bit 5n1 rain counter
pub const RAIN_COUNTER_MODULUS: u16 = 1 << 14;

/// Wind direction in degrees for each 4-bit compass index.
///
/// Index 0 is NNW; the points run counter-clockwise down to N at index 15.
pub const WIND_DIRECTIONS: [f64; 16] = [
    337.5, 315.0, 292.5, 270.0, 247.5, 225.0, 202.5, 180.0, 157.5, 135.0, 112.5, 90.0, 67.5,
    45.0, 22.5, 0.0,
];
