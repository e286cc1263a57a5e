//! # Hex Row Utilities
//!
//! Candidate rows are usually captured and exchanged as hex strings, e.g. from
//! a demodulator's debug dump. These helpers parse them and format bytes for logs.
//!
//! ## Usage
//!
//! ```rust
//! use acurite_rs::util::hex::{decode_hex, format_hex_compact, parse_row_spec};
//!
//! let data = decode_hex("10 01 0a 00 00").unwrap();
//! assert_eq!(format_hex_compact(&data), "10 01 0a 00 00");
//!
//! let (bytes, bits) = parse_row_spec("ce1c44b2093f14:56").unwrap();
//! assert_eq!(bytes.len(), 7);
//! assert_eq!(bits, 56);
//! ```

use thiserror::Error;

/// Errors from parsing captured rows written as hex
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Empty row")]
    EmptyString,

    #[error("Row has an odd number of hex digits ({0})")]
    OddLength(usize),

    #[error("Malformed row hex: {0}")]
    Invalid(#[from] hex::FromHexError),

    #[error("Invalid bit count: {0}")]
    InvalidBitCount(String),
}

/// Decode a hex row, ignoring any whitespace between digits.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let digits: String = text.split_whitespace().collect();
    match digits.len() {
        0 => Err(HexError::EmptyString),
        n if n % 2 == 1 => Err(HexError::OddLength(n)),
        _ => Ok(hex::decode(digits)?),
    }
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "10 01 0a 00 00" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a row written as `HEX` or `HEX:BITS`.
///
/// Without an explicit bit count the row is assumed to be fully populated
/// (eight bits per byte).
pub fn parse_row_spec(spec: &str) -> Result<(Vec<u8>, u16), HexError> {
    let (hex_part, bits_part) = match spec.split_once(':') {
        Some((hex_part, bits)) => (hex_part, Some(bits)),
        None => (spec, None),
    };

    let bytes = decode_hex(hex_part)?;
    let bits = match bits_part {
        Some(bits) => bits
            .trim()
            .parse::<u16>()
            .map_err(|_| HexError::InvalidBitCount(bits.to_string()))?,
        None => u16::try_from(bytes.len() * 8)
            .map_err(|_| HexError::InvalidBitCount(bytes.len().to_string()))?,
    };

    Ok((bytes, bits))
}

/// Helper for creating test data from hex strings
///
/// Panics on invalid hex (intended for test code only).
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    decode_hex(hex).expect("Invalid hex in test data")
}
