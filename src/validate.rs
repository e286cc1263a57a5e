//! # Frame Validation
//!
//! One validator per sensor family. Each takes a candidate row and either
//! rejects it or returns a [`ValidatedRow`]: a normalized copy of the row that
//! the decode step may read from. The caller's row is never modified, so a
//! shared demodulator buffer can be offered to several validators in turn.
//!
//! The integrity checks are deliberately exact copies of the on-air schemes.
//! They are the only thing standing between radio noise and a reading.

use crate::constants::{
    FIVE_IN_ONE_FRAME_LEN, FIVE_IN_ONE_REPAIR_BYTE, FIVE_IN_ONE_SUM_LEN, ROW_CAPACITY,
    TH592_PARITY_BYTES, TH592_SUM_LEN, TH_SUM_LEN,
};
use crate::error::DecodeError;
use crate::protocol::Protocol;

/// A row that passed its protocol's validator.
///
/// Only the validators in this module can construct one, so a reading can
/// never be decoded from unchecked bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedRow {
    protocol: Protocol,
    bytes: [u8; ROW_CAPACITY],
}

impl ValidatedRow {
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The normalized bytes (after any repair the protocol requires).
    pub fn bytes(&self) -> &[u8; ROW_CAPACITY] {
        &self.bytes
    }

    /// The bytes that make up the protocol's frame.
    pub fn frame(&self) -> &[u8] {
        &self.bytes[..self.protocol.frame_len()]
    }
}

/// Sum of `bytes` modulo 256.
pub fn modular_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
}

/// Odd parity over the low seven bits, carried in bit 7.
///
/// Bit 7 must be set exactly when the low seven bits hold an odd number of ones.
pub fn parity_ok(byte: u8) -> bool {
    ((byte & 0x7F).count_ones() & 1) as u8 == byte >> 7
}

/// Undo the 5n1 line inversion.
///
/// The demodulator delivers the 5n1 frame with every bit inverted and the first
/// bit shifted off into byte 8, so the first eight bytes are complemented and
/// byte 8 is folded back into byte 0.
pub fn five_in_one_normalize(row: &[u8; ROW_CAPACITY]) -> [u8; ROW_CAPACITY] {
    let mut normalized = *row;
    for byte in normalized.iter_mut().take(FIVE_IN_ONE_REPAIR_BYTE) {
        *byte = !*byte;
    }
    normalized[0] |= normalized[FIVE_IN_ONE_REPAIR_BYTE];
    normalized
}

/// Acurite 5n1 weather station: inverted row, sum of bytes 0..6 in byte 7.
pub fn validate_five_in_one(row: &[u8; ROW_CAPACITY]) -> Result<ValidatedRow, DecodeError> {
    if row[0] == 0x00 {
        return Err(DecodeError::StructuralMismatch("empty row"));
    }

    let bytes = five_in_one_normalize(row);
    let calculated = modular_sum(&bytes[..FIVE_IN_ONE_SUM_LEN]);
    let expected = bytes[FIVE_IN_ONE_FRAME_LEN - 1];
    if calculated != expected {
        return Err(DecodeError::ChecksumMismatch { expected, calculated });
    }

    Ok(ValidatedRow {
        protocol: Protocol::FiveInOne,
        bytes,
    })
}

/// Acurite 896 rain gauge: structural check only.
///
/// Bytes 0..2 must be non-zero and bytes 3 and 4 zero. There is no checksum on
/// this wire format, so some noise will get through.
pub fn validate_rain_gauge(row: &[u8; ROW_CAPACITY]) -> Result<ValidatedRow, DecodeError> {
    if row[..3].iter().any(|&b| b == 0) {
        return Err(DecodeError::StructuralMismatch("zero byte in rain gauge header"));
    }
    if row[3] != 0 || row[4] != 0 {
        return Err(DecodeError::StructuralMismatch("non-zero rain gauge trailer"));
    }

    Ok(ValidatedRow {
        protocol: Protocol::RainGauge,
        bytes: *row,
    })
}

/// Acurite temperature/humidity sensor: sum of bytes 0..3 in byte 4.
pub fn validate_th(row: &[u8; ROW_CAPACITY]) -> Result<ValidatedRow, DecodeError> {
    if row[TH_SUM_LEN + 1] != 0 {
        return Err(DecodeError::StructuralMismatch("extra data after checksum"));
    }

    let calculated = modular_sum(&row[..TH_SUM_LEN]);
    if calculated == 0 {
        return Err(DecodeError::StructuralMismatch("empty row"));
    }
    let expected = row[TH_SUM_LEN];
    if calculated != expected {
        return Err(DecodeError::ChecksumMismatch { expected, calculated });
    }

    Ok(ValidatedRow {
        protocol: Protocol::Th,
        bytes: *row,
    })
}

/// Acurite 00592TXR: sum of bytes 0..5 in byte 6, plus odd parity on the
/// humidity and temperature bytes.
pub fn validate_th592(row: &[u8; ROW_CAPACITY]) -> Result<ValidatedRow, DecodeError> {
    if row[0] == 0x00 {
        return Err(DecodeError::StructuralMismatch("empty row"));
    }
    if row[TH592_SUM_LEN + 1] != 0 {
        return Err(DecodeError::StructuralMismatch("extra data after checksum"));
    }

    let calculated = modular_sum(&row[..TH592_SUM_LEN]);
    let expected = row[TH592_SUM_LEN];
    if calculated != expected {
        return Err(DecodeError::ChecksumMismatch { expected, calculated });
    }

    if let Some(&index) = TH592_PARITY_BYTES.iter().find(|&&i| !parity_ok(row[i])) {
        return Err(DecodeError::ParityMismatch {
            index,
            value: row[index],
        });
    }

    Ok(ValidatedRow {
        protocol: Protocol::Th592,
        bytes: *row,
    })
}
