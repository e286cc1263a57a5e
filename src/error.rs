//! # Decode Error Handling
//!
//! This module defines the error types produced while validating and decoding
//! candidate rows. None of them are fatal: most candidate rows are noise, and a
//! rejection simply means "no match" for that protocol on that row.

use thiserror::Error;

/// Represents the ways a candidate row can fail to produce a reading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The embedded sum does not match the sum computed over the frame.
    #[error("Invalid checksum: expected 0x{expected:02X}, calculated 0x{calculated:02X}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// A parity-protected byte has the wrong parity bit.
    #[error("Parity mismatch in byte {index}: 0x{value:02X}")]
    ParityMismatch { index: usize, value: u8 },

    /// The zero/non-zero byte pattern does not fit the frame layout.
    #[error("Structural mismatch: {0}")]
    StructuralMismatch(&'static str),

    /// The frame validated but its message type has no known layout.
    #[error("Unknown message subtype: 0x{0:02X}")]
    UnknownSubtype(u8),

    /// The row carries fewer bits than the protocol requires.
    #[error("Row too short: need at least {needed} bits, got {actual}")]
    RowTooShort { needed: u16, actual: u16 },

    /// A row handed to the batch does not fit the row capacity.
    #[error("Row too long: capacity {capacity} bytes, got {actual}")]
    RowTooLong { capacity: usize, actual: usize },

    /// The batch already holds the maximum number of rows.
    #[error("Batch full: capacity {capacity} rows")]
    BatchFull { capacity: usize },
}

impl DecodeError {
    /// Whether this is an ordinary row rejection rather than caller misuse
    /// while assembling a batch.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            DecodeError::RowTooLong { .. } | DecodeError::BatchFull { .. }
        )
    }
}

/// Errors raised while loading a decoder configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown protocol key: {0}")]
    UnknownProtocol(String),
}
