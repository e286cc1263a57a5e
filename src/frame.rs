//! # Candidate Frames
//!
//! A [`CandidateFrame`] is one demodulation window worth of candidate rows as
//! produced by an external pulse-width demodulator. Each row is a fixed-capacity
//! byte buffer (zero padded, like the demodulator's own bit buffer) paired with
//! the number of bits the demodulator actually clocked into it.
//!
//! ```rust
//! use acurite_rs::frame::CandidateFrame;
//!
//! let mut frame = CandidateFrame::new();
//! frame.push_row(&[0x10, 0x00, 0x0A, 0x00, 0x00], 40).unwrap();
//! assert_eq!(frame.len(), 1);
//! assert_eq!(frame.rows()[0].bytes()[2], 0x0A);
//! ```

use crate::constants::{MAX_ROWS, ROW_CAPACITY};
use crate::error::DecodeError;

/// A single fixed-capacity candidate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRow {
    bytes: [u8; ROW_CAPACITY],
    bits: u16,
}

impl CandidateRow {
    /// Copy `data` into a zero-padded row.
    pub fn new(data: &[u8], bits: u16) -> Result<Self, DecodeError> {
        if data.len() > ROW_CAPACITY {
            return Err(DecodeError::RowTooLong {
                capacity: ROW_CAPACITY,
                actual: data.len(),
            });
        }
        let mut bytes = [0u8; ROW_CAPACITY];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Self { bytes, bits })
    }

    pub fn bytes(&self) -> &[u8; ROW_CAPACITY] {
        &self.bytes
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }
}

/// An ordered batch of candidate rows from one demodulation window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateFrame {
    rows: Vec<CandidateRow>,
}

impl CandidateFrame {
    pub fn new() -> Self {
        Self {
            rows: Vec::with_capacity(MAX_ROWS),
        }
    }

    /// Build a batch from `(bytes, bits)` pairs, in order.
    pub fn from_rows<'a, I>(rows: I) -> Result<Self, DecodeError>
    where
        I: IntoIterator<Item = (&'a [u8], u16)>,
    {
        let mut frame = Self::new();
        for (bytes, bits) in rows {
            frame.push_row(bytes, bits)?;
        }
        Ok(frame)
    }

    /// Append a row to the end of the batch.
    pub fn push_row(&mut self, bytes: &[u8], bits: u16) -> Result<(), DecodeError> {
        if self.rows.len() >= MAX_ROWS {
            return Err(DecodeError::BatchFull { capacity: MAX_ROWS });
        }
        self.rows.push(CandidateRow::new(bytes, bits)?);
        Ok(())
    }

    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
