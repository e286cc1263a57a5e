//! # Per-Protocol Decode Statistics
//!
//! ## Usage
//!
//! ```rust
//! use acurite_rs::instrumentation::{DecodeStats, RejectionKind};
//! use acurite_rs::protocol::Protocol;
//!
//! let mut stats = DecodeStats::default();
//! stats.record_row(Protocol::Th);
//! stats.record_rejection(Protocol::Th, RejectionKind::Checksum);
//! assert_eq!(stats.protocol(Protocol::Th).checksum_errors, 1);
//! ```

use crate::error::DecodeError;
use crate::protocol::Protocol;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a candidate row did not produce a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    /// Fewer bits than the protocol requires; never offered to the validator
    TooShort,
    /// Modular sum mismatch
    Checksum,
    /// Odd-parity mismatch
    Parity,
    /// Wrong zero/non-zero byte pattern
    Structural,
    /// Valid frame with an unknown message type
    UnknownSubtype,
}

/// Only row rejections have a kind; errors from assembling a batch
/// (`RowTooLong`, `BatchFull`) are handed back unchanged.
impl<'a> TryFrom<&'a DecodeError> for RejectionKind {
    type Error = &'a DecodeError;

    fn try_from(err: &'a DecodeError) -> Result<Self, Self::Error> {
        match err {
            DecodeError::ChecksumMismatch { .. } => Ok(RejectionKind::Checksum),
            DecodeError::ParityMismatch { .. } => Ok(RejectionKind::Parity),
            DecodeError::StructuralMismatch(_) => Ok(RejectionKind::Structural),
            DecodeError::UnknownSubtype(_) => Ok(RejectionKind::UnknownSubtype),
            DecodeError::RowTooShort { .. } => Ok(RejectionKind::TooShort),
            DecodeError::RowTooLong { .. } | DecodeError::BatchFull { .. } => Err(err),
        }
    }
}

/// Counters for a single protocol.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolStats {
    pub rows_examined: u64,
    pub too_short: u64,
    pub checksum_errors: u64,
    pub parity_errors: u64,
    pub structural_rejections: u64,
    pub unknown_subtypes: u64,
    pub readings: u64,
}

impl ProtocolStats {
    /// Total rows that did not produce a reading.
    pub fn rejections(&self) -> u64 {
        self.too_short
            + self.checksum_errors
            + self.parity_errors
            + self.structural_rejections
            + self.unknown_subtypes
    }

    /// Percentage of examined rows that produced a reading
    pub fn acceptance_rate(&self) -> f64 {
        if self.rows_examined == 0 {
            return 0.0;
        }
        (self.readings as f64 / self.rows_examined as f64) * 100.0
    }
}

/// Statistics for a decoding session, keyed by protocol.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeStats {
    protocols: BTreeMap<Protocol, ProtocolStats>,
}

impl DecodeStats {
    pub fn record_row(&mut self, protocol: Protocol) {
        self.entry(protocol).rows_examined += 1;
    }

    pub fn record_reading(&mut self, protocol: Protocol) {
        self.entry(protocol).readings += 1;
    }

    pub fn record_rejection(&mut self, protocol: Protocol, kind: RejectionKind) {
        let stats = self.entry(protocol);
        match kind {
            RejectionKind::TooShort => stats.too_short += 1,
            RejectionKind::Checksum => stats.checksum_errors += 1,
            RejectionKind::Parity => stats.parity_errors += 1,
            RejectionKind::Structural => stats.structural_rejections += 1,
            RejectionKind::UnknownSubtype => stats.unknown_subtypes += 1,
        }
    }

    /// Counters for `protocol` (all zero if it has not been seen).
    pub fn protocol(&self, protocol: Protocol) -> ProtocolStats {
        self.protocols.get(&protocol).copied().unwrap_or_default()
    }

    pub fn total_readings(&self) -> u64 {
        self.protocols.values().map(|s| s.readings).sum()
    }

    pub fn reset(&mut self) {
        self.protocols.clear();
    }

    /// Export as a JSON value for an external recorder.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.protocols).unwrap_or(serde_json::Value::Null)
    }

    fn entry(&mut self, protocol: Protocol) -> &mut ProtocolStats {
        self.protocols.entry(protocol).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = DecodeStats::default();
        for _ in 0..4 {
            stats.record_row(Protocol::FiveInOne);
        }
        stats.record_rejection(Protocol::FiveInOne, RejectionKind::Checksum);
        stats.record_rejection(Protocol::FiveInOne, RejectionKind::Structural);
        stats.record_rejection(Protocol::FiveInOne, RejectionKind::UnknownSubtype);
        stats.record_reading(Protocol::FiveInOne);

        let five = stats.protocol(Protocol::FiveInOne);
        assert_eq!(five.rows_examined, 4);
        assert_eq!(five.rejections(), 3);
        assert_eq!(five.readings, 1);
        assert_eq!(five.acceptance_rate(), 25.0);
        assert_eq!(stats.protocol(Protocol::Th), ProtocolStats::default());
        assert_eq!(stats.total_readings(), 1);
    }

    #[test]
    fn test_rejection_kind_from_error() {
        assert_eq!(
            RejectionKind::try_from(&DecodeError::ParityMismatch { index: 3, value: 0 }),
            Ok(RejectionKind::Parity)
        );
        assert_eq!(
            RejectionKind::try_from(&DecodeError::RowTooShort { needed: 1, actual: 0 }),
            Ok(RejectionKind::TooShort)
        );
        assert_eq!(
            RejectionKind::try_from(&DecodeError::StructuralMismatch("empty row")),
            Ok(RejectionKind::Structural)
        );
    }

    #[test]
    fn test_batch_errors_have_no_rejection_kind() {
        for err in [
            DecodeError::RowTooLong { capacity: 34, actual: 35 },
            DecodeError::BatchFull { capacity: 50 },
        ] {
            assert!(!err.is_rejection());
            assert_eq!(RejectionKind::try_from(&err), Err(&err));
        }
    }

    #[test]
    fn test_json_export_uses_protocol_keys() {
        let mut stats = DecodeStats::default();
        stats.record_row(Protocol::Th592);
        let json = stats.to_json();
        assert_eq!(json["592txr"]["rows_examined"], 1);
    }
}
