//! # Utility Modules
//!
//! Hex encoding helpers for row dumps and test data, and rate-limited logging
//! for the high-volume rejection paths.

pub mod hex;
pub mod logging;

pub use self::hex::{decode_hex, format_hex_compact, parse_row_spec, HexError};
pub use logging::{log_row_hex, LogThrottle};
