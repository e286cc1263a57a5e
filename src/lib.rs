//! # acurite-rs - Frame Decoding for Acurite 433 MHz Weather Sensors
//!
//! The acurite-rs crate validates and decodes the fixed-length binary frames sent
//! by Acurite short-range OOK weather sensors (5n1 weather station, 896 rain
//! gauge, temperature/humidity sensors and the 00592TXR). Frames arrive as
//! candidate byte rows from an external pulse-width demodulator; this crate
//! decides which row, if any, is a genuine frame and turns it into a typed
//! [`Reading`].
//!
//! ## Features
//!
//! - Per-protocol frame validation (modular sums, structural checks, odd parity)
//! - Bit-level field extraction with the exact on-air packing and sign rules
//! - Rain counter baselines held in explicit per-session state
//! - Table-driven dispatch over a batch of candidate rows
//! - Per-protocol statistics and rate-limited logging
//!
//! ## Usage
//!
//! ```rust
//! use acurite_rs::{CandidateFrame, Dispatcher, Protocol, Reading};
//!
//! let dispatcher = Dispatcher::default();
//! let mut state = dispatcher.new_state();
//!
//! let mut frame = CandidateFrame::new();
//! frame.push_row(&[0x10, 0x01, 0x0A, 0x00, 0x00], 40).unwrap();
//!
//! let decoded = dispatcher.decode(&frame, &mut state).unwrap();
//! assert_eq!(decoded.protocol, Protocol::RainGauge);
//! assert_eq!(decoded.reading, Reading::RainGaugeTotalFrame { total_rain_mm: 133.0 });
//! ```

pub mod codec;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod instrumentation;
pub mod logging;
pub mod protocol;
pub mod rain;
pub mod util;
pub mod validate;

pub use crate::config::DecoderConfig;
pub use crate::dispatch::{DecoderState, Dispatcher};
pub use crate::error::{ConfigError, DecodeError};
pub use crate::frame::{CandidateFrame, CandidateRow};
pub use crate::logging::{init_logger_with_default, log_info};
pub use crate::protocol::{Decoded, Protocol, ProtocolDescriptor, Reading};
pub use crate::rain::{RainBaseline, RainRollover};
pub use crate::validate::ValidatedRow;
