//! # Protocol Dispatch
//!
//! The [`Dispatcher`] takes one batch of candidate rows and tries each enabled
//! protocol against it in turn. For a given protocol the rows are offered to
//! the validator in order and the scan stops at the first row that validates:
//! that row is decoded and no later row is looked at. The first protocol that
//! produces a reading wins; at most one reading comes out of each call.
//!
//! All mutable state (rain baselines, statistics, log throttles) lives in a
//! [`DecoderState`] owned by the caller and passed into every call. The
//! dispatcher itself is immutable and can be shared freely; each decoding
//! session keeps its own state.
//!
//! ## Usage
//!
//! ```rust
//! use acurite_rs::dispatch::Dispatcher;
//! use acurite_rs::frame::CandidateFrame;
//! use acurite_rs::protocol::{Protocol, Reading};
//!
//! let dispatcher = Dispatcher::default();
//! let mut state = dispatcher.new_state();
//!
//! let mut frame = CandidateFrame::new();
//! frame.push_row(&[0x11, 0x01, 0xF4, 0x32, 0x38], 40).unwrap();
//!
//! let decoded = dispatcher.decode(&frame, &mut state).unwrap();
//! assert_eq!(decoded.protocol, Protocol::Th);
//! assert_eq!(
//!     decoded.reading,
//!     Reading::TempHumidityFrame { temp_c: 50.0, humidity_pct: 0x32 }
//! );
//! ```

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::frame::CandidateFrame;
use crate::instrumentation::{DecodeStats, RejectionKind};
use crate::protocol::{Decoded, Protocol, ProtocolDescriptor};
use crate::rain::{RainBaseline, RainRollover};
use crate::util::logging::{log_row_hex, LogThrottle};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Mutable state of one decoding session.
#[derive(Debug, Clone)]
pub struct DecoderState {
    rain: BTreeMap<Protocol, RainBaseline>,
    rollover: RainRollover,
    stats: DecodeStats,
    subtype_throttle: LogThrottle,
}

impl Default for DecoderState {
    fn default() -> Self {
        Self::new(&DecoderConfig::default())
    }
}

impl DecoderState {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            rain: BTreeMap::new(),
            rollover: config.rain_rollover,
            stats: DecodeStats::default(),
            subtype_throttle: LogThrottle::new(
                config.unknown_subtype_log_window_ms,
                config.unknown_subtype_log_cap,
            ),
        }
    }

    /// The rain baseline of `protocol`, if that protocol has reported rain.
    pub fn rain_baseline(&self, protocol: Protocol) -> Option<&RainBaseline> {
        self.rain.get(&protocol)
    }

    /// The rain baseline of `protocol`, created on first use.
    pub fn rain_baseline_mut(&mut self, protocol: Protocol) -> &mut RainBaseline {
        let rollover = self.rollover;
        self.rain
            .entry(protocol)
            .or_insert_with(|| RainBaseline::new(rollover))
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Drop all rain baselines and statistics.
    pub fn reset(&mut self) {
        self.rain.clear();
        self.stats.reset();
        self.subtype_throttle.reset();
    }
}

/// Table-driven protocol dispatcher.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    descriptors: Vec<&'static ProtocolDescriptor>,
    config: DecoderConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl Dispatcher {
    pub fn new(config: DecoderConfig) -> Self {
        let descriptors = config.enabled.iter().map(|p| p.descriptor()).collect();
        Self {
            descriptors,
            config,
        }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Enabled protocols in dispatch order.
    pub fn protocols(&self) -> impl Iterator<Item = Protocol> + '_ {
        self.descriptors.iter().map(|d| d.protocol)
    }

    /// Fresh session state matching this dispatcher's configuration.
    pub fn new_state(&self) -> DecoderState {
        DecoderState::new(&self.config)
    }

    /// Try every enabled protocol against `frame`; return the first reading.
    ///
    /// `None` means no protocol matched, which is the usual outcome for noise.
    pub fn decode(&self, frame: &CandidateFrame, state: &mut DecoderState) -> Option<Decoded> {
        self.descriptors
            .iter()
            .find_map(|descriptor| scan(descriptor, frame, state))
    }

    /// Like [`Dispatcher::decode`], stamping the result with the caller's clock.
    pub fn decode_at(
        &self,
        frame: &CandidateFrame,
        state: &mut DecoderState,
        received_at: DateTime<Utc>,
    ) -> Option<Decoded> {
        self.decode(frame, state).map(|decoded| Decoded {
            received_at: Some(received_at),
            ..decoded
        })
    }

    /// Try a single protocol, as selected by the demodulator's timing.
    ///
    /// The protocol does not have to be enabled in the configuration.
    pub fn decode_protocol(
        &self,
        protocol: Protocol,
        frame: &CandidateFrame,
        state: &mut DecoderState,
    ) -> Option<Decoded> {
        scan(protocol.descriptor(), frame, state)
    }
}

/// Scan `frame` for the first row accepted by `descriptor` and decode it.
fn scan(
    descriptor: &ProtocolDescriptor,
    frame: &CandidateFrame,
    state: &mut DecoderState,
) -> Option<Decoded> {
    let protocol = descriptor.protocol;
    let limit = descriptor.max_rows.unwrap_or(usize::MAX);

    for (index, row) in frame.rows().iter().take(limit).enumerate() {
        state.stats.record_row(protocol);

        if row.bits() < descriptor.min_bits {
            let err = DecodeError::RowTooShort {
                needed: descriptor.min_bits,
                actual: row.bits(),
            };
            reject(state, protocol, index, &err);
            continue;
        }

        let validated = match (descriptor.validate)(row.bytes()) {
            Ok(validated) => validated,
            Err(err) => {
                reject(state, protocol, index, &err);
                continue;
            }
        };

        log_row_hex(&format!("{protocol} row {index} accepted"), validated.frame());

        return match (descriptor.decode)(&validated, state) {
            Ok(reading) => {
                state.stats.record_reading(protocol);
                Some(Decoded {
                    protocol,
                    model: descriptor.name,
                    reading,
                    raw: validated.frame().to_vec(),
                    received_at: None,
                })
            }
            Err(err) => {
                crate::log_warn_throttled!(
                    state.subtype_throttle,
                    "{} row {index} validated but not decodable: {err}",
                    descriptor.name
                );
                record_rejection(state, protocol, &err);
                None
            }
        };
    }

    None
}

fn reject(state: &mut DecoderState, protocol: Protocol, index: usize, err: &DecodeError) {
    log::trace!("{protocol} row {index} rejected: {err}");
    record_rejection(state, protocol, err);
}

fn record_rejection(state: &mut DecoderState, protocol: Protocol, err: &DecodeError) {
    if let Ok(kind) = RejectionKind::try_from(err) {
        state.stats.record_rejection(protocol, kind);
    }
}
