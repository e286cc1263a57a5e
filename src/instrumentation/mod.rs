//! # Decode Instrumentation
//!
//! Counters describing what a decoding session has seen: how many candidate
//! rows each protocol examined, why rows were rejected, and how many readings
//! were produced. Counters live in the session state, not in a global registry.

pub mod stats;

pub use stats::{DecodeStats, ProtocolStats, RejectionKind};
