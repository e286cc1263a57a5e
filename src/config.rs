//! # Decoder Configuration
//!
//! Which protocols the dispatcher tries (and in what order), how the rain
//! baseline treats a counter that goes backwards, and how loudly unknown
//! message types are reported. Every field has a default, so an empty JSON
//! object is a valid configuration.
//!
//! ```rust
//! use acurite_rs::config::DecoderConfig;
//! use acurite_rs::protocol::Protocol;
//!
//! let config = DecoderConfig::from_json_str(r#"{ "enabled": ["592txr", "th"] }"#).unwrap();
//! assert_eq!(config.enabled, vec![Protocol::Th592, Protocol::Th]);
//! ```

use crate::error::ConfigError;
use crate::protocol::Protocol;
use crate::rain::RainRollover;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Protocols to try, in dispatch order
    pub enabled: Vec<Protocol>,
    /// Handling of a rain counter that drops below the session baseline
    pub rain_rollover: RainRollover,
    /// Window for rate-limiting unknown-subtype warnings
    pub unknown_subtype_log_window_ms: u64,
    /// Warnings allowed per window
    pub unknown_subtype_log_cap: u32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            enabled: Protocol::ALL.to_vec(),
            rain_rollover: RainRollover::Wrap,
            unknown_subtype_log_window_ms: 60_000,
            unknown_subtype_log_cap: 5,
        }
    }
}

impl DecoderConfig {
    /// Configuration that only tries the given protocols, in order.
    pub fn only(protocols: &[Protocol]) -> Self {
        Self {
            enabled: protocols.to_vec(),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.dedup_enabled();
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn is_enabled(&self, protocol: Protocol) -> bool {
        self.enabled.contains(&protocol)
    }

    // A protocol listed twice would just scan the batch twice.
    fn dedup_enabled(&mut self) {
        let mut seen = Vec::with_capacity(self.enabled.len());
        self.enabled.retain(|p| {
            if seen.contains(p) {
                false
            } else {
                seen.push(*p);
                true
            }
        });
    }
}
