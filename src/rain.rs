//! # Rain Baseline Tracking
//!
//! The 5n1 station reports a running 14-bit bucket counter rather than a
//! rainfall amount. A [`RainBaseline`] remembers the first counter seen in a
//! decoding session and turns later counters into rainfall since that point.
//!
//! The baseline belongs to whoever owns the decoding session; it is never
//! global, so independent sessions (or tests) do not see each other's rain.
//!
//! ```rust
//! use acurite_rs::rain::{RainBaseline, RainRollover};
//!
//! let mut baseline = RainBaseline::new(RainRollover::Wrap);
//! assert_eq!(baseline.rainfall_inches(120), 0.0);
//! assert!((baseline.rainfall_inches(125) - 0.05).abs() < 1e-9);
//! ```

use crate::constants::{RAIN_COUNTER_MODULUS, RAIN_INCHES_PER_UNIT};
use serde::{Deserialize, Serialize};

/// What to do when the counter comes back lower than the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainRollover {
    /// Treat it as a wrap at the 14-bit boundary and keep counting.
    #[default]
    Wrap,
    /// Treat it as a sensor reset: capture the new counter as the baseline.
    Reset,
}

/// Per-session rain counter baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainBaseline {
    baseline: Option<u16>,
    rollover: RainRollover,
}

impl Default for RainBaseline {
    fn default() -> Self {
        Self::new(RainRollover::default())
    }
}

impl RainBaseline {
    pub fn new(rollover: RainRollover) -> Self {
        Self {
            baseline: None,
            rollover,
        }
    }

    /// The captured counter, if a rain frame has been seen.
    pub fn baseline(&self) -> Option<u16> {
        self.baseline
    }

    /// Forget the captured counter; the next frame becomes the new baseline.
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Record a raw counter and return the number of units since the baseline.
    ///
    /// The first counter observed becomes the baseline and yields zero.
    pub fn observe(&mut self, raw: u16) -> u16 {
        let raw = raw % RAIN_COUNTER_MODULUS;
        let Some(baseline) = self.baseline else {
            log::debug!("Rain baseline captured at {raw}");
            self.baseline = Some(raw);
            return 0;
        };

        if raw >= baseline {
            return raw - baseline;
        }

        match self.rollover {
            RainRollover::Wrap => {
                log::debug!("Rain counter wrapped: baseline {baseline}, raw {raw}");
                RAIN_COUNTER_MODULUS - baseline + raw
            }
            RainRollover::Reset => {
                log::info!("Rain counter dropped below baseline ({raw} < {baseline}), re-capturing");
                self.baseline = Some(raw);
                0
            }
        }
    }

    /// Record a raw counter and return rainfall since the baseline in inches.
    pub fn rainfall_inches(&mut self, raw: u16) -> f64 {
        self.observe(raw) as f64 * RAIN_INCHES_PER_UNIT
    }
}
