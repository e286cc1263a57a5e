//! # Rate-Limited Logging Utilities
//!
//! Most candidate rows are noise, so the rejection paths fire constantly.
//! [`LogThrottle`] keeps warnings on those paths from flooding the log, and
//! [`log_row_hex`] gives a consistent hex dump of accepted rows.
//!
//! ## Usage
//!
//! ```rust
//! use acurite_rs::util::logging::LogThrottle;
//!
//! let mut throttle = LogThrottle::new(1000, 5); // 5 messages per second
//! if throttle.allow() {
//!     log::warn!("Unknown 5n1 message type");
//! }
//! ```

use std::time::Instant;

/// Throttling structure for rate-limiting log messages
#[derive(Debug, Clone)]
pub struct LogThrottle {
    /// Time window for throttling (in milliseconds)
    window_ms: u64,
    /// Maximum messages allowed per window
    cap: u32,
    /// Current message count in window
    count: u32,
    /// Start time of current window
    t0: Instant,
}

impl LogThrottle {
    /// Create new throttle with time window and message cap
    pub fn new(window_ms: u64, cap: u32) -> Self {
        Self {
            window_ms,
            cap,
            count: 0,
            t0: Instant::now(),
        }
    }

    /// Check if logging is allowed (resets counter after window expires)
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        let elapsed_ms = now.duration_since(self.t0).as_millis() as u64;

        if elapsed_ms > self.window_ms {
            self.t0 = now;
            self.count = 0;
        }

        self.count = self.count.saturating_add(1);
        self.count <= self.cap
    }

    /// Reset the throttle (start new window immediately)
    pub fn reset(&mut self) {
        self.t0 = Instant::now();
        self.count = 0;
    }
}

/// Log row data in hex format for debugging
pub fn log_row_hex(prefix: &str, data: &[u8]) {
    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            target: "acurite::row",
            "{prefix}: {}",
            crate::util::hex::format_hex_compact(data)
        );
    }
}

/// Log a throttled warning
#[macro_export]
macro_rules! log_warn_throttled {
    ($throttle:expr, $($arg:tt)*) => {
        if $throttle.allow() {
            log::warn!($($arg)*);
        }
    };
}
