use log::{debug, info, log_enabled, Level};

/// Initializes the logger with the `env_logger` crate, falling back to
/// `default_filter` when `RUST_LOG` is not set.
///
/// Rejected rows are logged at `trace`, accepted rows are dumped at `debug`.
pub fn init_logger_with_default(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Logs a debug message.
pub fn log_debug(message: &str) {
    if log_enabled!(Level::Debug) {
        debug!("{message}");
    }
}
