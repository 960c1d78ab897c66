/// Engine facade - process-wide logging for the editor spatial core
///
/// The octree, scene and picker report through a single global logger stored
/// in thread-safe static storage (RwLock). The culling pass may log from
/// rayon worker threads, so the logger must be `Send + Sync`.

use std::sync::{OnceLock, RwLock};
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::default())))
}

// ===== PUBLIC API =====

/// Logging facade shared by every component of the crate.
///
/// # Example
///
/// ```no_run
/// use editor_spatial::editor3d::{Engine, log::{Logger, LogEntry, LogSeverity, DefaultLogger}};
///
/// // Show subdivision traces while tuning capacity/depth
/// Engine::set_logger(DefaultLogger::new(LogSeverity::Trace));
///
/// // ... build and query a scene ...
///
/// Engine::reset_logger();
/// ```
pub struct Engine;

impl Engine {
    /// Replace the global logger (editor console, file logger, test capture...)
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset the global logger to `DefaultLogger::default()`
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger::default());
        }
    }

    /// Log a message without location (used by engine_trace!..engine_warn!)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry::new(severity, source, message));
        }
    }

    /// Log a message with file:line information (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry::new(severity, source, message).with_location(file, line));
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
