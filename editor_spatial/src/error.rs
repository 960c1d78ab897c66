//! Error types for the editor spatial core
//!
//! Geometry queries never fail: they answer with booleans or empty result
//! lists. These errors are only produced at the scene-facing boundary
//! (object registration, configuration, pick requests).

use std::fmt;

/// Result type for editor spatial operations
pub type Result<T> = std::result::Result<T, Error>;

/// Editor spatial errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Bounding volume with min > max on some axis, or non-finite corners
    InvalidBounds(String),

    /// Ray with a zero-length or non-finite direction
    InvalidRay(String),

    /// Configuration value out of range
    InvalidConfig(String),

    /// Scene object key does not refer to a live object
    ObjectNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBounds(msg) => write!(f, "Invalid bounds: {}", msg),
            Error::InvalidRay(msg) => write!(f, "Invalid ray: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::ObjectNotFound(msg) => write!(f, "Object not found: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an `Error`, logging it at ERROR severity first.
///
/// ```ignore
/// return Err(engine_err!("editor3d::Scene", InvalidBounds, "min > max on {}", axis));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::editor3d::Error::$variant(message)
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
