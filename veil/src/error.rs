//! Error types for the overlay registry.

use thiserror::Error;

use crate::overlay::OverlayClass;

/// Errors raised at the registry boundary.
///
/// Everything here is a caller contract violation: a class name that does
/// not exist, or props that do not fit the class they were opened under.
/// Closing something that is not open is never an error.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A class name other than `dialog`, `panel` or `notification`.
    #[error("unknown overlay class '{0}'")]
    UnknownClass(String),

    /// A class-level prop holds a value of the wrong shape.
    #[error("invalid prop '{key}' for {class}: expected {expected}, got {found}")]
    InvalidProp {
        class: OverlayClass,
        key: &'static str,
        expected: &'static str,
        found: String,
    },

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
