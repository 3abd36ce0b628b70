//! Error handling for gedcom-store
//!
//! Wraps gedcom-core ExError with store-specific helpers

use gedcom_core::errors::{ExError, ExErrorKind, GedcomError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a configuration error
pub fn config_error(reason: impl std::fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(reason.to_string())
}

/// Convert a codec error, tagging it with the store operation
pub fn from_gedcom(operation: &str, err: GedcomError) -> ExError {
    ExError::from(err).with_op(operation.to_string())
}
