//! Canonical logging macros
//!
//! Field names come from `gedcom_core_types::schema` so that captured events
//! and production JSON agree on keys.

/// Log the start of an operation
///
/// ```
/// # use gedcom_core::log_op_start;
/// log_op_start!("load_document");
/// log_op_start!("load_document", line_count = 12);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use gedcom_core::log_op_end;
/// log_op_end!("load_document", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError`.
///
/// ```
/// # use gedcom_core::{log_op_error, errors::GedcomError};
/// let err = GedcomError::RecordNotFound { xref: "N1".to_string() };
/// log_op_error!("remove_record", err, duration_ms = 0);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
