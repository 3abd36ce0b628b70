//! Structured logging facility for the GEDCOM crates
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Boundary operations (document load, save, merge) own the start/end
//! events. The codec and the registry only emit `tracing::debug!` and
//! `tracing::warn!` details.
//!
//! ```rust
//! use gedcom_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
