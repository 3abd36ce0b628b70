//! GEDCOM Store - file persistence and codec configuration
//!
//! Provides:
//! - Codec configuration read from TOML
//! - Whole-document read and atomic write against the filesystem

pub mod atomic;
pub mod config;
pub mod errors;
pub mod file;

// Re-export key types
pub use config::CodecConfig;
pub use errors::Result;
pub use file::{read_document, write_document};
