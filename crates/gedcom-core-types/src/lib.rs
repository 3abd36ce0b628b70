//! Core types shared across the GEDCOM crates
//!
//! This crate provides foundational types used by the codec, the store and
//! the logging facility:
//!
//! - **Identity types**: RegistryId
//! - **Schema constants**: Canonical field keys and event names

pub mod identity;
pub mod schema;

pub use identity::RegistryId;
