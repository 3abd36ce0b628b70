//! GEDCOM Core - record model and line-format codec
//!
//! This crate provides:
//! - The record model (Note, Submitter, Individual, Family, Custom, Header)
//!   with change-tracked setters and change-date derivation
//! - A per-document cross-reference registry
//! - The line writer with `CONC`/`CONT` continuation splitting, and the
//!   reader that reverses it
//! - A document type that loads, merges and writes whole files
//! - A tree representation for structured export

pub mod codec;
pub mod document;
pub mod errors;
pub mod load;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod text;
pub mod tree;
pub mod xref;

pub use gedcom_core_types as core_types;

// Re-export commonly used types
pub use codec::{LineTerminator, LineWriter, ParseMode, WriterConfig};
pub use document::{DanglingReference, Document, MergeReport};
pub use errors::{ExError, ExErrorKind, GedcomError, Result};
pub use load::{load_document, LoadOptions, LoadReport, ReferencePolicy};
pub use model::{
    Address, ChangeDate, ChangeTracker, Custom, Family, GedcomRecord, Header, Individual, Note,
    Record, RecordKind, Sex, Submitter,
};
pub use registry::{RecordKey, Registry};
pub use tree::{TreeContent, TreeNode};
pub use xref::Xref;
