//! GEDCOM record model
//!
//! Every record shares [`RecordBase`] state and implements
//! [`GedcomRecord`]. Content setters return whether anything changed and
//! report real changes through [`ChangeTracker::changed`], which marks the
//! record dirty and refreshes its change date.

pub mod address;
pub mod base;
pub mod change_date;
pub mod custom;
pub mod family;
pub mod header;
pub mod individual;
pub mod note;
pub mod record;
pub mod submitter;

pub use address::Address;
pub use base::{ChangeTracker, RecordBase};
pub use change_date::ChangeDate;
pub use custom::{Custom, DEFAULT_CUSTOM_TAG};
pub use family::Family;
pub use header::{Header, Trailer};
pub use individual::{Individual, Sex};
pub use note::Note;
pub use record::{GedcomRecord, Record, RecordKind, Reference};
pub use submitter::{Submitter, UNKNOWN_SUBMITTER_NAME};
