//! GEDCOM line-format codec
//!
//! The writer turns records into terminator-prefixed lines, splitting long
//! or multi-line values into `CONC`/`CONT` continuations. The reader parses
//! lines back into a node tree with continuations folded into their owner's
//! value.

pub mod line;
pub mod reader;
pub mod writer;

pub use line::{LineTerminator, WriterConfig, DEFAULT_MAX_LINE_LEN};
pub use reader::{
    decode_lines, parse_document, parse_line, physical_lines, GedcomLine, GedcomNode, ParseMode,
    ParsedDocument,
};
pub use writer::LineWriter;
