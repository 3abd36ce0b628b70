//! Whole-document file I/O
//!
//! Reading decodes the file as UTF-8 and hands it to the loader. Writing
//! renders into memory first, then replaces the target atomically.

use std::path::Path;
use std::time::Instant;

use gedcom_core::{load_document, log_op_end, log_op_error, log_op_start};
use gedcom_core::{Document, LoadReport};

use crate::atomic::atomic_write;
use crate::config::CodecConfig;
use crate::errors::{from_gedcom, io_error, Result};

/// Load a GEDCOM file using the configured parse and reference policies
///
/// A leading byte-order mark is ignored.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read or is not UTF-8, and the
/// loader's errors (`MalformedLine`, `DuplicateIdentifier`,
/// `UnresolvedReference`) tagged with `read_document`.
pub fn read_document(path: &Path, config: &CodecConfig) -> Result<(Document, LoadReport)> {
    let op = "read_document";
    let start = Instant::now();
    log_op_start!(op, path = %path.display());

    let result = std::fs::read_to_string(path)
        .map_err(|e| io_error(op, e))
        .and_then(|text| {
            let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
            load_document(text, config.load_options()).map_err(|e| from_gedcom(op, e))
        });

    match result {
        Ok((document, report)) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                record_count = report.record_count
            );
            Ok((document, report))
        }
        Err(err) => {
            log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Render `document` and atomically replace `path` with it
///
/// Returns the number of lines written.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written; the previous content of
/// `path` is then left as it was.
pub fn write_document(path: &Path, document: &Document, config: &CodecConfig) -> Result<usize> {
    let op = "write_document";
    let start = Instant::now();
    log_op_start!(op, path = %path.display(), record_count = document.len());

    let result = render(document, config).and_then(|(bytes, line_count)| {
        atomic_write(path, &bytes)?;
        Ok(line_count)
    });

    match result {
        Ok(line_count) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                line_count = line_count
            );
            Ok(line_count)
        }
        Err(err) => {
            log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

fn render(document: &Document, config: &CodecConfig) -> Result<(Vec<u8>, usize)> {
    let mut buffer = Vec::new();
    let line_count = document
        .write_to(&mut buffer, config.writer_config())
        .map_err(|e| from_gedcom("write_document", e))?;
    Ok((buffer, line_count))
}
