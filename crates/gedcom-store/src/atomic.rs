//! Atomic write primitives
//!
//! Uses temp→rename so a failed save never leaves a half-written file in
//! place of the previous one.

use crate::errors::{io_error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Temp file beside `target`, keeping its extension visible
fn temp_path(target: &Path) -> PathBuf {
    let extension = match target.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{ext}.tmp"),
        None => "tmp".to_string(),
    };
    target.with_extension(extension)
}

/// Atomically write bytes to a file
///
/// Creates missing parent directories.
///
/// # Errors
///
/// Returns an `Io` error if the directory, temp file or rename fails. The
/// temp file is removed when the rename fails.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", e))?;
        }
    }

    let temp = temp_path(target_path);
    fs::write(&temp, content).map_err(|e| io_error("write_temp", e))?;

    if let Err(err) = fs::rename(&temp, target_path) {
        // best effort; the rename error is the one worth reporting
        let _ = fs::remove_file(&temp);
        return Err(io_error("rename_temp", err));
    }

    Ok(())
}
