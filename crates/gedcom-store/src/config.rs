//! Codec configuration
//!
//! Read from a TOML file. Every key is optional:
//!
//! ```toml
//! max_line_len = 248
//! line_terminator = "crlf"
//! parse_mode = "lenient"
//! reference_policy = "lenient"
//! source_name = "MY_APP"
//! ```

use std::path::Path;

use gedcom_core::codec::{LineTerminator, ParseMode, WriterConfig, DEFAULT_MAX_LINE_LEN};
use gedcom_core::{Document, LoadOptions, ReferencePolicy};
use serde::{Deserialize, Serialize};

use crate::errors::{config_error, io_error, Result};

/// Smallest budget that still leaves room for a value after the longest
/// prefix the writer produces for ordinary identifiers
pub const MIN_MAX_LINE_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub max_line_len: usize,
    pub line_terminator: LineTerminator,
    pub parse_mode: ParseMode,
    pub reference_policy: ReferencePolicy,
    /// Replaces the header's `SOUR` when writing, if set
    pub source_name: Option<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            line_terminator: LineTerminator::default(),
            parse_mode: ParseMode::default(),
            reference_policy: ReferencePolicy::default(),
            source_name: None,
        }
    }
}

impl CodecConfig {
    /// Parse and validate TOML text
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for unknown keys, bad values, or a
    /// `max_line_len` below [`MIN_MAX_LINE_LEN`].
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CodecConfig = toml::from_str(text).map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from `path`
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the file exists but cannot be read, or a
    /// `Config` error if its content is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.max_line_len < MIN_MAX_LINE_LEN {
            return Err(config_error(format!(
                "max_line_len must be at least {}, got {}",
                MIN_MAX_LINE_LEN, self.max_line_len
            )));
        }
        if let Some(name) = &self.source_name {
            if name.trim().is_empty() {
                return Err(config_error("source_name must not be blank"));
            }
        }
        Ok(())
    }

    pub fn writer_config(&self) -> WriterConfig {
        WriterConfig::default()
            .with_max_line_len(self.max_line_len)
            .with_terminator(self.line_terminator)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            parse_mode: self.parse_mode,
            reference_policy: self.reference_policy,
        }
    }

    /// Put the configured source name into the document's header
    pub fn apply_source(&self, document: &mut Document) {
        if let Some(name) = &self.source_name {
            document.header_mut().set_source(name.as_str());
        }
    }
}
