//! Line writer
//!
//! Every line is written as `<terminator><level> [@ID@ ]TAG[ VALUE]`. The
//! terminator comes first, so concatenated record outputs chain without
//! blank lines; whoever writes the first record of a file strips the leading
//! terminator.

use crate::text::{level_text, split_value, text_width, SegmentKind};
use crate::xref::Xref;

use super::line::WriterConfig;

/// Width of the `CONC`/`CONT` tag token
const CONTINUATION_TAG_WIDTH: usize = 4;

/// Accumulates GEDCOM lines into an in-memory buffer
#[derive(Debug, Clone)]
pub struct LineWriter {
    config: WriterConfig,
    out: String,
    line_count: usize,
}

impl LineWriter {
    pub fn new(config: WriterConfig) -> Self {
        Self {
            config,
            out: String::new(),
            line_count: 0,
        }
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Number of physical lines written so far
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    /// Write a line, splitting the value into continuations as needed
    ///
    /// A `None` or empty value writes the bare `level [@ID@ ]TAG` line.
    pub fn line(&mut self, level: u32, xref: Option<&Xref>, tag: &str, value: Option<&str>) {
        let mut prefix = level_text(level);
        prefix.push(' ');
        if let Some(xref) = xref {
            prefix.push_str(&xref.pointer());
            prefix.push(' ');
        }
        prefix.push_str(tag);

        let value = value.unwrap_or("");
        if value.is_empty() {
            self.emit(&prefix, "");
            return;
        }

        let max = self.config.max_line_len;
        let continuation_level = level_text(level + 1);
        let primary_width = max.saturating_sub(text_width(&prefix) + 1);
        let continuation_width =
            max.saturating_sub(text_width(&continuation_level) + CONTINUATION_TAG_WIDTH + 2);

        if primary_width == 0 || continuation_width == 0 {
            tracing::warn!(
                tag = tag,
                level = level,
                max_line_len = max,
                "Line prefix leaves no room for a value; lines will exceed the budget"
            );
        }

        for segment in split_value(value, primary_width, continuation_width) {
            match segment.kind.tag() {
                None => self.emit(&prefix, &segment.text),
                Some(continuation_tag) => {
                    let continuation_prefix = format!("{continuation_level} {continuation_tag}");
                    self.emit(&continuation_prefix, &segment.text);
                }
            }
        }
    }

    /// Write a tag/value line only when the value is non-empty
    pub fn field(&mut self, level: u32, tag: &str, value: &str) {
        if !value.is_empty() {
            self.line(level, None, tag, Some(value));
        }
    }

    /// Write a pointer line (`level TAG @ID@`)
    pub fn pointer(&mut self, level: u32, tag: &str, target: &Xref) {
        self.line(level, None, tag, Some(&target.pointer()));
    }

    fn emit(&mut self, prefix: &str, text: &str) {
        self.out.push_str(self.config.terminator.as_str());
        self.out.push_str(prefix);
        if !text.is_empty() {
            self.out.push(' ');
            self.out.push_str(text);
        }
        self.line_count += 1;
    }
}

impl Default for LineWriter {
    fn default() -> Self {
        Self::new(WriterConfig::default())
    }
}

/// Kind of a continuation line, by tag
pub fn continuation_kind(tag: &str) -> Option<SegmentKind> {
    match tag {
        "CONC" => Some(SegmentKind::Conc),
        "CONT" => Some(SegmentKind::Cont),
        _ => None,
    }
}
