//! Line reader
//!
//! Decomposes physical lines into level/xref/tag/value and rebuilds the
//! positional hierarchy. `CONC` and `CONT` lines are folded into the value
//! of the node one level above them, so a node's value is the logical value
//! the writer started from (with `\n` as the only line break).

use serde::{Deserialize, Serialize};

use crate::errors::{GedcomError, Result};
use crate::text::SegmentKind;
use crate::xref::{validate_tag, Xref};

use super::writer::continuation_kind;

/// How the reader reacts to a malformed line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Abort on the first malformed line
    #[default]
    Strict,
    /// Drop the record in progress and resynchronize
    Lenient,
}

/// One decoded physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine {
    pub line_number: usize,
    pub level: u32,
    pub xref: Option<Xref>,
    pub tag: String,
    pub value: Option<String>,
}

/// A line plus its sub-structures, with continuations folded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomNode {
    pub line_number: usize,
    pub level: u32,
    pub xref: Option<Xref>,
    pub tag: String,
    pub value: Option<String>,
    pub children: Vec<GedcomNode>,
}

impl GedcomNode {
    fn from_line(line: GedcomLine) -> Self {
        Self {
            line_number: line.line_number,
            level: line.level,
            xref: line.xref,
            tag: line.tag,
            value: line.value,
            children: Vec::new(),
        }
    }

    /// Value or the empty string
    pub fn value_str(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// First child with the given tag
    pub fn child(&self, tag: &str) -> Option<&GedcomNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All children with the given tag, in document order
    pub fn children_with<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a GedcomNode> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// Value parsed as a pointer (`@ID@`)
    pub fn pointer(&self) -> Option<Xref> {
        self.value.as_deref().and_then(Xref::from_pointer)
    }

    fn append(&mut self, kind: SegmentKind, text: Option<String>) {
        let value = self.value.get_or_insert_with(String::new);
        if kind == SegmentKind::Cont {
            value.push('\n');
        }
        if let Some(text) = text {
            value.push_str(&text);
        }
    }
}

/// Result of a document parse
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// Top-level records in document order
    pub nodes: Vec<GedcomNode>,
    /// Malformed lines skipped in lenient mode
    pub errors: Vec<GedcomError>,
}

/// Split text into numbered physical lines
///
/// Accepts `\n`, `\r\n` and lone `\r` terminators. Line numbers are
/// 1-based and count blank lines.
pub fn physical_lines(text: &str) -> Vec<(usize, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = Vec::new();
    let mut rest = text;
    let mut number = 0;

    while !rest.is_empty() {
        number += 1;
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(idx) => {
                lines.push((number, &rest[..idx]));
                let skip = if rest[idx..].starts_with("\r\n") {
                    2
                } else {
                    1
                };
                rest = &rest[idx + skip..];
            }
            None => {
                lines.push((number, rest));
                rest = "";
            }
        }
    }

    lines
}

/// Decompose one physical line
///
/// Leading spaces and tabs are ignored. The value is everything after the
/// single space that follows the tag, kept verbatim.
///
/// # Errors
///
/// Returns `MalformedLine` with `line_number` if the level, the
/// cross-reference or the tag cannot be read.
pub fn parse_line(text: &str, line_number: usize) -> Result<GedcomLine> {
    let malformed = |reason: String| GedcomError::MalformedLine {
        line_number,
        reason,
    };

    let trimmed = text.trim_start_matches(|c: char| c == ' ' || c == '\t');
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end == 0 {
        return Err(malformed("missing level number".to_string()));
    }
    let level: u32 = trimmed[..digits_end]
        .parse()
        .map_err(|_| malformed(format!("level '{}' out of range", &trimmed[..digits_end])))?;

    let rest = trimmed[digits_end..]
        .strip_prefix(' ')
        .ok_or_else(|| malformed("missing tag".to_string()))?
        .trim_start_matches(' ');

    let (xref, rest) = match rest.strip_prefix('@') {
        Some(after) => {
            let close = after
                .find('@')
                .ok_or_else(|| malformed("unterminated cross-reference".to_string()))?;
            let id = &after[..close];
            let xref = Xref::new(id)
                .map_err(|_| malformed(format!("invalid cross-reference '@{id}@'")))?;
            let after = after[close + 1..]
                .strip_prefix(' ')
                .ok_or_else(|| malformed("missing tag after cross-reference".to_string()))?;
            (Some(xref), after.trim_start_matches(' '))
        }
        None => (None, rest),
    };

    let (tag, value) = match rest.find(' ') {
        Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
        None => (rest, None),
    };
    if tag.is_empty() {
        return Err(malformed("missing tag".to_string()));
    }
    validate_tag(tag).map_err(|_| malformed(format!("invalid tag '{tag}'")))?;

    Ok(GedcomLine {
        line_number,
        level,
        xref,
        tag: tag.to_string(),
        value: value.filter(|v| !v.is_empty()).map(str::to_string),
    })
}

/// Decode every non-blank physical line
///
/// # Errors
///
/// Returns the first `MalformedLine`.
pub fn decode_lines(text: &str) -> Result<Vec<GedcomLine>> {
    physical_lines(text)
        .into_iter()
        .filter(|(_, raw)| !raw.trim().is_empty())
        .map(|(number, raw)| parse_line(raw, number))
        .collect()
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<GedcomNode>,
    roots: Vec<GedcomNode>,
}

impl TreeBuilder {
    fn push(&mut self, line: GedcomLine) -> Result<()> {
        let level = line.level as usize;

        if let Some(kind) = continuation_kind(&line.tag) {
            if level == 0 || level > self.stack.len() {
                return Err(GedcomError::MalformedLine {
                    line_number: line.line_number,
                    reason: format!("{} at level {} has no value to continue", line.tag, level),
                });
            }
            self.close_to(level);
            if let Some(owner) = self.stack.last_mut() {
                owner.append(kind, line.value);
            }
            return Ok(());
        }

        if level > self.stack.len() {
            let reason = match self.stack.last() {
                Some(top) => format!("level jumps from {} to {}", top.level, level),
                None => format!("record starts at level {} instead of 0", level),
            };
            return Err(GedcomError::MalformedLine {
                line_number: line.line_number,
                reason,
            });
        }

        self.close_to(level);
        self.stack.push(GedcomNode::from_line(line));
        Ok(())
    }

    /// Close open nodes until `depth` remain
    fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            if let Some(node) = self.stack.pop() {
                match self.stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => self.roots.push(node),
                }
            }
        }
    }

    /// Drop the record in progress, returning the level to resume at
    fn abort_record(&mut self) -> u32 {
        let bound = self.stack.first().map(|n| n.level).unwrap_or(0);
        self.stack.clear();
        bound
    }

    fn finish(mut self) -> Vec<GedcomNode> {
        self.close_to(0);
        self.roots
    }
}

/// Parse a whole document into top-level nodes
///
/// In `Lenient` mode a malformed line drops the top-level record in
/// progress; parsing resumes at the next line whose level is not deeper
/// than that record.
///
/// # Errors
///
/// In `Strict` mode returns the first `MalformedLine`.
pub fn parse_document(text: &str, mode: ParseMode) -> Result<ParsedDocument> {
    let mut builder = TreeBuilder::default();
    let mut errors = Vec::new();
    let mut resync: Option<u32> = None;

    for (number, raw) in physical_lines(text) {
        if raw.trim().is_empty() {
            continue;
        }

        let line = match parse_line(raw, number) {
            Ok(line) => line,
            Err(err) => {
                resync = Some(recover(mode, err, &mut builder, &mut errors)?);
                continue;
            }
        };

        if let Some(bound) = resync {
            if line.level > bound {
                continue;
            }
            resync = None;
        }

        if let Err(err) = builder.push(line) {
            resync = Some(recover(mode, err, &mut builder, &mut errors)?);
        }
    }

    Ok(ParsedDocument {
        nodes: builder.finish(),
        errors,
    })
}

fn recover(
    mode: ParseMode,
    err: GedcomError,
    builder: &mut TreeBuilder,
    errors: &mut Vec<GedcomError>,
) -> Result<u32> {
    match mode {
        ParseMode::Strict => Err(err),
        ParseMode::Lenient => {
            tracing::warn!(error = %err, "Skipping malformed record");
            errors.push(err);
            Ok(builder.abort_record())
        }
    }
}
