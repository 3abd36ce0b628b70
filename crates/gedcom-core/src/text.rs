//! Text formatting utilities
//!
//! Pure functions shared by every record's output routine: level rendering,
//! width measurement and the length-aware value splitter.
//!
//! Widths are counted in Unicode scalar values. Values are cut only on
//! extended grapheme cluster boundaries unless a single cluster is wider
//! than a whole line.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

/// How a piece of a split value is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Carried on the record's own line
    Primary,
    /// Concatenated onto the previous piece with no separator
    Conc,
    /// Starts a new logical line (a line break precedes it)
    Cont,
}

impl SegmentKind {
    /// Tag used for continuation segments
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            SegmentKind::Primary => None,
            SegmentKind::Conc => Some("CONC"),
            SegmentKind::Cont => Some("CONT"),
        }
    }
}

/// One physical line's share of a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// Render a level as plain decimal text
pub fn level_text(level: u32) -> String {
    level.to_string()
}

/// Width of a string in the units used for line budgets
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Normalize `\r\n` and lone `\r` to `\n`
pub fn normalize_line_breaks(value: &str) -> Cow<'_, str> {
    if value.contains('\r') {
        Cow::Owned(value.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Split `text` so that the head fits in `width`
///
/// The cut falls on a grapheme boundary. A leading cluster wider than
/// `width` is cut on scalar-value boundaries instead, and at least one
/// scalar value is always taken from a non-empty input so callers make
/// progress even with a zero width.
pub fn take_width(text: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    let mut end = 0;
    for grapheme in text.graphemes(true) {
        let w = text_width(grapheme);
        if used + w > width {
            break;
        }
        used += w;
        end += grapheme.len();
    }

    if end == 0 && !text.is_empty() {
        let scalars = width.max(1);
        end = text
            .char_indices()
            .nth(scalars)
            .map(|(idx, _)| idx)
            .unwrap_or(text.len());
    }

    text.split_at(end)
}

/// Split a value into primary, `CONC` and `CONT` segments
///
/// `primary_width` is the room left on the record's own line and
/// `continuation_width` the room left on a `CONC`/`CONT` line. Every
/// embedded line break opens a `CONT` segment; any logical line that does
/// not fit continues on `CONC` segments.
///
/// The first segment is always `Primary`, and may be empty.
pub fn split_value(value: &str, primary_width: usize, continuation_width: usize) -> Vec<Segment> {
    let normalized = normalize_line_breaks(value);
    let mut segments = Vec::new();

    for (index, logical) in normalized.split('\n').enumerate() {
        let (mut kind, mut width) = if index == 0 {
            (SegmentKind::Primary, primary_width)
        } else {
            (SegmentKind::Cont, continuation_width)
        };

        let mut rest = logical;
        loop {
            let (head, tail) = take_width(rest, width);
            segments.push(Segment {
                kind,
                text: head.to_string(),
            });
            if tail.is_empty() {
                break;
            }
            rest = tail;
            kind = SegmentKind::Conc;
            width = continuation_width;
        }
    }

    segments
}

/// Reassemble a value from its segments
///
/// Inverse of [`split_value`] up to line-break normalization.
pub fn join_segments<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = (SegmentKind, &'a str)>,
{
    let mut value = String::new();
    for (kind, text) in segments {
        if kind == SegmentKind::Cont {
            value.push('\n');
        }
        value.push_str(text);
    }
    value
}
