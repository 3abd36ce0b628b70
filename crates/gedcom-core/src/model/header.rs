use std::collections::HashMap;

use super::base::{replace_if_changed, ChangeTracker, RecordBase};
use super::custom::{structure_references, Custom};
use super::record::{remap, GedcomRecord, RecordKind, Reference};
use crate::codec::LineWriter;
use crate::tree::TreeNode;
use crate::xref::Xref;

pub const DEFAULT_SOURCE: &str = "GEDCOM_CORE";
pub const GEDCOM_VERSION: &str = "5.5.1";
pub const GEDCOM_FORM: &str = "LINEAGE-LINKED";
pub const CHARACTER_SET: &str = "UTF-8";

/// File header (`HEAD`)
///
/// Carries no transmission date so that output depends only on content.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    base: RecordBase,
    source: String,
    version: String,
    form: String,
    charset: String,
    submitter: Option<Xref>,
    extras: Vec<Custom>,
}

impl Header {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(0),
            source: source.into(),
            version: GEDCOM_VERSION.to_string(),
            form: GEDCOM_FORM.to_string(),
            charset: CHARACTER_SET.to_string(),
            submitter: None,
            extras: Vec::new(),
        }
    }

    /// Approved system id (`SOUR`)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn set_source(&mut self, source: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.source, source.into());
        self.base.note_change(changed)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    pub fn submitter(&self) -> Option<&Xref> {
        self.submitter.as_ref()
    }

    pub fn set_submitter(&mut self, submitter: Option<Xref>) -> bool {
        let changed = replace_if_changed(&mut self.submitter, submitter);
        self.base.note_change(changed)
    }

    pub fn extras(&self) -> &[Custom] {
        &self.extras
    }

    pub(crate) fn set_loaded_gedc(&mut self, version: &str, form: &str) {
        if !version.is_empty() {
            self.version = version.to_string();
        }
        if !form.is_empty() {
            self.form = form.to_string();
        }
    }

    pub(crate) fn set_loaded_charset(&mut self, charset: &str) {
        self.charset = charset.to_string();
    }

    pub(crate) fn set_loaded_submitter(&mut self, submitter: Option<Xref>) {
        self.submitter = submitter;
    }

    pub(crate) fn push_loaded_extra(&mut self, extra: Custom) {
        self.extras.push(extra);
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE)
    }
}

impl GedcomRecord for Header {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn tag(&self) -> &str {
        "HEAD"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Header
    }

    fn render_lines(&self, writer: &mut LineWriter) {
        let level = self.base.level();
        writer.line(level, None, "HEAD", None);
        writer.field(level + 1, "SOUR", &self.source);
        writer.line(level + 1, None, "GEDC", None);
        writer.field(level + 2, "VERS", &self.version);
        writer.field(level + 2, "FORM", &self.form);
        writer.field(level + 1, "CHAR", &self.charset);
        if let Some(submitter) = &self.submitter {
            writer.pointer(level + 1, "SUBM", submitter);
        }
        for extra in &self.extras {
            extra.render_at(writer, level + 1);
        }
    }

    fn to_tree(&self) -> TreeNode {
        let mut node = TreeNode::element("header");
        node.push_text("source", &self.source);
        node.push_text("version", &self.version);
        node.push_text("form", &self.form);
        node.push_text("charset", &self.charset);
        if let Some(submitter) = &self.submitter {
            node.push_text("submitter", submitter.as_str());
        }
        for extra in &self.extras {
            node.push(extra.to_tree());
        }
        node
    }

    fn references(&self) -> Vec<Reference> {
        let mut references: Vec<Reference> = self
            .submitter
            .iter()
            .map(|s| Reference::new("SUBM", s))
            .collect();
        references.extend(structure_references(&self.extras));
        references
    }

    fn remap_references(&mut self, map: &HashMap<Xref, Xref>) {
        if let Some(submitter) = &mut self.submitter {
            remap(submitter, map);
        }
        for extra in &mut self.extras {
            extra.remap_references(map);
        }
    }
}

/// End-of-file marker (`TRLR`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trailer {
    base: RecordBase,
}

impl Trailer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GedcomRecord for Trailer {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn tag(&self) -> &str {
        "TRLR"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Trailer
    }

    fn render_lines(&self, writer: &mut LineWriter) {
        writer.line(self.base.level(), None, "TRLR", None);
    }

    fn to_tree(&self) -> TreeNode {
        TreeNode::element("trailer")
    }
}
