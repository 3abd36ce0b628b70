use std::collections::HashMap;

use super::base::{replace_if_changed, ChangeTracker, RecordBase};
use super::change_date::ChangeDate;
use super::custom::{structure_change_dates, structure_references, Custom};
use super::record::{
    render_change_date, tree_finish, tree_root, GedcomRecord, RecordKind, Reference,
};
use crate::codec::LineWriter;
use crate::tree::TreeNode;
use crate::xref::Xref;

/// Free-text note record (`NOTE`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    base: RecordBase,
    text: String,
    extras: Vec<Custom>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(0),
            text: text.into(),
            extras: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.text, text.into());
        self.base.note_change(changed)
    }

    /// Sub-structures kept verbatim
    pub fn extras(&self) -> &[Custom] {
        &self.extras
    }

    pub fn add_extra(&mut self, mut extra: Custom) {
        extra.set_level(self.base.level() + 1);
        self.extras.push(extra);
        self.base.changed();
    }

    pub(crate) fn push_loaded_extra(&mut self, extra: Custom) {
        self.extras.push(extra);
    }
}

impl GedcomRecord for Note {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn tag(&self) -> &str {
        "NOTE"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Note
    }

    fn render_lines(&self, writer: &mut LineWriter) {
        let level = self.base.level();
        writer.line(level, self.base.xref(), "NOTE", Some(&self.text));
        for extra in &self.extras {
            extra.render_at(writer, level + 1);
        }
        render_change_date(self, writer);
    }

    fn to_tree(&self) -> TreeNode {
        let mut node = tree_root("note", self);
        node.push_text("text", &self.text);
        for extra in &self.extras {
            node.push(extra.to_tree());
        }
        tree_finish(node, self)
    }

    fn composite_change_dates(&self) -> Vec<&ChangeDate> {
        structure_change_dates(&self.extras)
    }

    fn references(&self) -> Vec<Reference> {
        structure_references(&self.extras)
    }

    fn remap_references(&mut self, map: &HashMap<Xref, Xref>) {
        for extra in &mut self.extras {
            extra.remap_references(map);
        }
    }
}
