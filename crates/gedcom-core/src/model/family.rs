use std::collections::HashMap;

use super::base::{replace_if_changed, ChangeTracker, RecordBase};
use super::change_date::ChangeDate;
use super::custom::{structure_change_dates, structure_references, Custom};
use super::record::{
    remap, render_change_date, tree_finish, tree_root, GedcomRecord, RecordKind, Reference,
};
use crate::codec::LineWriter;
use crate::tree::TreeNode;
use crate::xref::Xref;

/// Family record (`FAM`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Family {
    base: RecordBase,
    husband: Option<Xref>,
    wife: Option<Xref>,
    children: Vec<Xref>,
    notes: Vec<Xref>,
    extras: Vec<Custom>,
}

impl Family {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn husband(&self) -> Option<&Xref> {
        self.husband.as_ref()
    }

    pub fn set_husband(&mut self, husband: Option<Xref>) -> bool {
        let changed = replace_if_changed(&mut self.husband, husband);
        self.base.note_change(changed)
    }

    pub fn wife(&self) -> Option<&Xref> {
        self.wife.as_ref()
    }

    pub fn set_wife(&mut self, wife: Option<Xref>) -> bool {
        let changed = replace_if_changed(&mut self.wife, wife);
        self.base.note_change(changed)
    }

    pub fn children(&self) -> &[Xref] {
        &self.children
    }

    pub fn add_child(&mut self, child: Xref) -> bool {
        let changed = !self.children.contains(&child);
        if changed {
            self.children.push(child);
        }
        self.base.note_change(changed)
    }

    pub fn remove_child(&mut self, child: &Xref) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c != child);
        let changed = self.children.len() != before;
        self.base.note_change(changed)
    }

    pub fn notes(&self) -> &[Xref] {
        &self.notes
    }

    pub fn add_note(&mut self, note: Xref) -> bool {
        let changed = !self.notes.contains(&note);
        if changed {
            self.notes.push(note);
        }
        self.base.note_change(changed)
    }

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

impl GedcomRecord for Family {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn tag(&self) -> &str {
        "FAM"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Family
    }

    fn render_lines(&self, writer: &mut LineWriter) {
        let level = self.base.level();
        writer.line(level, self.base.xref(), "FAM", None);
        if let Some(husband) = &self.husband {
            writer.pointer(level + 1, "HUSB", husband);
        }
        if let Some(wife) = &self.wife {
            writer.pointer(level + 1, "WIFE", wife);
        }
        for child in &self.children {
            writer.pointer(level + 1, "CHIL", child);
        }
        for note in &self.notes {
            writer.pointer(level + 1, "NOTE", note);
        }
        for extra in &self.extras {
            extra.render_at(writer, level + 1);
        }
        render_change_date(self, writer);
    }

    fn to_tree(&self) -> TreeNode {
        let mut node = tree_root("family", self);
        if let Some(husband) = &self.husband {
            node.push_text("husband", husband.as_str());
        }
        if let Some(wife) = &self.wife {
            node.push_text("wife", wife.as_str());
        }
        for child in &self.children {
            node.push_text("child", child.as_str());
        }
        for note in &self.notes {
            node.push_text("note", note.as_str());
        }
        for extra in &self.extras {
            node.push(extra.to_tree());
        }
        tree_finish(node, self)
    }

    fn composite_change_dates(&self) -> Vec<&ChangeDate> {
        structure_change_dates(&self.extras)
    }

    fn references(&self) -> Vec<Reference> {
        let mut references = Vec::new();
        if let Some(husband) = &self.husband {
            references.push(Reference::new("HUSB", husband));
        }
        if let Some(wife) = &self.wife {
            references.push(Reference::new("WIFE", wife));
        }
        references.extend(self.children.iter().map(|c| Reference::new("CHIL", c)));
        references.extend(self.notes.iter().map(|n| Reference::new("NOTE", n)));
        references.extend(structure_references(&self.extras));
        references
    }

    fn remap_references(&mut self, map: &HashMap<Xref, Xref>) {
        self.husband
            .iter_mut()
            .chain(self.wife.iter_mut())
            .chain(self.children.iter_mut())
            .chain(self.notes.iter_mut())
            .for_each(|x| remap(x, map));
        for extra in &mut self.extras {
            extra.remap_references(map);
        }
    }
}
