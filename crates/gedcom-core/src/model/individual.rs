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

/// Sex code (`SEX`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    pub fn code(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "M" | "m" => Some(Sex::Male),
            "F" | "f" => Some(Sex::Female),
            "U" | "u" => Some(Sex::Unknown),
            _ => None,
        }
    }
}

/// Pointer list with change-tracked insertion
fn add_pointer(list: &mut Vec<Xref>, target: Xref) -> bool {
    if list.contains(&target) {
        return false;
    }
    list.push(target);
    true
}

fn remove_pointer(list: &mut Vec<Xref>, target: &Xref) -> bool {
    let before = list.len();
    list.retain(|x| x != target);
    list.len() != before
}

/// Individual record (`INDI`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Individual {
    base: RecordBase,
    name: String,
    name_parts: Vec<Custom>,
    sex: Option<Sex>,
    child_of: Vec<Xref>,
    spouse_of: Vec<Xref>,
    notes: Vec<Xref>,
    extras: Vec<Custom>,
}

impl Individual {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: RecordBase::new(0),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.name, name.into());
        self.base.note_change(changed)
    }

    /// Structures under `NAME` (`GIVN`, `SURN`, ...), kept verbatim
    pub fn name_parts(&self) -> &[Custom] {
        &self.name_parts
    }

    pub fn sex(&self) -> Option<Sex> {
        self.sex
    }

    pub fn set_sex(&mut self, sex: Option<Sex>) -> bool {
        let changed = replace_if_changed(&mut self.sex, sex);
        self.base.note_change(changed)
    }

    /// Families in which this person is a child (`FAMC`)
    pub fn child_of(&self) -> &[Xref] {
        &self.child_of
    }

    pub fn add_child_of(&mut self, family: Xref) -> bool {
        let changed = add_pointer(&mut self.child_of, family);
        self.base.note_change(changed)
    }

    pub fn remove_child_of(&mut self, family: &Xref) -> bool {
        let changed = remove_pointer(&mut self.child_of, family);
        self.base.note_change(changed)
    }

    /// Families in which this person is a spouse (`FAMS`)
    pub fn spouse_of(&self) -> &[Xref] {
        &self.spouse_of
    }

    pub fn add_spouse_of(&mut self, family: Xref) -> bool {
        let changed = add_pointer(&mut self.spouse_of, family);
        self.base.note_change(changed)
    }

    pub fn remove_spouse_of(&mut self, family: &Xref) -> bool {
        let changed = remove_pointer(&mut self.spouse_of, family);
        self.base.note_change(changed)
    }

    pub fn notes(&self) -> &[Xref] {
        &self.notes
    }

    pub fn add_note(&mut self, note: Xref) -> bool {
        let changed = add_pointer(&mut self.notes, note);
        self.base.note_change(changed)
    }

    pub fn remove_note(&mut self, note: &Xref) -> bool {
        let changed = remove_pointer(&mut self.notes, note);
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

    pub(crate) fn push_loaded_name_part(&mut self, part: Custom) {
        self.name_parts.push(part);
    }
}

impl GedcomRecord for Individual {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn tag(&self) -> &str {
        "INDI"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Individual
    }

    fn render_lines(&self, writer: &mut LineWriter) {
        let level = self.base.level();
        writer.line(level, self.base.xref(), "INDI", None);
        if !self.name.is_empty() || !self.name_parts.is_empty() {
            writer.line(level + 1, None, "NAME", Some(&self.name));
            for part in &self.name_parts {
                part.render_at(writer, level + 2);
            }
        }
        if let Some(sex) = self.sex {
            writer.field(level + 1, "SEX", sex.code());
        }
        for family in &self.child_of {
            writer.pointer(level + 1, "FAMC", family);
        }
        for family in &self.spouse_of {
            writer.pointer(level + 1, "FAMS", family);
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
        let mut node = tree_root("individual", self);
        node.push_text("name", &self.name);
        for part in &self.name_parts {
            node.push(part.to_tree());
        }
        if let Some(sex) = self.sex {
            node.push_text("sex", sex.code());
        }
        for family in &self.child_of {
            node.push_text("famc", family.as_str());
        }
        for family in &self.spouse_of {
            node.push_text("fams", family.as_str());
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
        let mut dates = structure_change_dates(&self.name_parts);
        dates.extend(structure_change_dates(&self.extras));
        dates
    }

    fn references(&self) -> Vec<Reference> {
        let mut references: Vec<Reference> = self
            .child_of
            .iter()
            .map(|x| Reference::new("FAMC", x))
            .chain(self.spouse_of.iter().map(|x| Reference::new("FAMS", x)))
            .chain(self.notes.iter().map(|x| Reference::new("NOTE", x)))
            .collect();
        references.extend(structure_references(&self.extras));
        references
    }

    fn remap_references(&mut self, map: &HashMap<Xref, Xref>) {
        self.child_of
            .iter_mut()
            .chain(self.spouse_of.iter_mut())
            .chain(self.notes.iter_mut())
            .for_each(|x| remap(x, map));
        for extra in &mut self.extras {
            extra.remap_references(map);
        }
    }
}
