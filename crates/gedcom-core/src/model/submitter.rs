use std::collections::HashMap;

use super::address::Address;
use super::base::{replace_if_changed, ChangeTracker, RecordBase};
use super::change_date::ChangeDate;
use super::custom::{structure_change_dates, structure_references, Custom};
use super::record::{
    render_change_date, tree_finish, tree_root, GedcomRecord, RecordKind, Reference,
};
use crate::codec::LineWriter;
use crate::tree::TreeNode;
use crate::xref::Xref;

/// Written in place of an empty submitter name; `NAME` is mandatory.
pub const UNKNOWN_SUBMITTER_NAME: &str = "Unknown";

/// Submitter record (`SUBM`)
///
/// `NAME` is always written, using a placeholder when empty, while an empty
/// registered file number omits `RFN` entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submitter {
    base: RecordBase,
    name: String,
    address: Address,
    languages: Vec<String>,
    registered_rfn: String,
    rin: String,
    extras: Vec<Custom>,
}

impl Submitter {
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

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Address changes stamp the address's own change date
    pub fn address_mut(&mut self) -> &mut Address {
        &mut self.address
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn add_language(&mut self, language: impl Into<String>) -> bool {
        let language = language.into();
        let changed = !language.is_empty() && !self.languages.contains(&language);
        if changed {
            self.languages.push(language);
        }
        self.base.note_change(changed)
    }

    pub fn registered_rfn(&self) -> &str {
        &self.registered_rfn
    }

    pub fn set_registered_rfn(&mut self, rfn: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.registered_rfn, rfn.into());
        self.base.note_change(changed)
    }

    /// Automated record id (`RIN`)
    pub fn rin(&self) -> &str {
        &self.rin
    }

    pub fn set_rin(&mut self, rin: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.rin, rin.into());
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

    fn name_or_placeholder(&self) -> &str {
        if self.name.is_empty() {
            UNKNOWN_SUBMITTER_NAME
        } else {
            &self.name
        }
    }
}

impl GedcomRecord for Submitter {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn tag(&self) -> &str {
        "SUBM"
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Submitter
    }

    fn render_lines(&self, writer: &mut LineWriter) {
        let level = self.base.level();
        writer.line(level, self.base.xref(), "SUBM", None);
        writer.line(level + 1, None, "NAME", Some(self.name_or_placeholder()));
        self.address.render(writer, level + 1);
        for language in &self.languages {
            writer.field(level + 1, "LANG", language);
        }
        writer.field(level + 1, "RFN", &self.registered_rfn);
        writer.field(level + 1, "RIN", &self.rin);
        for extra in &self.extras {
            extra.render_at(writer, level + 1);
        }
        render_change_date(self, writer);
    }

    fn to_tree(&self) -> TreeNode {
        let mut node = tree_root("submitter", self);
        node.push_text("name", self.name_or_placeholder());
        if !self.address.is_empty() {
            node.push(self.address.to_tree());
        }
        for language in &self.languages {
            node.push_text("language", language);
        }
        node.push_text("rfn", &self.registered_rfn);
        node.push_text("rin", &self.rin);
        for extra in &self.extras {
            node.push(extra.to_tree());
        }
        tree_finish(node, self)
    }

    fn composite_change_dates(&self) -> Vec<&ChangeDate> {
        let mut dates: Vec<&ChangeDate> = self.address.change_date().into_iter().collect();
        dates.extend(structure_change_dates(&self.extras));
        dates
    }

    fn references(&self) -> Vec<Reference> {
        structure_references(&self.extras)
    }

    fn remap_references(&mut self, map: &HashMap<Xref, Xref>) {
        for extra in &mut self.extras {
            extra.remap_references(map);
        }
    }

    fn is_dirty(&self) -> bool {
        self.base.is_dirty() || self.address.is_dirty()
    }

    fn mark_clean(&mut self) {
        self.base.mark_clean();
        self.address.mark_clean();
    }
}
