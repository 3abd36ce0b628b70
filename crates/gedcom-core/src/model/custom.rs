use std::collections::HashMap;

use super::base::{replace_if_changed, ChangeTracker, RecordBase};
use super::change_date::ChangeDate;
use super::record::{remap, render_change_date, GedcomRecord, RecordKind, Reference};
use crate::codec::LineWriter;
use crate::errors::Result;
use crate::tree::TreeNode;
use crate::xref::{validate_tag, Xref};

pub const DEFAULT_CUSTOM_TAG: &str = "_CUST";

/// A tag/value line with arbitrary sub-structures
///
/// Carries user-defined tags and any structure the typed records do not
/// model, so unknown content survives a load/save cycle. Children are kept
/// one level below their parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Custom {
    base: RecordBase,
    tag: String,
    value: String,
    children: Vec<Custom>,
}

impl Custom {
    /// # Errors
    ///
    /// Returns `InvalidTag` if the tag cannot be written as a single token.
    pub fn new(tag: &str) -> Result<Self> {
        validate_tag(tag)?;
        Ok(Self {
            base: RecordBase::new(0),
            tag: tag.to_string(),
            value: String::new(),
            children: Vec::new(),
        })
    }

    /// # Errors
    ///
    /// Returns `InvalidTag` if the tag cannot be written as a single token.
    pub fn with_value(tag: &str, value: impl Into<String>) -> Result<Self> {
        let mut custom = Self::new(tag)?;
        custom.value = value.into();
        Ok(custom)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Change the tag
    ///
    /// # Errors
    ///
    /// Returns `InvalidTag` if the tag cannot be written as a single token.
    pub fn set_tag(&mut self, tag: &str) -> Result<bool> {
        validate_tag(tag)?;
        let changed = replace_if_changed(&mut self.tag, tag.to_string());
        Ok(self.base.note_change(changed))
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> bool {
        let changed = replace_if_changed(&mut self.value, value.into());
        self.base.note_change(changed)
    }

    pub fn children(&self) -> &[Custom] {
        &self.children
    }

    /// Append a sub-structure one level below this one
    pub fn add_child(&mut self, mut child: Custom) {
        child.set_level(self.base.level() + 1);
        self.children.push(child);
        self.base.changed();
    }

    /// Append a sub-structure read from a file; not a change
    pub(crate) fn push_loaded_child(&mut self, mut child: Custom) {
        child.set_level(self.base.level() + 1);
        self.children.push(child);
    }

    /// Move this structure and its children
    pub fn set_level(&mut self, level: u32) {
        self.base.set_level(level);
        for child in &mut self.children {
            child.set_level(level + 1);
        }
    }

    /// First child with the given tag
    pub fn child(&self, tag: &str) -> Option<&Custom> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// Write at `level` regardless of the stored level
    pub(crate) fn render_at(&self, writer: &mut LineWriter, level: u32) {
        writer.line(level, self.base.xref(), &self.tag, Some(&self.value));
        for child in &self.children {
            child.render_at(writer, level + 1);
        }
    }

    fn collect_change_dates<'a>(&'a self, out: &mut Vec<&'a ChangeDate>) {
        for child in &self.children {
            if let Some(date) = child.base.change_date() {
                out.push(date);
            }
            child.collect_change_dates(out);
        }
    }

    fn collect_references(&self, out: &mut Vec<Reference>) {
        if let Some(target) = Xref::from_pointer(&self.value) {
            out.push(Reference::new(self.tag.clone(), &target));
        }
        for child in &self.children {
            child.collect_references(out);
        }
    }

    fn tree_node(&self) -> TreeNode {
        let name = self.tag.to_lowercase();
        if self.children.is_empty() && self.base.xref().is_none() {
            return TreeNode::text(name, self.value.clone());
        }
        let mut node = TreeNode::element(name);
        if let Some(xref) = self.base.xref() {
            node.push_text("id", xref.as_str());
        }
        node.push_text("value", &self.value);
        for child in &self.children {
            node.push(child.tree_node());
        }
        node
    }
}

impl GedcomRecord for Custom {
    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        &mut self.base
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Custom
    }

    /// Inline structures carry no `CHAN`; only identified ones do.
    fn render_lines(&self, writer: &mut LineWriter) {
        self.render_at(writer, self.base.level());
        if self.base.xref().is_some() {
            render_change_date(self, writer);
        }
    }

    fn to_tree(&self) -> TreeNode {
        let mut node = self.tree_node();
        if self.base.xref().is_some() {
            if let Some(date) = self.effective_change_date() {
                node.push(date.to_tree());
            }
        }
        node
    }

    fn composite_change_dates(&self) -> Vec<&ChangeDate> {
        let mut dates = Vec::new();
        self.collect_change_dates(&mut dates);
        dates
    }

    fn references(&self) -> Vec<Reference> {
        let mut references = Vec::new();
        self.collect_references(&mut references);
        references
    }

    fn remap_references(&mut self, map: &HashMap<Xref, Xref>) {
        if let Some(mut target) = Xref::from_pointer(&self.value) {
            if map.contains_key(&target) {
                remap(&mut target, map);
                self.value = target.pointer();
            }
        }
        for child in &mut self.children {
            child.remap_references(map);
        }
    }
}

/// Change dates held anywhere in a list of sub-structures
pub(crate) fn structure_change_dates(structures: &[Custom]) -> Vec<&ChangeDate> {
    let mut dates = Vec::new();
    for structure in structures {
        if let Some(date) = structure.base.change_date() {
            dates.push(date);
        }
        structure.collect_change_dates(&mut dates);
    }
    dates
}

/// Pointers held anywhere in a list of sub-structures
pub(crate) fn structure_references(structures: &[Custom]) -> Vec<Reference> {
    let mut references = Vec::new();
    for structure in structures {
        structure.collect_references(&mut references);
    }
    references
}

impl Default for Custom {
    fn default() -> Self {
        Self {
            base: RecordBase::new(0),
            tag: DEFAULT_CUSTOM_TAG.to_string(),
            value: String::new(),
            children: Vec::new(),
        }
    }
}
