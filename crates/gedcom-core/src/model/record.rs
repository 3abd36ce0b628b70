//! Record capability set and the closed set of stored variants

use std::collections::HashMap;

use super::base::RecordBase;
use super::change_date::ChangeDate;
use super::{Custom, Family, Individual, Note, Submitter};
use crate::codec::{LineWriter, WriterConfig};
use crate::tree::TreeNode;
use crate::xref::Xref;

/// Variant of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Header,
    Submitter,
    Note,
    Individual,
    Family,
    Custom,
    Trailer,
}

impl RecordKind {
    /// Prefix for identifiers generated for this kind
    pub fn xref_prefix(&self) -> &'static str {
        match self {
            RecordKind::Submitter => "S",
            RecordKind::Note => "N",
            RecordKind::Individual => "I",
            RecordKind::Family => "F",
            RecordKind::Header | RecordKind::Custom | RecordKind::Trailer => "X",
        }
    }

    /// Whether a record of this kind always carries an identifier
    pub fn requires_xref(&self) -> bool {
        matches!(
            self,
            RecordKind::Submitter | RecordKind::Note | RecordKind::Individual | RecordKind::Family
        )
    }
}

/// A pointer from a record (or one of its sub-structures) to another record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub tag: String,
    pub target: Xref,
}

impl Reference {
    pub fn new(tag: impl Into<String>, target: &Xref) -> Self {
        Self {
            tag: tag.into(),
            target: target.clone(),
        }
    }
}

/// Capabilities shared by every record
///
/// Rendering never mutates: levels for the change-date block are stamped on
/// a copy.
pub trait GedcomRecord {
    fn base(&self) -> &RecordBase;

    fn base_mut(&mut self) -> &mut RecordBase;

    /// Tag of the record's own line
    fn tag(&self) -> &str;

    fn kind(&self) -> RecordKind;

    /// Write the record and all of its sub-structures
    fn render_lines(&self, writer: &mut LineWriter);

    /// Same content as [`GedcomRecord::render_lines`], as a tree
    fn to_tree(&self) -> TreeNode;

    /// Change dates of owned composites
    fn composite_change_dates(&self) -> Vec<&ChangeDate> {
        Vec::new()
    }

    /// Pointers to other records, in rendering order
    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    /// Rewrite pointers whose target appears in `map`
    ///
    /// Structural; does not count as a change.
    fn remap_references(&mut self, _map: &HashMap<Xref, Xref>) {}

    fn level(&self) -> u32 {
        self.base().level()
    }

    fn xref(&self) -> Option<&Xref> {
        self.base().xref()
    }

    fn is_dirty(&self) -> bool {
        self.base().is_dirty()
    }

    fn mark_clean(&mut self) {
        self.base_mut().mark_clean();
    }

    /// Latest of the record's own change date and its composites', stamped
    /// with `level + 2`
    fn effective_change_date(&self) -> Option<ChangeDate> {
        self.composite_change_dates()
            .into_iter()
            .fold(self.base().change_date().cloned(), |latest, date| {
                ChangeDate::later(latest.as_ref(), Some(date))
            })
            .map(|date| date.stamped(self.level() + 2))
    }

    /// Render into a standalone string
    fn render(&self, config: WriterConfig) -> String {
        let mut writer = LineWriter::new(config);
        self.render_lines(&mut writer);
        writer.into_string()
    }
}

/// Write the effective change date, if any
pub(crate) fn render_change_date(record: &dyn GedcomRecord, writer: &mut LineWriter) {
    if let Some(date) = record.effective_change_date() {
        date.render(writer);
    }
}

/// Start a record's tree node with its identifier
pub(crate) fn tree_root(name: &str, record: &dyn GedcomRecord) -> TreeNode {
    let mut node = TreeNode::element(name);
    if let Some(xref) = record.xref() {
        node.push_text("id", xref.as_str());
    }
    node
}

/// Finish a record's tree node with its change date
pub(crate) fn tree_finish(mut node: TreeNode, record: &dyn GedcomRecord) -> TreeNode {
    if let Some(date) = record.effective_change_date() {
        node.push(date.to_tree());
    }
    node
}

pub(crate) fn remap(xref: &mut Xref, map: &HashMap<Xref, Xref>) {
    if let Some(new) = map.get(xref) {
        *xref = new.clone();
    }
}

/// A record stored in a document
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Submitter(Submitter),
    Note(Note),
    Individual(Individual),
    Family(Family),
    Custom(Custom),
}

macro_rules! dispatch {
    ($self:expr, $record:ident => $body:expr) => {
        match $self {
            Record::Submitter($record) => $body,
            Record::Note($record) => $body,
            Record::Individual($record) => $body,
            Record::Family($record) => $body,
            Record::Custom($record) => $body,
        }
    };
}

impl Record {
    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Record::Note(note) => Some(note),
            _ => None,
        }
    }

    pub fn as_note_mut(&mut self) -> Option<&mut Note> {
        match self {
            Record::Note(note) => Some(note),
            _ => None,
        }
    }

    pub fn as_submitter(&self) -> Option<&Submitter> {
        match self {
            Record::Submitter(submitter) => Some(submitter),
            _ => None,
        }
    }

    pub fn as_submitter_mut(&mut self) -> Option<&mut Submitter> {
        match self {
            Record::Submitter(submitter) => Some(submitter),
            _ => None,
        }
    }

    pub fn as_individual(&self) -> Option<&Individual> {
        match self {
            Record::Individual(individual) => Some(individual),
            _ => None,
        }
    }

    pub fn as_individual_mut(&mut self) -> Option<&mut Individual> {
        match self {
            Record::Individual(individual) => Some(individual),
            _ => None,
        }
    }

    pub fn as_family(&self) -> Option<&Family> {
        match self {
            Record::Family(family) => Some(family),
            _ => None,
        }
    }

    pub fn as_family_mut(&mut self) -> Option<&mut Family> {
        match self {
            Record::Family(family) => Some(family),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&Custom> {
        match self {
            Record::Custom(custom) => Some(custom),
            _ => None,
        }
    }

    pub fn as_custom_mut(&mut self) -> Option<&mut Custom> {
        match self {
            Record::Custom(custom) => Some(custom),
            _ => None,
        }
    }
}

impl GedcomRecord for Record {
    fn base(&self) -> &RecordBase {
        dispatch!(self, r => r.base())
    }

    fn base_mut(&mut self) -> &mut RecordBase {
        dispatch!(self, r => r.base_mut())
    }

    fn tag(&self) -> &str {
        dispatch!(self, r => r.tag())
    }

    fn kind(&self) -> RecordKind {
        dispatch!(self, r => r.kind())
    }

    fn render_lines(&self, writer: &mut LineWriter) {
        dispatch!(self, r => r.render_lines(writer))
    }

    fn to_tree(&self) -> TreeNode {
        dispatch!(self, r => r.to_tree())
    }

    fn composite_change_dates(&self) -> Vec<&ChangeDate> {
        dispatch!(self, r => r.composite_change_dates())
    }

    fn references(&self) -> Vec<Reference> {
        dispatch!(self, r => r.references())
    }

    fn remap_references(&mut self, map: &HashMap<Xref, Xref>) {
        dispatch!(self, r => r.remap_references(map))
    }

    fn is_dirty(&self) -> bool {
        dispatch!(self, r => r.is_dirty())
    }

    fn mark_clean(&mut self) {
        dispatch!(self, r => r.mark_clean())
    }
}

impl From<Note> for Record {
    fn from(note: Note) -> Self {
        Record::Note(note)
    }
}

impl From<Submitter> for Record {
    fn from(submitter: Submitter) -> Self {
        Record::Submitter(submitter)
    }
}

impl From<Individual> for Record {
    fn from(individual: Individual) -> Self {
        Record::Individual(individual)
    }
}

impl From<Family> for Record {
    fn from(family: Family) -> Self {
        Record::Family(family)
    }
}

impl From<Custom> for Record {
    fn from(custom: Custom) -> Self {
        Record::Custom(custom)
    }
}
