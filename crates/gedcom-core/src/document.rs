//! Document: record arena, registry and whole-file output
//!
//! A document owns its records and the registry that maps identifiers to
//! them. Records are kept in insertion order; the header is written first
//! and a trailer is always written last.

use std::collections::HashMap;
use std::io::Write;
use std::time::Instant;

use indexmap::IndexMap;

use crate::codec::{LineWriter, WriterConfig};
use crate::errors::{GedcomError, Result};
use crate::model::{GedcomRecord, Header, Record, RecordKind, Trailer};
use crate::registry::{RecordKey, Registry};
use crate::tree::TreeNode;
use crate::xref::Xref;
use crate::{log_op_end, log_op_error, log_op_start};

/// A pointer whose target no record defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Identifier of the record holding the pointer; `None` for the header
    /// and unidentified records
    pub from: Option<Xref>,
    pub tag: String,
    pub target: Xref,
}

impl DanglingReference {
    pub fn to_error(&self) -> GedcomError {
        GedcomError::UnresolvedReference {
            target: self.target.to_string(),
            tag: self.tag.clone(),
            from: self
                .from
                .as_ref()
                .map(|x| x.pointer())
                .unwrap_or_else(|| "HEAD".to_string()),
        }
    }
}

/// Outcome of [`Document::merge`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Records moved into the target document
    pub added: usize,
    /// Identifiers that collided, with their replacements
    pub remapped: Vec<(Xref, Xref)>,
}

/// An in-memory GEDCOM file
#[derive(Debug, Clone)]
pub struct Document {
    header: Header,
    registry: Registry,
    records: IndexMap<RecordKey, Record>,
    next_key: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::with_header(Header::default())
    }

    pub fn with_header(header: Header) -> Self {
        Self {
            header,
            registry: Registry::new(),
            records: IndexMap::new(),
            next_key: 0,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub(crate) fn set_header(&mut self, header: Header) {
        self.header = header;
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Add a record, generating an identifier when it needs one
    ///
    /// Records that already carry an identifier are registered under it.
    /// Inline-capable kinds (custom records) without one stay unidentified.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` if the record's identifier is taken, or
    /// `IdentifierSpaceExhausted` if no identifier can be generated.
    pub fn add_record(&mut self, record: impl Into<Record>) -> Result<RecordKey> {
        let mut record = record.into();
        if record.xref().is_none() && record.kind().requires_xref() {
            let xref = self
                .registry
                .generate_identifier(record.kind().xref_prefix())?;
            record.base_mut().set_xref(Some(xref));
        }
        self.insert_loaded(record)
    }

    /// Insert a record under the identifier it already carries
    ///
    /// Never generates identifiers and never touches change dates.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateIdentifier` if the identifier is already mapped.
    pub fn insert_loaded(&mut self, mut record: Record) -> Result<RecordKey> {
        self.next_key += 1;
        let key = RecordKey::new(self.next_key);
        if let Some(xref) = record.xref().cloned() {
            self.registry.add(xref.clone(), key)?;
            record.base_mut().assign(xref, self.registry.id());
        }
        self.records.insert(key, record);
        Ok(key)
    }

    pub fn get(&self, key: RecordKey) -> Option<&Record> {
        self.records.get(&key)
    }

    pub fn get_mut(&mut self, key: RecordKey) -> Option<&mut Record> {
        self.records.get_mut(&key)
    }

    pub fn key_of(&self, xref: &Xref) -> Option<RecordKey> {
        self.registry.lookup(xref)
    }

    /// Resolve an identifier to its record
    pub fn lookup(&self, xref: &Xref) -> Option<&Record> {
        self.registry
            .lookup(xref)
            .and_then(|key| self.records.get(&key))
    }

    pub fn lookup_mut(&mut self, xref: &Xref) -> Option<&mut Record> {
        let key = self.registry.lookup(xref)?;
        self.records.get_mut(&key)
    }

    /// Remove a record by identifier
    ///
    /// Pointers to it held by other records become dangling.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record is registered under `xref`.
    pub fn remove(&mut self, xref: &Xref) -> Result<Record> {
        self.registry
            .lookup(xref)
            .and_then(|key| self.remove_key(key))
            .ok_or_else(|| GedcomError::RecordNotFound {
                xref: xref.to_string(),
            })
    }

    pub fn remove_key(&mut self, key: RecordKey) -> Option<Record> {
        let record = self.records.shift_remove(&key)?;
        if let Some(xref) = record.xref() {
            self.registry.remove(xref);
        }
        Some(record)
    }

    /// Records in insertion order, header and trailer excluded
    pub fn records(&self) -> impl Iterator<Item = (RecordKey, &Record)> {
        self.records.iter().map(|(key, record)| (*key, record))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record changed since load or the last `mark_clean`
    pub fn is_dirty(&self) -> bool {
        self.header.is_dirty() || self.records.values().any(|r| r.is_dirty())
    }

    pub fn mark_clean(&mut self) {
        self.header.mark_clean();
        for record in self.records.values_mut() {
            record.mark_clean();
        }
    }

    /// Header first, then records, then the trailer
    fn render_order<'a>(
        &'a self,
        trailer: &'a Trailer,
    ) -> impl Iterator<Item = &'a dyn GedcomRecord> {
        std::iter::once(&self.header as &dyn GedcomRecord)
            .chain(self.records.values().map(|r| r as &dyn GedcomRecord))
            .chain(std::iter::once(trailer as &dyn GedcomRecord))
    }

    /// Write the whole file to `sink`, one record per write
    ///
    /// The leading terminator of the first line is dropped. Returns the
    /// number of lines written.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the sink fails; records already written stay written.
    pub fn write_to<W: Write>(&self, sink: &mut W, config: WriterConfig) -> Result<usize> {
        let trailer = Trailer::new();
        let mut line_count = 0;
        let mut first = true;

        for record in self.render_order(&trailer) {
            let mut writer = LineWriter::new(config);
            record.render_lines(&mut writer);
            line_count += writer.line_count();

            let text = writer.into_string();
            let chunk = if first {
                text.strip_prefix(config.terminator.as_str())
                    .unwrap_or(&text)
            } else {
                &text
            };
            sink.write_all(chunk.as_bytes())?;
            first = false;
        }

        Ok(line_count)
    }

    /// Render the whole file into a string
    ///
    /// # Errors
    ///
    /// Returns `Internal` only if rendering produced invalid UTF-8.
    pub fn render(&self, config: WriterConfig) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, config)?;
        String::from_utf8(buffer).map_err(|e| GedcomError::Internal {
            message: e.to_string(),
        })
    }

    pub fn to_tree(&self) -> TreeNode {
        let mut root = TreeNode::element("gedcom");
        root.push(self.header.to_tree());
        for record in self.records.values() {
            root.push(record.to_tree());
        }
        root
    }

    /// Pointers whose targets are not registered, in document order
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let header = std::iter::once(&self.header as &dyn GedcomRecord);
        let records = self.records.values().map(|r| r as &dyn GedcomRecord);

        let mut dangling = Vec::new();
        for record in header.chain(records) {
            for reference in record.references() {
                if !self.registry.contains(&reference.target) {
                    dangling.push(DanglingReference {
                        from: record.xref().cloned(),
                        tag: reference.tag,
                        target: reference.target,
                    });
                }
            }
        }
        dangling
    }

    /// Move every record of `other` into this document
    ///
    /// Identifiers that collide with ones already here are replaced by fresh
    /// identifiers, and every pointer in the incoming records is rewritten
    /// to match. The other document's header is discarded.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierSpaceExhausted` if replacements cannot be generated.
    pub fn merge(&mut self, other: Document) -> Result<MergeReport> {
        let op = "merge_documents";
        let start = Instant::now();
        log_op_start!(op, record_count = other.len());

        match self.merge_records(other) {
            Ok(report) => {
                log_op_end!(
                    op,
                    duration_ms = start.elapsed().as_millis() as u64,
                    record_count = report.added,
                    remapped = report.remapped.len()
                );
                Ok(report)
            }
            Err(err) => {
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn merge_records(&mut self, other: Document) -> Result<MergeReport> {
        let mut map = HashMap::new();
        let mut report = MergeReport::default();

        for (xref, key) in other.registry.iter() {
            if !self.registry.contains(xref) {
                continue;
            }
            let prefix = other
                .records
                .get(&key)
                .map(|r| r.kind())
                .unwrap_or(RecordKind::Custom)
                .xref_prefix();
            let fresh = loop {
                let candidate = self.registry.generate_identifier(prefix)?;
                if !other.registry.contains(&candidate) {
                    break candidate;
                }
            };
            tracing::debug!(from = %xref, to = %fresh, "Remapping colliding identifier");
            report.remapped.push((xref.clone(), fresh.clone()));
            map.insert(xref.clone(), fresh);
        }

        for (_, mut record) in other.records {
            record.remap_references(&map);
            if let Some(fresh) = record.xref().and_then(|x| map.get(x)).cloned() {
                record.base_mut().set_xref(Some(fresh));
            }
            self.insert_loaded(record)?;
            report.added += 1;
        }

        Ok(report)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
