//! Loader: parsed node trees to typed records
//!
//! Known record tags become typed records; anything else, and any
//! sub-structure a typed record does not model, is kept as [`Custom`] so a
//! load/save cycle preserves it. A typed field is only recognised when its
//! line has no sub-structure of its own (`NAME` excepted); otherwise the
//! whole line is kept verbatim.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::codec::{parse_document, GedcomNode, ParseMode};
use crate::document::{DanglingReference, Document};
use crate::errors::{GedcomError, Result};
use crate::model::{
    ChangeDate, Custom, Family, GedcomRecord, Header, Individual, Note, Record, Sex, Submitter,
};
use crate::{log_op_end, log_op_error, log_op_start};

/// How the loader treats pointers to undefined identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferencePolicy {
    /// Fail the load on the first unresolved pointer
    #[default]
    Strict,
    /// Keep the pointer and report it
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub parse_mode: ParseMode,
    pub reference_policy: ReferencePolicy,
}

impl LoadOptions {
    /// Lenient parsing and lenient references
    pub fn lenient() -> Self {
        Self {
            parse_mode: ParseMode::Lenient,
            reference_policy: ReferencePolicy::Lenient,
        }
    }
}

/// What a load skipped or could not resolve
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Records placed in the document, header excluded
    pub record_count: usize,
    /// Malformed lines dropped by a lenient parse
    pub malformed: Vec<GedcomError>,
    /// Pointers left unresolved under the lenient policy
    pub dangling: Vec<DanglingReference>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.dangling.is_empty()
    }
}

/// Parse `text` and build a document from it
///
/// # Errors
///
/// Returns `MalformedLine` under strict parsing, `DuplicateIdentifier` if
/// two records share an identifier, and `UnresolvedReference` under the
/// strict reference policy.
pub fn load_document(text: &str, options: LoadOptions) -> Result<(Document, LoadReport)> {
    let op = "load_document";
    let start = Instant::now();
    log_op_start!(op, byte_count = text.len());

    match load_inner(text, options) {
        Ok((document, report)) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                record_count = report.record_count,
                malformed = report.malformed.len(),
                dangling = report.dangling.len()
            );
            Ok((document, report))
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

fn load_inner(text: &str, options: LoadOptions) -> Result<(Document, LoadReport)> {
    let parsed = parse_document(text, options.parse_mode)?;
    let mut document = Document::new();
    let mut report = LoadReport {
        malformed: parsed.errors,
        ..LoadReport::default()
    };

    for node in &parsed.nodes {
        match node.tag.as_str() {
            "HEAD" => document.set_header(header_from_node(node)),
            "TRLR" => {}
            _ => {
                document.insert_loaded(record_from_node(node))?;
                report.record_count += 1;
            }
        }
    }

    let dangling = document.dangling_references();
    match options.reference_policy {
        ReferencePolicy::Strict => {
            if let Some(first) = dangling.first() {
                return Err(first.to_error());
            }
        }
        ReferencePolicy::Lenient => {
            for reference in &dangling {
                tracing::warn!(
                    target_xref = %reference.target,
                    tag = %reference.tag,
                    "Unresolved reference"
                );
            }
            report.dangling = dangling;
        }
    }

    Ok((document, report))
}

/// Build the typed record for a top-level node
pub fn record_from_node(node: &GedcomNode) -> Record {
    let mut record = match node.tag.as_str() {
        "NOTE" => Record::Note(note_from_node(node)),
        "SUBM" => Record::Submitter(submitter_from_node(node)),
        "INDI" => Record::Individual(individual_from_node(node)),
        "FAM" => Record::Family(family_from_node(node)),
        _ => Record::Custom(custom_record_from_node(node)),
    };
    record.base_mut().set_level(node.level);
    record.base_mut().set_xref(node.xref.clone());
    record
}

/// Keep a node and its subtree verbatim
pub fn custom_from_node(node: &GedcomNode) -> Custom {
    let mut custom = custom_shell(node);
    for child in &node.children {
        custom.push_loaded_child(custom_from_node(child));
    }
    custom
}

/// The node's own line as an unchanged custom structure
fn custom_shell(node: &GedcomNode) -> Custom {
    let mut custom = Custom::default();
    // tags were validated by the parser
    if custom.set_tag(&node.tag).is_err() {
        tracing::warn!(tag = %node.tag, "Unwritable tag kept as default");
    }
    custom.set_value(node.value_str());
    custom.set_level(node.level);
    finish_loaded(&mut custom, None);
    custom
}

/// A top-level unknown record; its `CHAN` is read when it has an identifier
fn custom_record_from_node(node: &GedcomNode) -> Custom {
    if node.xref.is_none() {
        return custom_from_node(node);
    }
    let mut custom = custom_shell(node);
    let (chan_index, change_date) = own_change_date(node).unzip();
    for (index, child) in node.children.iter().enumerate() {
        if Some(index) != chan_index {
            custom.push_loaded_child(custom_from_node(child));
        }
    }
    custom.base_mut().set_change_date(change_date);
    custom
}

/// A `CHAN` node holding exactly a readable `DATE` and optional `TIME`
fn read_change_date(node: &GedcomNode) -> Option<ChangeDate> {
    if node.tag != "CHAN" {
        return None;
    }
    let date = if change_block_is_modelled(node) {
        ChangeDate::from_node(node)
    } else {
        None
    };
    if date.is_none() {
        tracing::warn!(line = node.line_number, "CHAN kept verbatim");
    }
    date
}

fn change_block_is_modelled(node: &GedcomNode) -> bool {
    match node.children.as_slice() {
        [date] if node.value_str().is_empty() && date.tag == "DATE" => {
            match date.children.as_slice() {
                [] => true,
                [time] => time.tag == "TIME" && is_leaf(time),
                _ => false,
            }
        }
        _ => false,
    }
}

/// Position and value of the `CHAN` read as the record's own change date
///
/// The latest readable block wins. It is written after every other line,
/// so reloading the output picks the same one.
fn own_change_date(node: &GedcomNode) -> Option<(usize, ChangeDate)> {
    node.children
        .iter()
        .enumerate()
        .filter_map(|(index, child)| read_change_date(child).map(|date| (index, date)))
        .max_by_key(|(index, date)| (date.timestamp(), *index))
}

/// A simple field line: no sub-structure
fn is_leaf(node: &GedcomNode) -> bool {
    node.children.is_empty()
}

fn note_from_node(node: &GedcomNode) -> Note {
    let mut note = Note::new(node.value_str());
    let (chan_index, change_date) = own_change_date(node).unzip();
    for (index, child) in node.children.iter().enumerate() {
        if Some(index) != chan_index {
            note.push_loaded_extra(custom_from_node(child));
        }
    }
    finish_loaded(&mut note, change_date);
    note
}

fn submitter_from_node(node: &GedcomNode) -> Submitter {
    let mut submitter = Submitter::new("");
    let (chan_index, change_date) = own_change_date(node).unzip();
    let mut name_seen = false;
    for (index, child) in node.children.iter().enumerate() {
        // false: the line was not taken into a typed field
        let modelled = match child.tag.as_str() {
            _ if Some(index) == chan_index => true,
            "NAME" if is_leaf(child) && !name_seen => {
                name_seen = true;
                submitter.set_name(child.value_str());
                true
            }
            "ADDR" if submitter.address().is_empty() && address_is_modelled(child) => {
                let address = submitter.address_mut();
                address.set_lines(child.value_str());
                for part in &child.children {
                    let value = part.value_str();
                    match part.tag.as_str() {
                        "ADR1" => address.set_adr1(value),
                        "ADR2" => address.set_adr2(value),
                        "CITY" => address.set_city(value),
                        "STAE" => address.set_state(value),
                        "POST" => address.set_postal_code(value),
                        "CTRY" => address.set_country(value),
                        _ => false,
                    };
                }
                !submitter.address().is_empty()
            }
            "PHON" if is_leaf(child) => submitter.address_mut().add_phone(child.value_str()),
            "LANG" if is_leaf(child) => submitter.add_language(child.value_str()),
            "RFN" if is_leaf(child) && submitter.registered_rfn().is_empty() => {
                submitter.set_registered_rfn(child.value_str())
            }
            "RIN" if is_leaf(child) && submitter.rin().is_empty() => {
                submitter.set_rin(child.value_str())
            }
            _ => false,
        };
        if !modelled {
            submitter.push_loaded_extra(custom_from_node(child));
        }
    }
    submitter.address_mut().set_change_date(None);
    finish_loaded(&mut submitter, change_date);
    submitter
}

/// `ADDR` whose sub-lines are distinct, non-empty address parts
fn address_is_modelled(node: &GedcomNode) -> bool {
    let mut seen: Vec<&str> = Vec::new();
    node.children.iter().all(|part| {
        let tag = part.tag.as_str();
        let fresh = !seen.contains(&tag);
        seen.push(tag);
        fresh
            && is_leaf(part)
            && !part.value_str().is_empty()
            && matches!(tag, "ADR1" | "ADR2" | "CITY" | "STAE" | "POST" | "CTRY")
    })
}

fn individual_from_node(node: &GedcomNode) -> Individual {
    let mut individual = Individual::new("");
    let (chan_index, change_date) = own_change_date(node).unzip();
    let mut name_seen = false;
    for (index, child) in node.children.iter().enumerate() {
        let pointer = child.pointer().filter(|_| is_leaf(child));
        let modelled = match (child.tag.as_str(), pointer) {
            _ if Some(index) == chan_index => true,
            ("NAME", _) if !name_seen && !(child.value_str().is_empty() && is_leaf(child)) => {
                name_seen = true;
                individual.set_name(child.value_str());
                for part in &child.children {
                    individual.push_loaded_name_part(custom_from_node(part));
                }
                true
            }
            ("SEX", _) if is_leaf(child) && individual.sex().is_none() => {
                individual.set_sex(Sex::from_code(child.value_str()))
            }
            ("FAMC", Some(target)) => individual.add_child_of(target),
            ("FAMS", Some(target)) => individual.add_spouse_of(target),
            ("NOTE", Some(target)) => individual.add_note(target),
            _ => false,
        };
        if !modelled {
            individual.push_loaded_extra(custom_from_node(child));
        }
    }
    finish_loaded(&mut individual, change_date);
    individual
}

fn family_from_node(node: &GedcomNode) -> Family {
    let mut family = Family::new();
    let (chan_index, change_date) = own_change_date(node).unzip();
    for (index, child) in node.children.iter().enumerate() {
        let pointer = child.pointer().filter(|_| is_leaf(child));
        let modelled = match (child.tag.as_str(), pointer) {
            _ if Some(index) == chan_index => true,
            ("HUSB", Some(target)) if family.husband().is_none() => {
                family.set_husband(Some(target))
            }
            ("WIFE", Some(target)) if family.wife().is_none() => family.set_wife(Some(target)),
            ("CHIL", Some(target)) => family.add_child(target),
            ("NOTE", Some(target)) => family.add_note(target),
            _ => false,
        };
        if !modelled {
            family.push_loaded_extra(custom_from_node(child));
        }
    }
    finish_loaded(&mut family, change_date);
    family
}

fn header_from_node(node: &GedcomNode) -> Header {
    let mut header = Header::new("");
    // each modelled line is read once; repeats are kept verbatim
    let mut seen: Vec<&str> = Vec::new();
    for child in &node.children {
        let tag = child.tag.as_str();
        let first = !seen.contains(&tag);
        match tag {
            "SOUR" if first && is_leaf(child) => {
                header.set_source(child.value_str());
            }
            "GEDC" if first && gedc_is_modelled(child) => {
                let version = child.child("VERS").map(GedcomNode::value_str).unwrap_or("");
                let form = child.child("FORM").map(GedcomNode::value_str).unwrap_or("");
                header.set_loaded_gedc(version, form);
            }
            "CHAR" if first && is_leaf(child) => header.set_loaded_charset(child.value_str()),
            "SUBM" if first && is_leaf(child) && child.pointer().is_some() => {
                header.set_loaded_submitter(child.pointer());
            }
            _ => {
                header.push_loaded_extra(custom_from_node(child));
                continue;
            }
        }
        seen.push(tag);
    }
    finish_loaded(&mut header, None);
    header
}

/// `GEDC` holding at most one leaf `VERS` and one leaf `FORM`
fn gedc_is_modelled(node: &GedcomNode) -> bool {
    let count = |tag: &str| node.children.iter().filter(|part| part.tag == tag).count();
    node.value_str().is_empty()
        && count("VERS") <= 1
        && count("FORM") <= 1
        && node.children.iter().all(|part| {
            is_leaf(part) && matches!(part.tag.as_str(), "VERS" | "FORM")
        })
}

/// Loading goes through the ordinary setters; undo their stamps
fn finish_loaded(record: &mut dyn GedcomRecord, change_date: Option<ChangeDate>) {
    record.base_mut().set_change_date(change_date);
    record.mark_clean();
}
