#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::io::{self, Write};

use common::{sample_document, xref};
use gedcom_core::{
    load_document, Document, GedcomError, GedcomRecord, LoadOptions, ParseMode, Record,
    ReferencePolicy, WriterConfig,
};

/// Sink that accepts a fixed number of writes, then fails
struct FailingSink {
    remaining: usize,
    written: Vec<u8>,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.remaining -= 1;
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_render_sample_document() {
    let text = sample_document().render(WriterConfig::default()).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();

    assert_eq!(
        &lines[..19],
        &[
            "0 HEAD",
            "1 SOUR GEDCOM_CORE",
            "1 GEDC",
            "2 VERS 5.5.1",
            "2 FORM LINEAGE-LINKED",
            "1 CHAR UTF-8",
            "1 SUBM @S1@",
            "0 @S1@ SUBM",
            "1 NAME Ann Archivist",
            "0 @I2@ INDI",
            "1 NAME John /Smith/",
            "0 @I3@ INDI",
            "1 NAME Mary /Jones/",
            "0 @N4@ NOTE Married in the",
            "1 CONT parish church",
            "0 @F5@ FAM",
            "1 HUSB @I2@",
            "1 WIFE @I3@",
            "1 NOTE @N4@",
        ]
    );
    // the family was edited through its setters
    assert_eq!(lines[19], "1 CHAN");
    assert!(lines[20].starts_with("2 DATE "));
    assert!(lines[21].starts_with("3 TIME "));
    assert_eq!(lines.last(), Some(&"0 TRLR"));
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_load_then_render_reproduces_the_file() {
    let first = sample_document().render(WriterConfig::default()).unwrap();

    let (loaded, report) = load_document(&first, LoadOptions::default()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.record_count, 5);
    assert!(!loaded.is_dirty());

    let second = loaded.render(WriterConfig::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = sample_document();
    let config = WriterConfig::default().with_max_line_len(40);
    assert_eq!(doc.render(config).unwrap(), doc.render(config).unwrap());
}

#[test]
fn test_write_to_counts_lines() {
    let doc = sample_document();
    let mut sink = Vec::new();
    let count = doc.write_to(&mut sink, WriterConfig::default()).unwrap();
    let text = String::from_utf8(sink).unwrap();
    assert_eq!(count, text.split('\n').count());
}

#[test]
fn test_write_failure_propagates_io_error() {
    let doc = sample_document();
    let mut sink = FailingSink {
        remaining: 2,
        written: Vec::new(),
    };

    let err = doc
        .write_to(&mut sink, WriterConfig::default())
        .unwrap_err();

    assert!(matches!(err, GedcomError::Io { ref message } if message.contains("disk full")));
    // header and first record went out before the failure
    let written = String::from_utf8(sink.written).unwrap();
    assert!(written.starts_with("0 HEAD"));
    assert!(written.ends_with("1 NAME Ann Archivist"));
}

#[test]
fn test_unknown_records_survive_a_cycle() {
    let text = "0 HEAD\n1 SOUR X\n1 GEDC\n2 VERS 5.5.1\n2 FORM LINEAGE-LINKED\n1 CHAR UTF-8\n0 @X1@ _EVENT harvest\n1 _PLAC north field\n2 _NOTE muddy\n0 _LOOSE 1\n0 TRLR";

    let (doc, report) = load_document(text, LoadOptions::default()).unwrap();
    assert_eq!(report.record_count, 2);

    let custom = doc
        .lookup(&xref("X1"))
        .and_then(Record::as_custom)
        .unwrap();
    assert_eq!(custom.value(), "harvest");
    assert_eq!(custom.children()[0].children()[0].value(), "muddy");

    assert_eq!(doc.render(WriterConfig::default()).unwrap(), text);
}

#[test]
fn test_repeated_pointers_survive_a_cycle() {
    let text = "0 HEAD\n0 @I1@ INDI\n1 FAMC @F1@\n1 FAMC @F1@\n0 @F1@ FAM\n1 CHIL @I1@\n1 CHIL @I1@\n0 TRLR";

    let (doc, _) = load_document(text, LoadOptions::default()).unwrap();
    let first = doc.render(WriterConfig::default()).unwrap();

    assert_eq!(first.matches("1 FAMC @F1@").count(), 2);
    assert_eq!(first.matches("1 CHIL @I1@").count(), 2);
    let person = doc
        .lookup(&xref("I1"))
        .and_then(Record::as_individual)
        .unwrap();
    assert_eq!(person.child_of(), &[xref("F1")]);

    let (reloaded, _) = load_document(&first, LoadOptions::default()).unwrap();
    assert_eq!(reloaded.render(WriterConfig::default()).unwrap(), first);
}

#[test]
fn test_repeated_change_blocks_survive_a_cycle() {
    let text = "0 HEAD\n0 @N1@ NOTE x\n1 CHAN\n2 DATE 1 JAN 2020\n3 TIME 10:00:00\n1 CHAN\n2 DATE 1 JAN 2010\n3 TIME 09:00:00\n0 TRLR";

    let (doc, _) = load_document(text, LoadOptions::default()).unwrap();
    let first = doc.render(WriterConfig::default()).unwrap();

    assert!(first.contains("2 DATE 1 JAN 2020\n3 TIME 10:00:00"));
    assert!(first.contains("2 DATE 1 JAN 2010\n3 TIME 09:00:00"));
    let note = doc.lookup(&xref("N1")).unwrap();
    assert_eq!(
        note.effective_change_date().map(|d| d.date_text()),
        Some("1 JAN 2020".to_string())
    );

    let (reloaded, _) = load_document(&first, LoadOptions::default()).unwrap();
    assert_eq!(reloaded.render(WriterConfig::default()).unwrap(), first);
}

#[test]
fn test_strict_policy_rejects_dangling_pointer() {
    let text = "0 HEAD\n0 @F1@ FAM\n1 HUSB @I9@\n0 TRLR";
    let err = load_document(text, LoadOptions::default()).unwrap_err();
    assert_eq!(
        err,
        GedcomError::UnresolvedReference {
            target: "I9".to_string(),
            tag: "HUSB".to_string(),
            from: "@F1@".to_string(),
        }
    );
}

#[test]
fn test_lenient_policy_reports_dangling_pointer() {
    let text = "0 HEAD\n0 @F1@ FAM\n1 HUSB @I9@\n0 TRLR";
    let options = LoadOptions {
        reference_policy: ReferencePolicy::Lenient,
        ..LoadOptions::default()
    };

    let (doc, report) = load_document(text, options).unwrap();

    assert_eq!(report.dangling.len(), 1);
    assert_eq!(report.dangling[0].target, xref("I9"));
    assert_eq!(report.dangling[0].from, Some(xref("F1")));
    // the pointer is kept
    let family = doc.lookup(&xref("F1")).and_then(Record::as_family).unwrap();
    assert_eq!(family.husband(), Some(&xref("I9")));
}

#[test]
fn test_lenient_parse_drops_broken_record_only() {
    let text = "0 HEAD\n0 @N1@ NOTE keep\n0 @N2@ NOTE drop\nbroken line\n1 CONT still dropped\n0 @N3@ NOTE keep too\n0 TRLR";
    let options = LoadOptions {
        parse_mode: ParseMode::Lenient,
        ..LoadOptions::default()
    };

    let (doc, report) = load_document(text, options).unwrap();

    assert_eq!(report.malformed.len(), 1);
    assert!(doc.lookup(&xref("N1")).is_some());
    assert!(doc.lookup(&xref("N2")).is_none());
    assert!(doc.lookup(&xref("N3")).is_some());
}

#[test]
fn test_strict_parse_rejects_malformed_line() {
    let text = "0 HEAD\nbroken line\n0 TRLR";
    let err = load_document(text, LoadOptions::default()).unwrap_err();
    assert!(matches!(err, GedcomError::MalformedLine { line_number: 2, .. }));
}

#[test]
fn test_duplicate_identifier_in_file_is_rejected() {
    let text = "0 HEAD\n0 @N1@ NOTE a\n0 @N1@ NOTE b\n0 TRLR";
    let err = load_document(text, LoadOptions::lenient()).unwrap_err();
    assert_eq!(
        err,
        GedcomError::DuplicateIdentifier {
            xref: "N1".to_string()
        }
    );
}

#[test]
fn test_removing_a_record_leaves_pointers_dangling() {
    let mut doc = sample_document();
    let removed = doc.remove(&xref("N4")).unwrap();
    assert_eq!(removed.as_note().map(|n| n.text()), Some("Married in the\nparish church"));

    let dangling = doc.dangling_references();
    assert_eq!(dangling.len(), 1);
    assert_eq!(dangling[0].from, Some(xref("F5")));
    assert_eq!(dangling[0].tag, "NOTE");

    assert_eq!(
        doc.remove(&xref("N4")).unwrap_err(),
        GedcomError::RecordNotFound {
            xref: "N4".to_string()
        }
    );
}

#[test]
fn test_merge_remaps_colliding_identifiers() {
    let mut target = sample_document();
    let incoming = sample_document();

    let report = target.merge(incoming).unwrap();

    assert_eq!(report.added, 5);
    let remapped: Vec<(String, String)> = report
        .remapped
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();
    assert_eq!(
        remapped,
        [("S1", "S6"), ("I2", "I7"), ("I3", "I8"), ("N4", "N9"), ("F5", "F10")]
            .map(|(a, b)| (a.to_string(), b.to_string()))
    );

    assert_eq!(target.len(), 10);
    assert!(target.dangling_references().is_empty());
    let family = target
        .lookup(&xref("F10"))
        .and_then(Record::as_family)
        .unwrap();
    assert_eq!(family.husband(), Some(&xref("I7")));
    assert_eq!(family.wife(), Some(&xref("I8")));
    assert_eq!(family.notes(), &[xref("N9")]);
    // the incoming header was discarded
    assert_eq!(target.header().submitter(), Some(&xref("S1")));
}

#[test]
fn test_merge_without_collisions_keeps_identifiers() {
    let mut target = Document::new();
    target.add_record(gedcom_core::Note::new("one")).unwrap();

    let (incoming, _) = load_document(
        "0 HEAD\n0 @I100@ INDI\n1 NAME Solo /Person/\n1 NOTE @N1@\n0 TRLR",
        LoadOptions::lenient(),
    )
    .unwrap();

    let report = target.merge(incoming).unwrap();

    assert!(report.remapped.is_empty());
    let person = target.lookup(&xref("I100")).unwrap();
    assert_eq!(person.base().registry(), Some(target.registry().id()));
    // the pointer now resolves against the target's own note
    assert!(target.dangling_references().is_empty());
}

#[test]
fn test_tree_export_carries_records_in_order() {
    let tree = sample_document().to_tree();
    assert_eq!(tree.name, "gedcom");

    let names: Vec<&str> = tree.children().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        ["header", "submitter", "individual", "individual", "note", "family"]
    );
    assert_eq!(tree.children()[4].text_of("text"), Some("Married in the\nparish church"));

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["name"], "gedcom");
}
