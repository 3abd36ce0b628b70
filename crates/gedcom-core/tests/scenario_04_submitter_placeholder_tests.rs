//! Scenario 4: Submitter Placeholder
//!
//! An empty submitter name renders as `Unknown`, while an empty registered
//! RFN is left out entirely.
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{output_lines, render_record, xref};
use gedcom_core::{load_document, GedcomRecord, LoadOptions, Record, Registry, Submitter};

fn submitter(name: &str) -> Submitter {
    let mut submitter = Submitter::new(name);
    submitter
        .base_mut()
        .assign(xref("S1"), Registry::new().id());
    submitter
}

#[test]
fn test_scenario_04_empty_name_renders_unknown() {
    // GIVEN a submitter with no name and no RFN
    let submitter = submitter("");

    // WHEN it is rendered
    let out = render_record(&submitter, 248);

    // THEN NAME carries the placeholder and no RFN line exists
    assert_eq!(output_lines(&out), vec!["0 @S1@ SUBM", "1 NAME Unknown"]);
}

#[test]
fn test_scenario_04_present_rfn_is_written() {
    // GIVEN a named submitter with an RFN
    let mut submitter = submitter("Ann");
    submitter.set_registered_rfn("AFN-1234");

    // WHEN it is rendered
    let out = render_record(&submitter, 248);

    // THEN both lines are present in order
    let lines = output_lines(&out);
    assert_eq!(&lines[..3], &["0 @S1@ SUBM", "1 NAME Ann", "1 RFN AFN-1234"]);
}

#[test]
fn test_scenario_04_placeholder_is_not_stored() {
    // GIVEN the rendered empty-name submitter
    let text = format!("0 HEAD{}\n0 TRLR", render_record(&submitter(""), 248));

    // WHEN it is loaded back
    let (doc, _) = load_document(&text, LoadOptions::default()).unwrap();

    // THEN the loaded name is the placeholder text that was in the file
    let loaded = doc
        .lookup(&xref("S1"))
        .and_then(Record::as_submitter)
        .unwrap();
    assert_eq!(loaded.name(), "Unknown");
    assert_eq!(loaded.registered_rfn(), "");
}

#[test]
fn test_scenario_04_clearing_rfn_removes_the_line() {
    // GIVEN a submitter whose RFN is set
    let mut submitter = submitter("Ann");
    submitter.set_registered_rfn("AFN-1");

    // WHEN the RFN is cleared
    assert!(submitter.set_registered_rfn(""));

    // THEN the RFN line disappears while NAME stays
    let out = render_record(&submitter, 248);
    assert!(!out.contains("RFN"));
    assert!(out.contains("\n1 NAME Ann"));
}
