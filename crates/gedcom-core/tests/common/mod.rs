use gedcom_core::codec::{LineWriter, WriterConfig};
use gedcom_core::{Document, GedcomRecord, Individual, Note, Submitter, Xref};

/// Parse an identifier in test setup
#[allow(dead_code)]
pub fn xref(id: &str) -> Xref {
    Xref::new(id).unwrap()
}

/// Writer configuration with the given budget and `\n` terminators
#[allow(dead_code)]
pub fn config_with_budget(max_line_len: usize) -> WriterConfig {
    WriterConfig::default().with_max_line_len(max_line_len)
}

/// Render one record at the given budget
#[allow(dead_code)]
pub fn render_record(record: &dyn GedcomRecord, max_line_len: usize) -> String {
    let mut writer = LineWriter::new(config_with_budget(max_line_len));
    record.render_lines(&mut writer);
    writer.into_string()
}

/// Physical lines of terminator-prefixed output
#[allow(dead_code)]
pub fn output_lines(text: &str) -> Vec<&str> {
    text.split('\n').filter(|l| !l.is_empty()).collect()
}

/// A small linked document: submitter, two people, a family and a note
///
/// Identifiers are generated in insertion order: S1, I2, I3, N4, F5.
#[allow(dead_code)]
pub fn sample_document() -> Document {
    let mut doc = Document::new();

    let submitter = doc.add_record(Submitter::new("Ann Archivist")).unwrap();
    let submitter_xref = doc.get(submitter).and_then(|r| r.xref()).cloned();
    doc.header_mut().set_submitter(submitter_xref);

    doc.add_record(Individual::new("John /Smith/")).unwrap();
    doc.add_record(Individual::new("Mary /Jones/")).unwrap();
    doc.add_record(Note::new("Married in the\nparish church"))
        .unwrap();

    let mut family = gedcom_core::Family::new();
    family.set_husband(Some(xref("I2")));
    family.set_wife(Some(xref("I3")));
    family.add_note(xref("N4"));
    doc.add_record(family).unwrap();

    doc.mark_clean();
    doc
}
