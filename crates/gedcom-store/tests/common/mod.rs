use std::path::{Path, PathBuf};

use gedcom_core::{Document, Family, GedcomRecord, Individual, Note, Xref};
use tempfile::TempDir;

/// Create a temp directory for one test
#[allow(dead_code)]
pub fn setup_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write `content` to `name` inside `dir`
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Two people in one family, with a long note
#[allow(dead_code)]
pub fn family_document() -> Document {
    let mut doc = Document::new();
    let husband = doc.add_record(Individual::new("John /Smith/")).unwrap();
    let wife = doc.add_record(Individual::new("Mary /Jones/")).unwrap();
    let note = doc.add_record(Note::new("x".repeat(400))).unwrap();

    let xref_of = |doc: &Document, key| -> Xref {
        doc.get(key).and_then(|r| r.xref()).cloned().unwrap()
    };
    let mut family = Family::new();
    family.set_husband(Some(xref_of(&doc, husband)));
    family.set_wife(Some(xref_of(&doc, wife)));
    family.add_note(xref_of(&doc, note));
    doc.add_record(family).unwrap();
    doc
}
