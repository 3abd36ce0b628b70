use gedcom_core::errors::{ExError, ExErrorKind, GedcomError};

#[test]
fn test_not_found_verifiable_by_kind() {
    let err = GedcomError::RecordNotFound {
        xref: "I404".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::NotFound);
    assert_eq!(ex_err.code(), "ERR_NOT_FOUND");
    assert_eq!(ex_err.xref(), Some("I404"));
}

#[test]
fn test_duplicate_identifier_conversion() {
    let err = GedcomError::DuplicateIdentifier {
        xref: "N1".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateIdentifier);
    assert_eq!(ex_err.code(), "ERR_DUPLICATE_IDENTIFIER");
    assert_eq!(ex_err.xref(), Some("N1"));
}

#[test]
fn test_unresolved_reference_names_the_pointer() {
    let err = GedcomError::UnresolvedReference {
        target: "I9".to_string(),
        tag: "HUSB".to_string(),
        from: "@F1@".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnresolvedReference);
    assert_eq!(ex_err.xref(), Some("I9"));
    assert!(ex_err.message().contains("HUSB"));
    assert!(ex_err.message().contains("@F1@"));
}

#[test]
fn test_exhausted_identifier_space_conversion() {
    let err = GedcomError::IdentifierSpaceExhausted {
        prefix: "N".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::IdentifierSpaceExhausted);
    assert_eq!(ex_err.op(), Some("generate_identifier"));
    assert!(ex_err.message().contains("'N'"));
}

#[test]
fn test_malformed_line_carries_line_number() {
    let err = GedcomError::MalformedLine {
        line_number: 12,
        reason: "level is not a number".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MalformedLine);
    assert_eq!(ex_err.line_number(), Some(12));
    assert_eq!(ex_err.message(), "level is not a number");
}

#[test]
fn test_codec_validation_conversions() {
    let tag: ExError = GedcomError::InvalidTag {
        tag: "BAD TAG".to_string(),
    }
    .into();
    let xref: ExError = GedcomError::InvalidXref {
        xref: "@".to_string(),
    }
    .into();

    assert_eq!(tag.code(), "ERR_INVALID_TAG");
    assert!(tag.message().contains("BAD TAG"));
    assert_eq!(xref.code(), "ERR_INVALID_XREF");
    assert_eq!(xref.xref(), Some("@"));
}

#[test]
fn test_io_error_converts_through_gedcom_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");

    let err: GedcomError = io.into();
    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert!(ex_err.message().contains("no such file"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::DuplicateIdentifier, "ERR_DUPLICATE_IDENTIFIER"),
        (ExErrorKind::UnresolvedReference, "ERR_UNRESOLVED_REFERENCE"),
        (
            ExErrorKind::IdentifierSpaceExhausted,
            "ERR_IDENTIFIER_SPACE_EXHAUSTED",
        ),
        (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
        (ExErrorKind::MalformedLine, "ERR_MALFORMED_LINE"),
        (ExErrorKind::InvalidTag, "ERR_INVALID_TAG"),
        (ExErrorKind::InvalidXref, "ERR_INVALID_XREF"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Config, "ERR_CONFIG"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    let mut codes = std::collections::HashSet::new();
    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
        assert!(codes.insert(expected_code));
    }
}

#[test]
fn test_ex_error_builder_pattern() {
    let ex_err = ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_line(3)
        .with_message("max_line_len must be at least 32");

    assert_eq!(ex_err.kind(), ExErrorKind::Config);
    assert_eq!(ex_err.op(), Some("load_config"));
    assert_eq!(ex_err.line_number(), Some(3));
    assert_eq!(ex_err.message(), "max_line_len must be at least 32");
}

#[test]
fn test_ex_error_display() {
    let ex_err = ExError::new(ExErrorKind::NotFound)
        .with_op("remove_record")
        .with_xref("N4")
        .with_message("Record not found");

    assert_eq!(
        ex_err.to_string(),
        "[ERR_NOT_FOUND] in operation 'remove_record': Record not found (xref: N4)"
    );
}
