use thiserror::Error;

/// Result type alias using GedcomError
pub type Result<T> = std::result::Result<T, GedcomError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Registry
    DuplicateIdentifier,
    UnresolvedReference,
    IdentifierSpaceExhausted,
    NotFound,

    // Codec
    MalformedLine,
    InvalidTag,
    InvalidXref,

    // Integration/IO
    Io,
    Config,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DuplicateIdentifier => "ERR_DUPLICATE_IDENTIFIER",
            ExErrorKind::UnresolvedReference => "ERR_UNRESOLVED_REFERENCE",
            ExErrorKind::IdentifierSpaceExhausted => "ERR_IDENTIFIER_SPACE_EXHAUSTED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MalformedLine => "ERR_MALFORMED_LINE",
            ExErrorKind::InvalidTag => "ERR_INVALID_TAG",
            ExErrorKind::InvalidXref => "ERR_INVALID_XREF",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context (operation, cross-reference, line number) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    xref: Option<String>,
    line_number: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            xref: None,
            line_number: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add cross-reference context
    pub fn with_xref(mut self, xref: impl Into<String>) -> Self {
        self.xref = Some(xref.into());
        self
    }

    /// Add line number context
    pub fn with_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the cross-reference context, if any
    pub fn xref(&self) -> Option<&str> {
        self.xref.as_deref()
    }

    /// Get the line number context, if any
    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(xref) = &self.xref {
            write!(f, " (xref: {})", xref)?;
        }
        if let Some(line) = self.line_number {
            write!(f, " (line: {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for GEDCOM record and codec operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GedcomError {
    // ===== Registry Errors =====
    /// An identifier was registered twice
    #[error("Duplicate cross-reference identifier @{xref}@")]
    DuplicateIdentifier { xref: String },

    /// A pointer names an identifier no record defines
    #[error("Unresolved reference @{target}@ in {tag} (from {from})")]
    UnresolvedReference {
        target: String,
        tag: String,
        from: String,
    },

    /// The per-registry counter overflowed
    #[error("Identifier space exhausted for prefix '{prefix}'")]
    IdentifierSpaceExhausted { prefix: String },

    /// No record is registered under the identifier
    #[error("Record not found: @{xref}@")]
    RecordNotFound { xref: String },

    // ===== Codec Errors =====
    /// A line could not be decomposed into level/xref/tag/value
    #[error("Malformed line {line_number}: {reason}")]
    MalformedLine { line_number: usize, reason: String },

    /// A tag contains characters that cannot appear in a tag token
    #[error("Invalid tag '{tag}'")]
    InvalidTag { tag: String },

    /// A cross-reference identifier is empty or contains reserved characters
    #[error("Invalid cross-reference identifier '{xref}'")]
    InvalidXref { xref: String },

    // ===== Integration Errors =====
    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from GedcomError to ExError
impl From<GedcomError> for ExError {
    fn from(err: GedcomError) -> Self {
        match err {
            GedcomError::DuplicateIdentifier { xref } => {
                ExError::new(ExErrorKind::DuplicateIdentifier)
                    .with_xref(xref)
                    .with_message("Identifier is already registered")
            }

            GedcomError::UnresolvedReference { target, tag, from } => {
                ExError::new(ExErrorKind::UnresolvedReference)
                    .with_xref(target)
                    .with_message(format!("{} pointer from {} has no target", tag, from))
            }

            GedcomError::IdentifierSpaceExhausted { prefix } => {
                ExError::new(ExErrorKind::IdentifierSpaceExhausted)
                    .with_op("generate_identifier")
                    .with_message(format!("Counter exhausted for prefix '{}'", prefix))
            }

            GedcomError::RecordNotFound { xref } => ExError::new(ExErrorKind::NotFound)
                .with_xref(xref)
                .with_message("Record not found"),

            GedcomError::MalformedLine {
                line_number,
                reason,
            } => ExError::new(ExErrorKind::MalformedLine)
                .with_line(line_number)
                .with_message(reason),

            GedcomError::InvalidTag { tag } => ExError::new(ExErrorKind::InvalidTag)
                .with_message(format!("Invalid tag '{}'", tag)),

            GedcomError::InvalidXref { xref } => ExError::new(ExErrorKind::InvalidXref)
                .with_xref(xref)
                .with_message("Invalid cross-reference identifier"),

            GedcomError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),

            GedcomError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from std::io::Error to GedcomError
impl From<std::io::Error> for GedcomError {
    fn from(err: std::io::Error) -> Self {
        GedcomError::Io {
            message: err.to_string(),
        }
    }
}
