use serde::{Deserialize, Serialize};

/// Default maximum line width, terminator excluded
pub const DEFAULT_MAX_LINE_LEN: usize = 248;

/// Line terminator written before every line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineTerminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineTerminator::Lf => "\n",
            LineTerminator::CrLf => "\r\n",
            LineTerminator::Cr => "\r",
        }
    }
}

/// Settings for the line writer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Maximum width of any emitted line, terminator excluded
    pub max_line_len: usize,
    pub terminator: LineTerminator,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            terminator: LineTerminator::Lf,
        }
    }
}

impl WriterConfig {
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    pub fn with_terminator(mut self, terminator: LineTerminator) -> Self {
        self.terminator = terminator;
        self
    }
}
