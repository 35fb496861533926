use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Malformed user input: either the page selection or the naming template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid page selection '{expression}': {reason}")]
    Selection { expression: String, reason: String },

    #[error("Invalid naming template '{template}': {reason}")]
    Template { template: String, reason: String },
}

/// Every way a split can fail.
#[derive(Error, Debug)]
pub enum SplitError {
    /// The source path does not name an existing, readable file.
    #[error("PDF not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// lopdf could not parse the source.
    #[error("Failed to parse PDF {}: {reason}", .path.display())]
    CorruptDocument { path: PathBuf, reason: String },

    /// The source is encrypted; page extraction is unsupported on it.
    #[error("PDF is encrypted or access-restricted: {}", .path.display())]
    AccessDenied { path: PathBuf },

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The document parsed but has nothing to split.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Isolating a single page failed. `page` is 1-based.
    #[error("Failed to extract page {page}: {reason}")]
    Extraction { page: u32, reason: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Split cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, SplitError>;

/// Where in the batch a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStage {
    Idle,
    Validating,
    Resolving,
    Extracting,
    Done,
}

impl fmt::Display for SplitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SplitStage::Idle => "idle",
            SplitStage::Validating => "validating",
            SplitStage::Resolving => "resolving",
            SplitStage::Extracting => "extracting",
            SplitStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// A failed split, together with the files it had already written.
///
/// Nothing is rolled back: every path in `written` exists on disk and holds a
/// complete single-page PDF.
#[derive(Error, Debug)]
#[error("{error} (while {stage}, {} file(s) written)", .written.len())]
pub struct SplitFailure {
    pub stage: SplitStage,
    pub written: Vec<PathBuf>,
    #[source]
    pub error: SplitError,
}

impl SplitFailure {
    pub fn new(stage: SplitStage, error: impl Into<SplitError>) -> Self {
        SplitFailure {
            stage,
            written: Vec::new(),
            error: error.into(),
        }
    }

    pub fn with_written(mut self, written: Vec<PathBuf>) -> Self {
        self.written = written;
        self
    }
}
