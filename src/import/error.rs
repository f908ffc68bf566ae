use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Where in a statement a record came from: file name plus 1-based line (PDF)
/// or row (CSV) number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Location {
    pub(crate) source: String,
    pub(crate) line: usize,
}

impl Location {
    pub(crate) fn new(source: &str, line: usize) -> Self {
        Self {
            source: source.to_string(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

#[derive(Debug, Error)]
pub(crate) enum ImportError {
    #[error("{location}: invalid date token {token:?}")]
    InvalidDateToken { location: Location, token: String },

    #[error("{location}: malformed record ({reason}): {record:?}")]
    MalformedRecord {
        location: Location,
        reason: String,
        record: String,
    },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text from {}: {message}", path.display())]
    Pdf { path: PathBuf, message: String },

    #[error("failed to read CSV {source_name}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },
}

impl ImportError {
    pub(crate) fn malformed(location: Location, reason: impl Into<String>, record: &str) -> Self {
        Self::MalformedRecord {
            location,
            reason: reason.into(),
            record: record.to_string(),
        }
    }

    /// Short label for reports.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDateToken { .. } => "invalid date token",
            Self::MalformedRecord { .. } => "malformed record",
            Self::Io { .. } => "read error",
            Self::Pdf { .. } => "pdf error",
            Self::Csv { .. } => "csv error",
        }
    }
}

pub(crate) type ImportResult<T> = Result<T, ImportError>;
